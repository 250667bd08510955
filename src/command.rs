//! SSD1306 opcode and addressing constants.
//!
//! Every I2C transfer to the controller starts with a control byte that
//! selects the destination register:
//! - [`COMMAND_REGISTER`] — the following byte is an opcode (or opcode argument)
//! - [`DATA_REGISTER`] — the following bytes are written to display RAM at
//!   the current cursor
//!
//! In page addressing mode the cursor is a `(page, column)` pair. The column
//! auto-increments after every data byte; the page never does.

// ---------------------------------------------------------------------------
// Bus addressing
// ---------------------------------------------------------------------------

/// Default 7-bit I2C address (`0x78` as an 8-bit write address).
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Control byte announcing a command byte.
pub const COMMAND_REGISTER: u8 = 0x00;

/// Control byte announcing display RAM data.
pub const DATA_REGISTER: u8 = 0x40;

// ---------------------------------------------------------------------------
// Panel geometry
// ---------------------------------------------------------------------------

/// Number of columns per page.
pub const COLUMNS: u8 = 128;

/// Number of 8-pixel pages.
pub const PAGES: u8 = 8;

/// Panel height in pixels.
pub const HEIGHT: u8 = PAGES * 8;

// ---------------------------------------------------------------------------
// Opcodes
// ---------------------------------------------------------------------------

/// Low nibble of the column start address (`0x00..=0x0F`).
pub const SET_LOWER_COLUMN: u8 = 0x00;
/// High nibble of the column start address (`0x10..=0x1F`).
pub const SET_HIGHER_COLUMN: u8 = 0x10;
/// Display start line (`0x40..=0x7F`).
pub const SET_START_LINE: u8 = 0x40;
/// Contrast, followed by one argument byte.
pub const SET_CONTRAST: u8 = 0x81;
/// Charge pump setting, followed by [`CHARGE_PUMP_ENABLE`] or [`CHARGE_PUMP_DISABLE`].
pub const SET_CHARGE_PUMP: u8 = 0x8D;
/// Segment re-map, column 127 mapped to SEG0.
pub const SEGMENT_REMAP: u8 = 0xA1;
/// RAM bit 1 lights a pixel.
pub const NORMAL_DISPLAY: u8 = 0xA6;
/// Multiplex ratio, followed by one argument byte.
pub const SET_MULTIPLEX: u8 = 0xA8;
/// Panel off (sleep).
pub const DISPLAY_OFF: u8 = 0xAE;
/// Panel on.
pub const DISPLAY_ON: u8 = 0xAF;
/// Page start address for page addressing mode (`0xB0..=0xB7`).
pub const SET_PAGE: u8 = 0xB0;
/// COM output scan, remapped (COM[N-1] to COM0).
pub const COM_SCAN_DEC: u8 = 0xC8;
/// Display offset, followed by one argument byte.
pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
/// Clock divide ratio / oscillator frequency, followed by one argument byte.
pub const SET_CLOCK_DIV: u8 = 0xD5;
/// Area colour / low power mode, followed by one argument byte.
pub const SET_AREA_COLOR: u8 = 0xD8;
/// Pre-charge period, followed by one argument byte.
pub const SET_PRECHARGE: u8 = 0xD9;
/// COM pins hardware configuration, followed by one argument byte.
pub const SET_COM_PINS: u8 = 0xDA;

/// Argument to [`SET_CHARGE_PUMP`]: pump on.
pub const CHARGE_PUMP_ENABLE: u8 = 0x14;
/// Argument to [`SET_CHARGE_PUMP`]: pump off.
pub const CHARGE_PUMP_DISABLE: u8 = 0x10;

// ---------------------------------------------------------------------------
// Command tables
// ---------------------------------------------------------------------------

/// Power-up sequence for a 128×64 panel with the internal charge pump.
///
/// Must be sent in order before any other command. The charge pump is
/// enabled before the final [`DISPLAY_ON`].
#[rustfmt::skip]
pub const INIT_SEQUENCE: [u8; 27] = [
    DISPLAY_OFF,
    SET_LOWER_COLUMN,
    SET_HIGHER_COLUMN,
    SET_START_LINE,
    SET_PAGE,
    SET_CONTRAST, 0xFF,
    SEGMENT_REMAP,
    NORMAL_DISPLAY,
    SET_MULTIPLEX, 0x3F, // 1/64 duty
    COM_SCAN_DEC,
    SET_DISPLAY_OFFSET, 0x00,
    SET_CLOCK_DIV, 0x80,
    SET_AREA_COLOR, 0x05,
    SET_PRECHARGE, 0xF1,
    SET_COM_PINS, 0x12,
    SET_AREA_COLOR, 0x30,
    SET_CHARGE_PUMP, CHARGE_PUMP_ENABLE,
    DISPLAY_ON,
];

/// Charge pump on, then panel on.
pub const POWER_ON_SEQUENCE: [u8; 3] = [SET_CHARGE_PUMP, CHARGE_PUMP_ENABLE, DISPLAY_ON];

/// Charge pump off, then panel off.
pub const POWER_OFF_SEQUENCE: [u8; 3] = [SET_CHARGE_PUMP, CHARGE_PUMP_DISABLE, DISPLAY_OFF];

/// The three commands that move the cursor to `(column, page)`.
///
/// Only the low 3 bits of `page` and 7 bits of `column` are encoded.
pub const fn position_commands(column: u8, page: u8) -> [u8; 3] {
    let column = column & 0x7F;
    [
        SET_PAGE | (page & 0x07),
        SET_HIGHER_COLUMN | (column >> 4),
        SET_LOWER_COLUMN | (column & 0x0F),
    ]
}
