//! High-level interface for an SSD1306 128×64 panel.
//!
//! [`Oled`] wraps the register bus with initialisation tracking, range and
//! glyph validation, cursor positioning, and the text/number/bitmap
//! routines. Nothing is buffered: every drawing call re-positions the
//! controller's cursor and streams its bytes straight into display RAM.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::String;

use crate::command::{
    position_commands, COLUMNS, HEIGHT, PAGES, POWER_OFF_SEQUENCE, POWER_ON_SEQUENCE,
};
use crate::config::OledConfig;
use crate::driver::RegisterBus;
use crate::error::OledError;
use crate::font::{FontSet, FontSize};

/// Column advance between characters of a string, whatever the glyph width.
const STRING_ADVANCE: u16 = 8;

/// A string wraps to the next two-page row once `x` passes this column.
const STRING_WRAP_COLUMN: u16 = 120;

/// Widest number `draw_number` can lay out.
pub const MAX_NUMBER_DIGITS: usize = 20;

/// Blocking driver for an SSD1306 128×64 OLED over I2C.
///
/// # Lifecycle
///
/// 1. [`Oled::new()`] / [`Oled::with_config()`] — no I2C traffic.
/// 2. [`Oled::initialize()`] — settle delay, then the init command sequence.
/// 3. Draw with [`clear()`](Self::clear), [`draw_str()`](Self::draw_str),
///    [`draw_number()`](Self::draw_number), [`draw_bitmap()`](Self::draw_bitmap), ...
///
/// Drawing before a successful `initialize()` fails with
/// [`OledError::NotInitialized`]. The raw primitives
/// ([`write_command()`](Self::write_command), [`write_data()`](Self::write_data),
/// [`set_position()`](Self::set_position)) and the power commands are always
/// available.
///
/// # Example
///
/// ```no_run
/// use pageoled::{FontSize, Oled};
///
/// # fn example<I: embedded_hal::i2c::I2c>(i2c: I, delay: &mut impl embedded_hal::delay::DelayNs)
/// # -> Result<(), pageoled::OledError<I::Error>> {
/// let mut oled = Oled::new(i2c, 0x3C);
/// oled.initialize(delay)?;
/// oled.clear()?;
/// oled.draw_str(0, 0, "Hello", FontSize::Large)?;
/// oled.draw_number(0, 2, 42, 3, FontSize::Large)?;
/// # Ok(())
/// # }
/// ```
pub struct Oled<I2C> {
    bus: RegisterBus<I2C>,
    config: OledConfig,
    /// Set to `true` after a successful `initialize()` call.
    initialized: bool,
}

impl<I2C> Oled<I2C>
where
    I2C: I2c,
{
    /// Construct an uninitialised driver with the default configuration.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (typically `0x3C` or `0x3D`)
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self::with_config(
            i2c,
            OledConfig {
                address,
                ..OledConfig::default()
            },
        )
    }

    /// Construct an uninitialised driver from a full configuration.
    pub fn with_config(i2c: I2C, config: OledConfig) -> Self {
        Self {
            bus: RegisterBus::new(i2c, config.address, config.transfer),
            config,
            initialized: false,
        }
    }

    /// Consume the driver and give the I2C peripheral back.
    pub fn release(self) -> I2C {
        self.bus.release()
    }

    /// Check whether [`initialize()`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Configuration the driver was built with.
    pub fn config(&self) -> &OledConfig {
        &self.config
    }

    /// Glyph tables used by the text and number routines.
    pub fn fonts(&self) -> &FontSet {
        &self.config.fonts
    }

    #[cfg(test)]
    pub(crate) fn bus_mut(&mut self) -> &mut I2C {
        self.bus.i2c_mut()
    }

    // -----------------------------------------------------------------------
    // Initialisation
    // -----------------------------------------------------------------------

    /// Wait for the panel's supply to settle, then send the init sequence.
    ///
    /// The sequence is sent one command per transfer, in order. The driver
    /// is marked initialised only if every command was acknowledged.
    ///
    /// # Errors
    /// [`OledError::I2c`] with the first bus failure; the remaining commands
    /// are not sent.
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), OledError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("OLED power-on settle: {} ms", self.config.power_on_delay_ms);

        delay.delay_ms(self.config.power_on_delay_ms);

        if let Err(e) = self.bus.commands(self.config.init_sequence) {
            #[cfg(feature = "defmt")]
            defmt::error!("OLED init sequence failed");
            self.initialized = false;
            return Err(e);
        }

        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::info!("OLED initialised at {=u8:#x}", self.config.address);

        Ok(())
    }

    // -----------------------------------------------------------------------
    // Primitives
    // -----------------------------------------------------------------------

    /// Send one opcode to the command register.
    pub fn write_command(&mut self, command: u8) -> Result<(), OledError<I2C::Error>> {
        self.bus.command(command)
    }

    /// Write one byte of display RAM at the current cursor.
    pub fn write_data(&mut self, byte: u8) -> Result<(), OledError<I2C::Error>> {
        self.bus.data(byte)
    }

    /// Move the cursor to `column` (0–127) of `page` (0–7).
    ///
    /// Sends exactly three commands: page select, column high nibble,
    /// column low nibble.
    ///
    /// # Errors
    /// [`OledError::InvalidPosition`] without touching the bus if either
    /// coordinate is out of range.
    pub fn set_position(&mut self, column: u8, page: u8) -> Result<(), OledError<I2C::Error>> {
        Self::check_span(column, page, 1)?;
        self.bus.commands(&position_commands(column, page))
    }

    // -----------------------------------------------------------------------
    // Panel power
    // -----------------------------------------------------------------------

    /// Enable the charge pump, then switch the panel on.
    pub fn display_on(&mut self) -> Result<(), OledError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("OLED display on");
        self.bus.commands(&POWER_ON_SEQUENCE)
    }

    /// Disable the charge pump, then switch the panel off. RAM is retained.
    pub fn display_off(&mut self) -> Result<(), OledError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("OLED display off");
        self.bus.commands(&POWER_OFF_SEQUENCE)
    }

    // -----------------------------------------------------------------------
    // Full-frame sweeps
    // -----------------------------------------------------------------------

    /// Blank the whole panel: 128 zero bytes on each of the 8 pages.
    pub fn clear(&mut self) -> Result<(), OledError<I2C::Error>> {
        self.sweep(0x00)
    }

    /// Lamp test: fill every column of every page with
    /// [`OledConfig::lamp_pattern`].
    pub fn all_on(&mut self) -> Result<(), OledError<I2C::Error>> {
        self.sweep(self.config.lamp_pattern)
    }

    fn sweep(&mut self, pattern: u8) -> Result<(), OledError<I2C::Error>> {
        self.ensure_initialized()?;

        #[cfg(feature = "defmt")]
        defmt::debug!("OLED sweep {=u8:#x}", pattern);

        for page in 0..PAGES {
            self.set_position(0, page)?;
            self.bus.fill(pattern, usize::from(COLUMNS))?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Text
    // -----------------------------------------------------------------------

    /// Draw one printable ASCII character with its top-left at column `x`,
    /// page `y`.
    ///
    /// A large glyph spans pages `y` and `y + 1`. If `x` is past the last
    /// column the glyph is moved to column 0 two pages down.
    ///
    /// # Errors
    /// * [`OledError::UnsupportedCharacter`] if `code` has no glyph
    /// * [`OledError::InvalidPosition`] if the glyph would leave the panel
    /// * [`OledError::I2c`] on communication failure
    pub fn draw_char(
        &mut self,
        x: u8,
        y: u8,
        code: u8,
        size: FontSize,
    ) -> Result<(), OledError<I2C::Error>> {
        self.ensure_initialized()?;
        let x = u16::from(x);
        self.check_char(x, y, code, size)?;
        self.render_char(x, y, code, size)
    }

    /// Draw a string left to right in 8-column cells.
    ///
    /// Rendering stops at the end of `text` or at the first NUL byte. Once
    /// the next cell would start past column 120 the string continues at
    /// column 0 two pages down. Every character is validated before the
    /// first one is drawn.
    ///
    /// # Errors
    /// Same as [`draw_char()`](Self::draw_char), for any character.
    pub fn draw_str(
        &mut self,
        x: u8,
        y: u8,
        text: &str,
        size: FontSize,
    ) -> Result<(), OledError<I2C::Error>> {
        self.ensure_initialized()?;

        for (cx, cy, code) in TextLayout::new(x, y, text.as_bytes()) {
            self.check_char(cx, cy, code, size)?;
        }
        for (cx, cy, code) in TextLayout::new(x, y, text.as_bytes()) {
            self.render_char(cx, cy, code, size)?;
        }
        Ok(())
    }

    /// Draw wide glyph `index` (16×16) at column `x`, pages `y` and `y + 1`.
    ///
    /// # Errors
    /// * [`OledError::GlyphOutOfRange`] if the wide table has no such glyph
    /// * [`OledError::InvalidPosition`] if `y + 1` is past the last page
    /// * [`OledError::I2c`] on communication failure
    pub fn draw_wide_glyph(&mut self, x: u8, y: u8, index: u8) -> Result<(), OledError<I2C::Error>> {
        self.ensure_initialized()?;

        let Some((top, bottom)) = self.config.fonts.wide_glyph(index) else {
            return Err(OledError::GlyphOutOfRange(index));
        };
        Self::check_span(x, y, 2)?;

        self.set_position(x, y)?;
        self.bus.data_burst(top)?;
        self.set_position(x, y + 1)?;
        self.bus.data_burst(bottom)
    }

    /// Draw `value` right-aligned in `digits` character cells.
    ///
    /// Leading zeros are drawn as blanks; the ones digit is always drawn, so
    /// `0` in three cells shows as `"  0"`. Cell `t` starts at column
    /// `x + t * size.cell_width()`.
    ///
    /// # Errors
    /// * [`OledError::NumberOverflow`] if `value` needs more than `digits`
    ///   cells or `digits` exceeds [`MAX_NUMBER_DIGITS`]
    /// * Same as [`draw_char()`](Self::draw_char) for each cell
    pub fn draw_number(
        &mut self,
        x: u8,
        y: u8,
        value: u32,
        digits: u8,
        size: FontSize,
    ) -> Result<(), OledError<I2C::Error>> {
        self.ensure_initialized()?;

        let Some(cells) = number_cells(value, digits) else {
            return Err(OledError::NumberOverflow);
        };
        let advance = u16::from(size.cell_width());
        let origin = u16::from(x);

        for (t, &code) in (0u16..).zip(cells.as_bytes()) {
            self.check_char(origin + t * advance, y, code, size)?;
        }
        for (t, &code) in (0u16..).zip(cells.as_bytes()) {
            self.render_char(origin + t * advance, y, code, size)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Bitmaps
    // -----------------------------------------------------------------------

    /// Copy a page-major bitmap into display RAM.
    ///
    /// Covers columns `x0..x1` and pages `y0` through the page holding pixel
    /// row `y1 - 1`. Each page row takes the next `x1 - x0` bytes of `data`.
    ///
    /// # Errors
    /// * [`OledError::InvalidBitmap`] if `x0 > x1`, `x1 > 128`, `y1 > 64`,
    ///   `y0` is not above the page holding pixel row `y1 - 1`, or `data` is
    ///   shorter than the covered area
    /// * [`OledError::I2c`] on communication failure
    pub fn draw_bitmap(
        &mut self,
        x0: u8,
        y0: u8,
        x1: u8,
        y1: u8,
        data: &[u8],
    ) -> Result<(), OledError<I2C::Error>> {
        self.ensure_initialized()?;

        if x0 > x1 || x1 > COLUMNS || y1 > HEIGHT {
            return Err(OledError::InvalidBitmap);
        }
        let width = usize::from(x1 - x0);
        let end_page = y1.div_ceil(8);
        if width == 0 {
            return Ok(());
        }
        // `y0` is a page, `y1` a pixel row.
        if y0 >= end_page {
            return Err(OledError::InvalidBitmap);
        }
        let rows = usize::from(end_page - y0);
        if data.len() < width * rows {
            return Err(OledError::InvalidBitmap);
        }

        for (page, row) in (y0..end_page).zip(data.chunks(width)) {
            self.set_position(x0, page)?;
            self.bus.data_burst(row)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Check that `pages` pages starting at `page` fit on the panel at `column`.
    fn check_span(column: u8, page: u8, pages: u8) -> Result<(), OledError<I2C::Error>> {
        if column < COLUMNS && u16::from(page) + u16::from(pages) <= u16::from(PAGES) {
            Ok(())
        } else {
            Err(OledError::InvalidPosition { column, page })
        }
    }

    fn ensure_initialized(&self) -> Result<(), OledError<I2C::Error>> {
        if self.initialized {
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::warn!("OLED used before initialize()");
            Err(OledError::NotInitialized)
        }
    }

    /// Validate a character cell without any bus traffic.
    fn check_char(
        &self,
        x: u16,
        y: u8,
        code: u8,
        size: FontSize,
    ) -> Result<(), OledError<I2C::Error>> {
        let fonts = &self.config.fonts;
        let found = match size {
            FontSize::Small => fonts.small_glyph(code).is_some(),
            FontSize::Large => fonts.large_glyph(code).is_some(),
        };
        if !found {
            return Err(OledError::UnsupportedCharacter(code));
        }
        let (column, page) = relocate(x, y);
        Self::check_span(column, page, size.pages())
    }

    fn render_char(
        &mut self,
        x: u16,
        y: u8,
        code: u8,
        size: FontSize,
    ) -> Result<(), OledError<I2C::Error>> {
        let (column, page) = relocate(x, y);
        match size {
            FontSize::Small => {
                let Some(glyph) = self.config.fonts.small_glyph(code) else {
                    return Err(OledError::UnsupportedCharacter(code));
                };
                self.set_position(column, page)?;
                self.bus.data_burst(glyph)
            }
            FontSize::Large => {
                let Some((top, bottom)) = self.config.fonts.large_glyph(code) else {
                    return Err(OledError::UnsupportedCharacter(code));
                };
                Self::check_span(column, page, 2)?;
                self.set_position(column, page)?;
                self.bus.data_burst(top)?;
                self.set_position(column, page + 1)?;
                self.bus.data_burst(bottom)
            }
        }
    }
}

/// Move a cell that starts past the last column to column 0, two pages down.
fn relocate(x: u16, y: u8) -> (u8, u8) {
    match u8::try_from(x) {
        Ok(column) if column < COLUMNS => (column, y),
        _ => (0, y.saturating_add(2)),
    }
}

/// Format `value` right-aligned with blanks into exactly `digits` cells.
fn number_cells(value: u32, digits: u8) -> Option<String<MAX_NUMBER_DIGITS>> {
    let width = usize::from(digits);
    let mut cells = String::new();
    write!(cells, "{:>width$}", value, width = width).ok()?;
    (cells.len() <= width).then_some(cells)
}

/// Cell positions of the characters of a string.
#[derive(Clone)]
struct TextLayout<'a> {
    bytes: &'a [u8],
    x: u16,
    y: u8,
}

impl<'a> TextLayout<'a> {
    fn new(x: u8, y: u8, bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            x: u16::from(x),
            y,
        }
    }
}

impl Iterator for TextLayout<'_> {
    type Item = (u16, u8, u8);

    fn next(&mut self) -> Option<Self::Item> {
        let (&code, rest) = self.bytes.split_first()?;
        if code == 0 {
            self.bytes = &[];
            return None;
        }
        self.bytes = rest;

        let cell = (self.x, self.y, code);
        self.x += STRING_ADVANCE;
        if self.x > STRING_WRAP_COLUMN {
            self.x = 0;
            self.y = self.y.saturating_add(2);
        }
        Some(cell)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec;
    use std::vec::Vec;

    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    use super::*;
    use crate::command::INIT_SEQUENCE;
    use crate::config::TransferMode;
    use crate::font::{ASCII_6X8, ASCII_8X16};
    use crate::panel_model::{Burst, PanelModel, RecordingDelay, Step, Timeline};

    /// Initialised driver over a panel model with an empty log.
    fn ready(panel: PanelModel, config: OledConfig) -> Oled<PanelModel> {
        let mut oled = Oled::with_config(panel, config);
        oled.initialize(&mut RecordingDelay::default()).unwrap();
        oled.bus_mut().clear_log();
        oled
    }

    fn ready_default() -> Oled<PanelModel> {
        ready(PanelModel::new(), OledConfig::default())
    }

    fn burst(page: u8, column: u8, bytes: &[u8]) -> Burst {
        Burst {
            page,
            column,
            bytes: bytes.to_vec(),
        }
    }

    fn small(c: u8) -> &'static [u8] {
        &ASCII_6X8[usize::from(c - b' ')]
    }

    fn large(c: u8) -> (&'static [u8], &'static [u8]) {
        ASCII_8X16[usize::from(c - b' ')].split_at(8)
    }

    // ── Lifecycle ───────────────────────────────────────────────────────

    #[test]
    fn construction_sends_nothing() {
        let oled = Oled::new(I2cMock::new(&[]), 0x3C);
        assert!(!oled.is_initialized());
        oled.release().done();
    }

    #[test]
    fn accessors_expose_construction_config() {
        static ICONS: [[u8; 16]; 2] = [[0xAA; 16], [0x55; 16]];
        let config = OledConfig {
            address: 0x3D,
            lamp_pattern: 0x01,
            fonts: FontSet::ascii().with_wide(&ICONS),
            ..OledConfig::default()
        };
        let oled = Oled::with_config(I2cMock::new(&[]), config);

        assert_eq!(oled.config().address, 0x3D);
        assert_eq!(oled.config().lamp_pattern, 0x01);
        assert_eq!(oled.fonts().wide_len(), 1);
        let default_oled = Oled::new(I2cMock::new(&[]), 0x3C);
        assert_eq!(default_oled.config().address, 0x3C);
        default_oled.release().done();
        oled.release().done();
    }

    #[test]
    fn initialize_sends_sequence_in_order_once() {
        let expectations: Vec<_> = INIT_SEQUENCE
            .iter()
            .map(|&c| I2cTransaction::write(0x3C, vec![0x00, c]))
            .collect();
        let mut oled = Oled::new(I2cMock::new(&expectations), 0x3C);
        let mut delay = RecordingDelay::default();

        oled.initialize(&mut delay).unwrap();

        assert!(oled.is_initialized());
        assert_eq!(delay.ms, [200]);
        oled.release().done();
    }

    #[test]
    fn initialize_waits_before_first_transfer() {
        let timeline = Timeline::default();
        let panel = PanelModel::new().with_timeline(timeline.clone());
        let mut oled = Oled::with_config(panel, OledConfig::default());

        oled.initialize(&mut RecordingDelay::with_timeline(timeline.clone()))
            .unwrap();

        let steps = timeline.borrow();
        assert_eq!(steps.len(), 1 + INIT_SEQUENCE.len());
        assert_eq!(steps[0], Step::DelayMs(200));
        assert!(steps[1..].iter().all(|s| *s == Step::Transfer));
        let panel = oled.release();
        assert_eq!(panel.commands, INIT_SEQUENCE);
        assert!(panel.addresses.iter().all(|&a| a == 0x3C));
    }

    #[test]
    fn initialize_uses_configured_address_delay_and_sequence() {
        static SHORT: [u8; 2] = [0xAE, 0xAF];
        let config = OledConfig {
            address: 0x3D,
            power_on_delay_ms: 50,
            init_sequence: &SHORT,
            ..OledConfig::default()
        };
        let expectations = [
            I2cTransaction::write(0x3D, vec![0x00, 0xAE]),
            I2cTransaction::write(0x3D, vec![0x00, 0xAF]),
        ];
        let mut oled = Oled::with_config(I2cMock::new(&expectations), config);
        let mut delay = RecordingDelay::default();

        oled.initialize(&mut delay).unwrap();

        assert_eq!(delay.ms, [50]);
        oled.release().done();
    }

    #[test]
    fn initialize_stops_at_first_nack() {
        let mut oled = Oled::new(PanelModel::new().fail_on(5), 0x3C);

        let err = oled.initialize(&mut RecordingDelay::default()).unwrap_err();

        assert!(err.is_nack());
        assert!(!oled.is_initialized());
        let panel = oled.release();
        assert_eq!(panel.transfers, 5);
        assert_eq!(panel.commands, INIT_SEQUENCE[..4]);
    }

    #[test]
    fn drawing_requires_initialize() {
        let mut oled = Oled::new(PanelModel::new(), 0x3C);

        assert_eq!(oled.clear(), Err(OledError::NotInitialized));
        assert_eq!(oled.all_on(), Err(OledError::NotInitialized));
        assert_eq!(
            oled.draw_char(0, 0, b'A', FontSize::Small),
            Err(OledError::NotInitialized)
        );
        assert_eq!(
            oled.draw_str(0, 0, "A", FontSize::Small),
            Err(OledError::NotInitialized)
        );
        assert_eq!(oled.draw_wide_glyph(0, 0, 0), Err(OledError::NotInitialized));
        assert_eq!(
            oled.draw_number(0, 0, 1, 1, FontSize::Small),
            Err(OledError::NotInitialized)
        );
        assert_eq!(
            oled.draw_bitmap(0, 0, 8, 8, &[0; 8]),
            Err(OledError::NotInitialized)
        );
        assert_eq!(oled.release().transfers, 0);
    }

    // ── Primitives ──────────────────────────────────────────────────────

    #[test]
    fn set_position_emits_three_commands() {
        let expectations = [
            I2cTransaction::write(0x3C, vec![0x00, 0xB5]),
            I2cTransaction::write(0x3C, vec![0x00, 0x14]),
            I2cTransaction::write(0x3C, vec![0x00, 0x0D]),
        ];
        let mut oled = Oled::new(I2cMock::new(&expectations), 0x3C);

        oled.set_position(0x4D, 5).unwrap();

        oled.release().done();
    }

    #[test]
    fn set_position_rejects_out_of_range() {
        let mut oled = Oled::new(I2cMock::new(&[]), 0x3C);

        assert_eq!(
            oled.set_position(128, 0),
            Err(OledError::InvalidPosition { column: 128, page: 0 })
        );
        assert_eq!(
            oled.set_position(0, 8),
            Err(OledError::InvalidPosition { column: 0, page: 8 })
        );
        oled.release().done();
    }

    #[test]
    fn raw_writes_use_command_and_data_registers() {
        let expectations = [
            I2cTransaction::write(0x3C, vec![0x00, 0xA7]),
            I2cTransaction::write(0x3C, vec![0x40, 0x81]),
        ];
        let mut oled = Oled::new(I2cMock::new(&expectations), 0x3C);

        oled.write_command(0xA7).unwrap();
        oled.write_data(0x81).unwrap();

        oled.release().done();
    }

    #[test]
    fn display_power_orders_pump_and_panel() {
        let expectations = [
            I2cTransaction::write(0x3C, vec![0x00, 0x8D]),
            I2cTransaction::write(0x3C, vec![0x00, 0x14]),
            I2cTransaction::write(0x3C, vec![0x00, 0xAF]),
            I2cTransaction::write(0x3C, vec![0x00, 0x8D]),
            I2cTransaction::write(0x3C, vec![0x00, 0x10]),
            I2cTransaction::write(0x3C, vec![0x00, 0xAE]),
        ];
        let mut oled = Oled::new(I2cMock::new(&expectations), 0x3C);

        oled.display_on().unwrap();
        oled.display_off().unwrap();

        oled.release().done();
    }

    // ── Sweeps ──────────────────────────────────────────────────────────

    #[test]
    fn clear_blanks_every_page() {
        let mut oled = ready(PanelModel::with_ram(0xA5), OledConfig::default());

        oled.clear().unwrap();

        let panel = oled.release();
        assert!(panel.ram.iter().all(|page| page.iter().all(|&b| b == 0)));
        assert_eq!(panel.data_len(), 1024);
        assert_eq!(panel.bursts.len(), 8);
        for (page, b) in (0u8..).zip(&panel.bursts) {
            assert_eq!((b.page, b.column), (page, 0));
        }
    }

    #[test]
    fn all_on_lights_every_column() {
        let mut oled = ready_default();

        oled.all_on().unwrap();

        let panel = oled.release();
        assert!(panel.ram.iter().all(|page| page.iter().all(|&b| b == 0xFF)));
        assert_eq!(panel.data_len(), 1024);
    }

    #[test]
    fn sweeps_ignore_prior_cursor() {
        let mut oled = ready_default();
        oled.set_position(77, 6).unwrap();
        oled.write_data(0x3C).unwrap();
        oled.bus_mut().clear_log();

        oled.clear().unwrap();

        let panel = oled.release();
        assert_eq!(panel.data_len(), 1024);
        assert_eq!(panel.ram[6][77], 0);
    }

    #[test]
    fn burst_mode_sweep_uses_one_transfer_per_page() {
        let config = OledConfig {
            transfer: TransferMode::Burst,
            ..OledConfig::default()
        };
        let mut oled = ready(PanelModel::with_ram(0x11), config);
        let before = oled.bus_mut().transfers;

        oled.clear().unwrap();

        let panel = oled.release();
        // 3 positioning commands + 1 data transfer per page.
        assert_eq!(panel.transfers - before, 8 * 4);
        assert_eq!(panel.data_len(), 1024);
        assert!(panel.ram.iter().all(|page| page.iter().all(|&b| b == 0)));
    }

    #[test]
    fn sweep_stops_on_bus_error() {
        let mut oled = ready_default();
        // Fail the first data byte of page 0.
        let panel = core::mem::replace(oled.bus_mut(), PanelModel::new());
        *oled.bus_mut() = panel.fail_on(4);

        let err = oled.clear().unwrap_err();

        assert!(err.is_nack());
        assert_eq!(oled.release().data_len(), 0);
    }

    // ── Characters ──────────────────────────────────────────────────────

    #[test]
    fn large_char_is_two_eight_byte_bursts() {
        let mut oled = ready_default();

        oled.draw_char(16, 2, b'A', FontSize::Large).unwrap();

        let (top, bottom) = large(b'A');
        let panel = oled.release();
        assert_eq!(panel.bursts, [burst(2, 16, top), burst(3, 16, bottom)]);
    }

    #[test]
    fn small_char_is_one_six_byte_burst() {
        let mut oled = ready_default();

        oled.draw_char(5, 7, b'z', FontSize::Small).unwrap();

        let panel = oled.release();
        assert_eq!(panel.bursts, [burst(7, 5, small(b'z'))]);
        assert_eq!(panel.commands, [0xB7, 0x10, 0x05]);
    }

    #[test]
    fn char_past_last_column_moves_down_two_pages() {
        let mut oled = ready_default();

        oled.draw_char(130, 1, b'B', FontSize::Small).unwrap();

        assert_eq!(oled.release().bursts, [burst(3, 0, small(b'B'))]);
    }

    #[test]
    fn large_char_on_last_page_is_rejected() {
        let mut oled = ready_default();

        assert_eq!(
            oled.draw_char(0, 7, b'A', FontSize::Large),
            Err(OledError::InvalidPosition { column: 0, page: 7 })
        );
        assert!(oled.release().commands.is_empty());
    }

    #[test]
    fn control_character_is_rejected() {
        let mut oled = ready_default();

        assert_eq!(
            oled.draw_char(0, 0, b'\n', FontSize::Small),
            Err(OledError::UnsupportedCharacter(b'\n'))
        );
        assert_eq!(
            oled.draw_char(0, 0, 0x7F, FontSize::Large),
            Err(OledError::UnsupportedCharacter(0x7F))
        );
        assert_eq!(oled.release().transfers, INIT_SEQUENCE.len());
    }

    // ── Strings ─────────────────────────────────────────────────────────

    #[test]
    fn string_advances_eight_columns_per_char() {
        let mut oled = ready_default();

        oled.draw_str(0, 0, "AB", FontSize::Large).unwrap();

        let (a_top, a_bottom) = large(b'A');
        let (b_top, b_bottom) = large(b'B');
        assert_eq!(
            oled.release().bursts,
            [
                burst(0, 0, a_top),
                burst(1, 0, a_bottom),
                burst(0, 8, b_top),
                burst(1, 8, b_bottom),
            ]
        );
    }

    #[test]
    fn small_string_still_uses_eight_column_cells() {
        let mut oled = ready_default();

        oled.draw_str(10, 4, "hi", FontSize::Small).unwrap();

        assert_eq!(
            oled.release().bursts,
            [burst(4, 10, small(b'h')), burst(4, 18, small(b'i'))]
        );
    }

    #[test]
    fn string_wraps_once_x_exceeds_120() {
        let mut oled = ready_default();

        oled.draw_str(112, 0, "ABC", FontSize::Large).unwrap();

        let starts: Vec<_> = oled
            .release()
            .bursts
            .iter()
            .map(|b| (b.page, b.column))
            .collect();
        // 'A' at 112, 'B' at 120, then x = 128 > 120 wraps 'C' to (0, y + 2).
        assert_eq!(starts, [(0, 112), (1, 112), (0, 120), (1, 120), (2, 0), (3, 0)]);
    }

    #[test]
    fn string_stops_at_nul() {
        let mut oled = ready_default();

        oled.draw_str(0, 0, "ok\0ignored", FontSize::Small).unwrap();

        assert_eq!(oled.release().bursts.len(), 2);
    }

    #[test]
    fn string_with_bad_character_draws_nothing() {
        let mut oled = ready_default();

        assert_eq!(
            oled.draw_str(0, 0, "AB\tC", FontSize::Small),
            Err(OledError::UnsupportedCharacter(b'\t'))
        );
        assert!(oled.release().commands.is_empty());
    }

    #[test]
    fn string_running_off_the_bottom_draws_nothing() {
        let mut oled = ready_default();

        // Two rows of 16 cells fit on pages 4 and 6; the 33rd cell needs page 8.
        let text = "0123456789abcdef0123456789abcdefX";
        assert_eq!(
            oled.draw_str(0, 4, text, FontSize::Large),
            Err(OledError::InvalidPosition { column: 0, page: 8 })
        );
        assert!(oled.release().commands.is_empty());
    }

    // ── Wide glyphs ─────────────────────────────────────────────────────

    static WIDE: [[u8; 16]; 4] = [[0x01; 16], [0x02; 16], [0x03; 16], [0x04; 16]];

    fn ready_with_wide() -> Oled<PanelModel> {
        let config = OledConfig {
            fonts: FontSet::ascii().with_wide(&WIDE),
            ..OledConfig::default()
        };
        ready(PanelModel::new(), config)
    }

    #[test]
    fn wide_glyph_uses_rows_2n_and_2n_plus_1() {
        let mut oled = ready_with_wide();

        oled.draw_wide_glyph(32, 4, 1).unwrap();

        assert_eq!(
            oled.release().bursts,
            [burst(4, 32, &[0x03; 16]), burst(5, 32, &[0x04; 16])]
        );
    }

    #[test]
    fn wide_glyph_index_is_checked() {
        let mut oled = ready_with_wide();

        assert_eq!(oled.draw_wide_glyph(0, 0, 2), Err(OledError::GlyphOutOfRange(2)));
        assert_eq!(
            oled.draw_wide_glyph(0, 7, 0),
            Err(OledError::InvalidPosition { column: 0, page: 7 })
        );
        assert!(oled.release().commands.is_empty());
    }

    #[test]
    fn wide_glyph_without_table_is_out_of_range() {
        let mut oled = ready_default();
        assert_eq!(oled.draw_wide_glyph(0, 0, 0), Err(OledError::GlyphOutOfRange(0)));
    }

    // ── Numbers ─────────────────────────────────────────────────────────

    #[test]
    fn number_cells_blank_leading_zeros() {
        assert_eq!(number_cells(7, 3).unwrap().as_str(), "  7");
        assert_eq!(number_cells(0, 3).unwrap().as_str(), "  0");
        assert_eq!(number_cells(105, 3).unwrap().as_str(), "105");
        assert_eq!(number_cells(4_294_967_295, 10).unwrap().as_str(), "4294967295");
        assert!(number_cells(1000, 3).is_none());
        assert!(number_cells(0, 0).is_none());
        assert!(number_cells(1, 21).is_none());
    }

    #[test]
    fn number_draws_blank_blank_digit() {
        let mut oled = ready_default();

        oled.draw_number(0, 0, 7, 3, FontSize::Large).unwrap();

        let (blank_top, blank_bottom) = large(b' ');
        let (seven_top, seven_bottom) = large(b'7');
        assert_eq!(
            oled.release().bursts,
            [
                burst(0, 0, blank_top),
                burst(1, 0, blank_bottom),
                burst(0, 8, blank_top),
                burst(1, 8, blank_bottom),
                burst(0, 16, seven_top),
                burst(1, 16, seven_bottom),
            ]
        );
    }

    #[test]
    fn zero_still_shows_its_ones_digit() {
        let mut oled = ready_default();

        oled.draw_number(0, 3, 0, 3, FontSize::Small).unwrap();

        assert_eq!(
            oled.release().bursts,
            [
                burst(3, 0, small(b' ')),
                burst(3, 6, small(b' ')),
                burst(3, 12, small(b'0')),
            ]
        );
    }

    #[test]
    fn number_too_wide_is_rejected() {
        let mut oled = ready_default();

        assert_eq!(
            oled.draw_number(0, 0, 1234, 3, FontSize::Small),
            Err(OledError::NumberOverflow)
        );
        assert!(oled.release().commands.is_empty());
    }

    // ── Bitmaps ─────────────────────────────────────────────────────────

    #[test]
    fn bitmap_single_page_row() {
        let mut oled = ready_default();
        let data: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

        oled.draw_bitmap(0, 0, 8, 8, &data).unwrap();

        let panel = oled.release();
        assert_eq!(panel.commands, [0xB0, 0x10, 0x00]);
        assert_eq!(panel.bursts, [burst(0, 0, &data)]);
    }

    #[test]
    fn bitmap_rows_are_page_major() {
        let mut oled = ready_default();
        let data: Vec<u8> = (0..12).collect();

        // 4 columns on pages 1 to 3; pixel row 27 lies on page 3.
        oled.draw_bitmap(60, 1, 64, 28, &data).unwrap();

        let panel = oled.release();
        assert_eq!(
            panel.bursts,
            [
                burst(1, 60, &data[0..4]),
                burst(2, 60, &data[4..8]),
                burst(3, 60, &data[8..12]),
            ]
        );
        assert_eq!(panel.ram[2][60..64], [4, 5, 6, 7]);
    }

    #[test]
    fn bitmap_full_frame_matches_data() {
        let mut oled = ready(
            PanelModel::new(),
            OledConfig {
                transfer: TransferMode::Burst,
                ..OledConfig::default()
            },
        );
        let data: Vec<u8> = (0..1024).map(|i| (i % 251) as u8).collect();

        oled.draw_bitmap(0, 0, 128, 64, &data).unwrap();

        let panel = oled.release();
        for (page, row) in panel.ram.iter().enumerate() {
            assert_eq!(&row[..], &data[page * 128..(page + 1) * 128]);
        }
    }

    #[test]
    fn bitmap_bounds_and_length_are_checked() {
        let mut oled = ready_default();

        assert_eq!(oled.draw_bitmap(8, 0, 4, 8, &[0; 8]), Err(OledError::InvalidBitmap));
        assert_eq!(oled.draw_bitmap(0, 0, 129, 8, &[0; 129]), Err(OledError::InvalidBitmap));
        assert_eq!(oled.draw_bitmap(0, 0, 8, 65, &[0; 72]), Err(OledError::InvalidBitmap));
        assert_eq!(oled.draw_bitmap(0, 0, 8, 16, &[0; 15]), Err(OledError::InvalidBitmap));
        assert!(oled.release().commands.is_empty());
    }

    #[test]
    fn zero_width_bitmap_sends_nothing() {
        let mut oled = ready_default();

        oled.draw_bitmap(10, 0, 10, 8, &[]).unwrap();
        oled.draw_bitmap(10, 6, 10, 8, &[]).unwrap();

        assert_eq!(oled.release().transfers, INIT_SEQUENCE.len());
    }

    #[test]
    fn bitmap_starting_below_its_bottom_edge_is_rejected() {
        let mut oled = ready_default();

        // Page 5 starts at pixel row 40, below pixel edge 8.
        assert_eq!(oled.draw_bitmap(0, 5, 8, 8, &[0; 8]), Err(OledError::InvalidBitmap));
        assert_eq!(oled.draw_bitmap(0, 3, 8, 24, &[0; 8]), Err(OledError::InvalidBitmap));
        assert_eq!(oled.draw_bitmap(0, 0, 8, 0, &[]), Err(OledError::InvalidBitmap));
        assert_eq!(oled.release().transfers, INIT_SEQUENCE.len());
    }

    // ── Bus failures ────────────────────────────────────────────────────

    #[test]
    fn bus_error_stops_positioning() {
        let expectations = [
            I2cTransaction::write(0x3C, vec![0x00, 0xB0]),
            I2cTransaction::write(0x3C, vec![0x00, 0x10]).with_error(ErrorKind::Other),
        ];
        let mut oled = Oled::new(I2cMock::new(&expectations), 0x3C);

        assert_eq!(oled.set_position(0, 0), Err(OledError::I2c(ErrorKind::Other)));

        oled.release().done();
    }

    #[test]
    fn bus_error_mid_glyph_is_propagated() {
        let mut oled = ready_default();
        // Positioning for the top page, then two data bytes, then a NACK.
        let panel = core::mem::replace(oled.bus_mut(), PanelModel::new());
        *oled.bus_mut() = panel.fail_on(6);

        let err = oled.draw_char(0, 0, b'A', FontSize::Large).unwrap_err();

        assert!(err.is_nack());
        let panel = oled.release();
        assert_eq!(panel.data_len(), 2);
        assert_eq!(panel.commands, [0xB0, 0x10, 0x00]);
    }
}
