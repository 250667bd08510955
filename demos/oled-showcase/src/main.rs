//! Showcase example
//!
//! Standalone hardware demonstration that exercises every [`Oled`] operation
//! on a 128×64 SSD1306 module: lamp test, text in both sizes, a wide glyph,
//! a right-aligned counter, a bitmap, and a panel power cycle.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes           |
//! |-----------|------------|-----------------|
//! | I2C0 SDA  | GP20       |                 |
//! | I2C0 SCL  | GP21       |                 |
//! | OLED VCC  | 3V3        |                 |
//! | OLED GND  | GND        |                 |
//!
//! # Screen Layout
//!
//! | Pages | Content                                  |
//! |-------|------------------------------------------|
//! | 0–1   | `"pageoled"` in 8×16                     |
//! | 2     | `"counter:"` in 6×8, then the counter    |
//! | 4–5   | wide glyph 0 at column 0                 |
//! | 4–7   | 32×32 checkerboard at columns 96–127     |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp as hal;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use pageoled::{FontSet, FontSize, Oled, OledConfig, TransferMode};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = hal::block::ImageDef::secure_exe();

/// One 16×16 framed box: top half, then bottom half.
static WIDE_GLYPHS: [[u8; 16]; 2] = [
    [0xFF, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0xFF],
    [0xFF, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0xFF],
];

const CHECKER_SIDE: usize = 32;

/// 32×32 checkerboard of 4×4 squares, page-major.
static CHECKER: [u8; CHECKER_SIDE * CHECKER_SIDE / 8] = checker();

const fn checker() -> [u8; CHECKER_SIDE * CHECKER_SIDE / 8] {
    let mut out = [0u8; CHECKER_SIDE * CHECKER_SIDE / 8];
    let mut i = 0;
    while i < out.len() {
        let column = i % CHECKER_SIDE;
        out[i] = if (column / 4) % 2 == 0 { 0x0F } else { 0xF0 };
        i += 1;
    }
    out
}

// ---------------------------------------------------------------------------
// Hardware pin assignments — change here for hardware revisions
// I2C bus is used exclusively by the OLED display in this example
// ---------------------------------------------------------------------------
// I2C_SDA → GP20  (p.PIN_20)
// I2C_SCL → GP21  (p.PIN_21)
// ---------------------------------------------------------------------------

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("OLED showcase starting");

    let i2c = I2c::new_blocking(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        i2c::Config::default(),
    );

    let config = OledConfig {
        transfer: TransferMode::Burst,
        fonts: FontSet::ascii().with_wide(&WIDE_GLYPHS),
        ..OledConfig::default()
    };
    let mut oled = Oled::with_config(i2c, config);

    oled.initialize(&mut Delay).expect("OLED init failed");

    // Lamp test, then a blank screen.
    oled.all_on().expect("lamp test failed");
    Timer::after(Duration::from_millis(500)).await;
    oled.clear().expect("clear failed");

    oled.draw_str(0, 0, "pageoled", FontSize::Large).ok();
    oled.draw_str(0, 2, "counter:", FontSize::Small).ok();
    oled.draw_wide_glyph(0, 4, 0).ok();
    oled.draw_char(24, 4, b'*', FontSize::Large).ok();
    oled.draw_bitmap(96, 4, 128, 64, &CHECKER).ok();

    // Raw primitives: a short dotted rule on page 7.
    if oled.set_position(0, 7).is_ok() {
        for _ in 0..16 {
            oled.write_data(0x80).ok();
            oled.write_data(0x00).ok();
        }
    }

    let mut counter: u32 = 0;
    loop {
        if let Err(e) = oled.draw_number(72, 2, counter, 5, FontSize::Small) {
            error!("draw_number failed: {}", e);
        }

        counter = (counter + 1) % 100_000;

        // Blink the panel every 500 counts; RAM survives the power cycle.
        if counter % 500 == 0 {
            oled.display_off().ok();
            Timer::after(Duration::from_millis(250)).await;
            oled.display_on().ok();
        }

        Timer::after(Duration::from_millis(100)).await;
    }
}
