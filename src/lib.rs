//! Blocking driver for SSD1306 (128×64) OLED panels over I2C.
//!
//! This crate provides [`Oled`], which talks to the controller in page
//! addressing mode through any [`embedded_hal::i2c::I2c`] bus. It owns the
//! command protocol (init sequence, cursor commands, panel power) and renders
//! text, numbers, wide glyphs and bitmaps by streaming glyph bytes straight
//! into display RAM. There is no frame buffer.
//!
//! # Quick Start
//!
//! ```ignore
//! use pageoled::{FontSize, Oled};
//!
//! let mut oled = Oled::new(i2c, 0x3C);
//! oled.initialize(&mut delay)?;
//! oled.clear()?;
//!
//! oled.draw_str(0, 0, "Temp", FontSize::Large)?;
//! oled.draw_number(48, 0, 21, 3, FontSize::Large)?;
//! oled.draw_bitmap(0, 4, 32, 64, &LOGO)?;
//! ```
//!
//! # Crate Features
//!
//! - **`shared`** *(default)* — `SharedOled`, a lock-protected handle built on
//!   `embassy-sync`.
//! - **`defmt`** — structured logging via `defmt`.

#![no_std]

pub mod command;
pub mod config;
pub mod display;
mod driver;
pub mod error;
pub mod font;
#[cfg(feature = "shared")]
pub mod shared;

#[cfg(test)]
mod panel_model;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use command::{DEFAULT_ADDRESS, INIT_SEQUENCE};
pub use config::{OledConfig, TransferMode};
pub use display::{Oled, MAX_NUMBER_DIGITS};
pub use error::OledError;
pub use font::{FontSet, FontSize};
#[cfg(feature = "shared")]
pub use shared::SharedOled;
