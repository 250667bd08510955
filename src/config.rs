//! Driver configuration.

use crate::command::{DEFAULT_ADDRESS, INIT_SEQUENCE};
use crate::font::FontSet;

/// How display RAM bursts are split into I2C transfers.
///
/// Commands are always sent one per transfer; only data is affected. Both
/// modes leave identical contents in display RAM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferMode {
    /// One data byte per transfer (`[0x40, byte]`).
    #[default]
    PerByte,
    /// One transfer per burst (`[0x40, bytes...]`), at most one page row each.
    Burst,
}

/// Configuration for [`Oled`](crate::Oled).
///
/// [`OledConfig::default()`] matches a stock 128×64 module at address
/// `0x3C` with a 200 ms power-on settle time.
#[derive(Clone, Copy)]
pub struct OledConfig {
    /// 7-bit I2C device address. Default: `0x3C`.
    pub address: u8,
    /// Delay before the init sequence is sent, in ms. Default: 200.
    pub power_on_delay_ms: u32,
    /// Commands sent by `initialize()`. Default: [`INIT_SEQUENCE`].
    pub init_sequence: &'static [u8],
    /// Data transfer batching. Default: [`TransferMode::PerByte`].
    pub transfer: TransferMode,
    /// Glyph tables used by the text and number routines.
    pub fonts: FontSet,
    /// Byte written to every column by `all_on()`. Default: `0xFF`.
    pub lamp_pattern: u8,
}

impl Default for OledConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            power_on_delay_ms: 200,
            init_sequence: &INIT_SEQUENCE,
            transfer: TransferMode::PerByte,
            fonts: FontSet::ascii(),
            lamp_pattern: 0xFF,
        }
    }
}
