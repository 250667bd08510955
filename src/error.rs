//! Error types for the OLED driver.

use core::fmt;

use embedded_hal::i2c::ErrorKind;

/// Errors that can occur while driving the panel.
///
/// Generic over the bus error `E`. Every variant other than [`OledError::I2c`]
/// is raised before the failing operation puts anything on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OledError<E> {
    /// Underlying I2C bus error (NACK, arbitration loss, timeout, ...).
    I2c(E),

    /// A drawing operation was attempted before
    /// [`Oled::initialize()`](crate::Oled::initialize) succeeded.
    NotInitialized,

    /// Cursor target outside the panel (column 0–127, page 0–7).
    InvalidPosition {
        /// Requested column.
        column: u8,
        /// Requested page.
        page: u8,
    },

    /// Character code has no glyph in the active ASCII table.
    UnsupportedCharacter(u8),

    /// Wide glyph index beyond the supplied wide-glyph table.
    GlyphOutOfRange(u8),

    /// Value needs more digits than the requested cell count.
    NumberOverflow,

    /// Bitmap bounds exceed the panel or `data` is too short for them.
    InvalidBitmap,
}

// Allow ergonomic `?` propagation from raw I2C errors.
impl<E> From<E> for OledError<E> {
    fn from(error: E) -> Self {
        OledError::I2c(error)
    }
}

impl<E: embedded_hal::i2c::Error> OledError<E> {
    /// `true` if the bus reported that the panel did not acknowledge.
    pub fn is_nack(&self) -> bool {
        match self {
            OledError::I2c(e) => matches!(e.kind(), ErrorKind::NoAcknowledge(_)),
            _ => false,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for OledError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OledError::I2c(e) => write!(f, "I2C error: {:?}", e),
            OledError::NotInitialized => write!(f, "Display not initialized"),
            OledError::InvalidPosition { column, page } => {
                write!(f, "Position out of range (column {}, page {})", column, page)
            }
            OledError::UnsupportedCharacter(c) => write!(f, "No glyph for character 0x{:02X}", c),
            OledError::GlyphOutOfRange(i) => write!(f, "Wide glyph index {} out of range", i),
            OledError::NumberOverflow => write!(f, "Number does not fit in digit count"),
            OledError::InvalidBitmap => write!(f, "Bitmap bounds or data length invalid"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for OledError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::I2c(e) => defmt::write!(f, "I2C error: {}", e),
            OledError::NotInitialized => defmt::write!(f, "Not initialized"),
            OledError::InvalidPosition { column, page } => {
                defmt::write!(f, "Invalid position (column {}, page {})", column, page)
            }
            OledError::UnsupportedCharacter(c) => defmt::write!(f, "Unsupported character {=u8:#x}", c),
            OledError::GlyphOutOfRange(i) => defmt::write!(f, "Wide glyph {} out of range", i),
            OledError::NumberOverflow => defmt::write!(f, "Number overflow"),
            OledError::InvalidBitmap => defmt::write!(f, "Invalid bitmap"),
        }
    }
}
