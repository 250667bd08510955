//! Low-level register bus for the SSD1306.
//!
//! Every byte reaches the controller as an I2C write of
//! `[control, payload...]` to the device address, where the control byte is
//! [`COMMAND_REGISTER`] or [`DATA_REGISTER`].
//!
//! This module is crate-private. Consumers interact with
//! [`Oled`](crate::Oled) instead.

use embedded_hal::i2c::I2c;

use crate::command::{COLUMNS, COMMAND_REGISTER, DATA_REGISTER};
use crate::config::TransferMode;
use crate::error::OledError;

/// Largest data payload of a single burst transfer: one full page row.
const MAX_BURST: usize = COLUMNS as usize;

/// Register-addressed I2C writer.
///
/// Owns the I2C peripheral, so nothing else can move the panel's cursor
/// between a positioning command and the data that follows it.
pub(crate) struct RegisterBus<I2C> {
    i2c: I2C,
    address: u8,
    transfer: TransferMode,
}

impl<I2C> RegisterBus<I2C>
where
    I2C: I2c,
{
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access)
    /// * `address` — 7-bit I2C device address (typically 0x3C)
    /// * `transfer` — how data bursts are split into transfers
    pub fn new(i2c: I2C, address: u8, transfer: TransferMode) -> Self {
        Self {
            i2c,
            address,
            transfer,
        }
    }

    /// Give the I2C peripheral back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    #[cfg(test)]
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    // -----------------------------------------------------------------------
    // Single-byte primitives
    // -----------------------------------------------------------------------

    /// Write one byte behind a control byte in a single transfer.
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), OledError<I2C::Error>> {
        self.i2c.write(self.address, &[register, value])?;
        Ok(())
    }

    /// Send one opcode.
    pub fn command(&mut self, command: u8) -> Result<(), OledError<I2C::Error>> {
        self.write_register(COMMAND_REGISTER, command)
    }

    /// Send a list of opcodes, one transfer each, stopping at the first failure.
    pub fn commands(&mut self, commands: &[u8]) -> Result<(), OledError<I2C::Error>> {
        for &command in commands {
            self.command(command)?;
        }
        Ok(())
    }

    /// Write one byte of display RAM at the cursor.
    pub fn data(&mut self, byte: u8) -> Result<(), OledError<I2C::Error>> {
        self.write_register(DATA_REGISTER, byte)
    }

    // -----------------------------------------------------------------------
    // Bursts
    // -----------------------------------------------------------------------

    /// Write consecutive display RAM bytes starting at the cursor.
    ///
    /// In [`TransferMode::PerByte`] every byte is its own transfer. In
    /// [`TransferMode::Burst`] up to one page row travels per transfer.
    pub fn data_burst(&mut self, bytes: &[u8]) -> Result<(), OledError<I2C::Error>> {
        match self.transfer {
            TransferMode::PerByte => {
                for &byte in bytes {
                    self.data(byte)?;
                }
            }
            TransferMode::Burst => {
                let mut frame = [0u8; MAX_BURST + 1];
                frame[0] = DATA_REGISTER;
                for chunk in bytes.chunks(MAX_BURST) {
                    frame[1..=chunk.len()].copy_from_slice(chunk);
                    self.i2c.write(self.address, &frame[..=chunk.len()])?;
                }
            }
        }
        Ok(())
    }

    /// Write `count` copies of `byte` starting at the cursor.
    pub fn fill(&mut self, byte: u8, count: usize) -> Result<(), OledError<I2C::Error>> {
        let row = [byte; MAX_BURST];
        let mut remaining = count;
        while remaining > 0 {
            let n = remaining.min(MAX_BURST);
            self.data_burst(&row[..n])?;
            remaining -= n;
        }
        Ok(())
    }
}
