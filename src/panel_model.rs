//! Test double for the panel.
//!
//! [`PanelModel`] implements `embedded_hal::i2c::I2c` and interprets every
//! transfer the way the controller does in page addressing mode: command
//! bytes move the cursor, data bytes land in an 8 × 128 RAM image and
//! advance the column (wrapping within the page).

extern crate std;

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

use crate::command::{COMMAND_REGISTER, DATA_REGISTER};

/// Ordered record shared between a [`PanelModel`] and a [`RecordingDelay`].
pub type Timeline = Rc<RefCell<Vec<Step>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    DelayMs(u32),
    Transfer,
}

/// Consecutive data bytes written after the last command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Burst {
    pub page: u8,
    pub column: u8,
    pub bytes: Vec<u8>,
}

pub struct PanelModel {
    pub ram: [[u8; 128]; 8],
    pub commands: Vec<u8>,
    pub bursts: Vec<Burst>,
    pub addresses: Vec<u8>,
    /// Number of transfers attempted, failed ones included.
    pub transfers: usize,
    page: u8,
    column: u8,
    pending_args: u8,
    burst_open: bool,
    fail_on: Option<usize>,
    timeline: Option<Timeline>,
}

impl PanelModel {
    pub fn new() -> Self {
        Self {
            ram: [[0; 128]; 8],
            commands: Vec::new(),
            bursts: Vec::new(),
            addresses: Vec::new(),
            transfers: 0,
            page: 0,
            column: 0,
            pending_args: 0,
            burst_open: false,
            fail_on: None,
            timeline: None,
        }
    }

    /// Start with every RAM byte set to `byte`.
    pub fn with_ram(byte: u8) -> Self {
        Self {
            ram: [[byte; 128]; 8],
            ..Self::new()
        }
    }

    /// NACK the `n`-th transfer (1-based, counted from now).
    pub fn fail_on(mut self, n: usize) -> Self {
        self.fail_on = Some(self.transfers + n);
        self
    }

    pub fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = Some(timeline);
        self
    }

    /// Forget everything recorded so far; RAM and cursor are kept.
    pub fn clear_log(&mut self) {
        self.commands.clear();
        self.bursts.clear();
        self.addresses.clear();
        self.burst_open = false;
    }

    /// Total data bytes written since the last `clear_log`.
    pub fn data_len(&self) -> usize {
        self.bursts.iter().map(|b| b.bytes.len()).sum()
    }

    fn command(&mut self, command: u8) {
        self.commands.push(command);
        self.burst_open = false;

        if self.pending_args > 0 {
            self.pending_args -= 1;
            return;
        }
        match command {
            0x00..=0x0F => self.column = (self.column & 0xF0) | command,
            0x10..=0x1F => self.column = (self.column & 0x0F) | ((command & 0x0F) << 4),
            0xB0..=0xB7 => self.page = command - 0xB0,
            0x81 | 0x8D | 0xA8 | 0xD3 | 0xD5 | 0xD8 | 0xD9 | 0xDA | 0xDB => self.pending_args = 1,
            _ => {}
        }
    }

    fn data(&mut self, byte: u8) {
        if !self.burst_open {
            self.bursts.push(Burst {
                page: self.page,
                column: self.column,
                bytes: Vec::new(),
            });
            self.burst_open = true;
        }
        if let Some(burst) = self.bursts.last_mut() {
            burst.bytes.push(byte);
        }
        self.ram[usize::from(self.page)][usize::from(self.column & 0x7F)] = byte;
        self.column = ((self.column & 0x7F) + 1) & 0x7F;
    }
}

impl ErrorType for PanelModel {
    type Error = ErrorKind;
}

impl I2c for PanelModel {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.transfers += 1;
        if let Some(timeline) = &self.timeline {
            timeline.borrow_mut().push(Step::Transfer);
        }
        if self.fail_on == Some(self.transfers) {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data));
        }
        self.addresses.push(address);

        for op in operations.iter() {
            let Operation::Write(bytes) = op else {
                return Err(ErrorKind::Other);
            };
            match bytes.split_first() {
                Some((&COMMAND_REGISTER, payload)) => payload.iter().for_each(|&c| self.command(c)),
                Some((&DATA_REGISTER, payload)) => payload.iter().for_each(|&d| self.data(d)),
                _ => return Err(ErrorKind::Other),
            }
        }
        Ok(())
    }
}

/// Delay that records requested millisecond waits instead of sleeping.
#[derive(Default)]
pub struct RecordingDelay {
    pub ms: Vec<u32>,
    timeline: Option<Timeline>,
}

impl RecordingDelay {
    pub fn with_timeline(timeline: Timeline) -> Self {
        Self {
            ms: Vec::new(),
            timeline: Some(timeline),
        }
    }
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.ms.push(ms);
        if let Some(timeline) = &self.timeline {
            timeline.borrow_mut().push(Step::DelayMs(ms));
        }
    }
}
