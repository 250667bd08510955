//! Lock-protected driver handle.
//!
//! [`SharedOled`] lets several execution contexts (main loop, interrupt
//! handlers) draw on one panel. Each [`lock()`](SharedOled::lock) call holds
//! the mutex for the whole closure, so a positioning command and the data
//! that follows it can never be interleaved with another context's traffic.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;

use crate::display::Oled;

/// An [`Oled`] behind an `embassy-sync` blocking mutex.
///
/// Choose `M` for the contexts involved:
/// `CriticalSectionRawMutex` when interrupts draw too,
/// `NoopRawMutex` when everything runs in one thread.
///
/// ```ignore
/// use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
/// use pageoled::{FontSize, Oled, SharedOled};
///
/// static OLED: StaticCell<SharedOled<CriticalSectionRawMutex, MyI2c>> = StaticCell::new();
///
/// let oled = OLED.init(SharedOled::new(Oled::new(i2c, 0x3C)));
/// oled.lock(|o| o.draw_str(0, 0, "ready", FontSize::Small))?;
/// ```
pub struct SharedOled<M: RawMutex, I2C> {
    inner: Mutex<M, RefCell<Oled<I2C>>>,
}

impl<M: RawMutex, I2C> SharedOled<M, I2C> {
    pub const fn new(oled: Oled<I2C>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(oled)),
        }
    }

    /// Run `f` with exclusive access to the driver.
    ///
    /// Calls must not nest: re-entering `lock()` from inside `f` panics.
    pub fn lock<R>(&self, f: impl FnOnce(&mut Oled<I2C>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn into_inner(self) -> Oled<I2C> {
        self.inner.into_inner().into_inner()
    }
}
