//! Timer reload values
//!
//! Periodic timers count a divided copy of their kernel clock and wrap
//! at a reload value:
//!
//! ```text
//! reload = kernel_clock / divider / tick
//! ```
//!
//! The kernel clock depends on the frozen [`CoreClocks`]: timers on a
//! divided APB bus run at twice the bus frequency.

use core::fmt::Display;

use crate::rcc::CoreClocks;
use crate::time::Hertz;

/// Reload computation error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Divider or tick rate of zero
    Zero,
    /// The tick is faster than the divided clock
    TooFast,
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl core::error::Error for Error {}

/// General purpose and advanced timers of the STM32F103
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Timer {
    /// Advanced-control, on APB2
    Tim1,
    /// General-purpose, on APB1
    Tim2,
    /// General-purpose, on APB1
    Tim3,
    /// General-purpose, on APB1
    Tim4,
}

impl Timer {
    /// CK_INT of this timer
    pub fn kernel_clk(self, clocks: &CoreClocks) -> Hertz {
        match self {
            Timer::Tim1 => clocks.timy_ker_ck(),
            Timer::Tim2 | Timer::Tim3 | Timer::Tim4 => clocks.timx_ker_ck(),
        }
    }

    /// PSC and ARR values making this timer overflow at `timeout`
    pub fn periodic(
        self,
        clocks: &CoreClocks,
        timeout: Hertz,
    ) -> Result<(u16, u16), Error> {
        let ticks = reload_value(self.kernel_clk(clocks), 1, timeout)?;
        Ok(calculate_timeout_ticks_register_values(ticks))
    }
}

/// Number of `clock / divider` cycles in one period of `tick`
pub fn reload_value(
    clock: Hertz,
    divider: u32,
    tick: Hertz,
) -> Result<u32, Error> {
    if divider == 0 || tick.raw() == 0 {
        return Err(Error::Zero);
    }
    match clock.raw() / divider / tick.raw() {
        0 => Err(Error::TooFast),
        reload => Ok(reload),
    }
}

/// Split `ticks` into a 16-bit prescaler and auto-reload value
fn calculate_timeout_ticks_register_values(ticks: u32) -> (u16, u16) {
    // Shifting a 32-bit value right by 16 bits always fits in 16 bits
    let psc = (ticks >> 16) as u16;
    // The divisor is always such that the result fits in 16 bits. The
    // timer counts `0..=arr`, so subtract 1 to get the correct period.
    let arr = (ticks / (u32::from(psc) + 1)).min(u32::from(u16::MAX)) as u16;
    (psc, arr.saturating_sub(1))
}
