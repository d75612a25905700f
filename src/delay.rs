//! Delay providers
//!
//! Both derive their timing from the frozen [`CoreClocks`], so they must
//! only be created once the RCC has been frozen.
//!
//! # Examples
//!
//! ## Delay
//!
//! ```ignore
//! let mut delay = Delay::new(core.SYST, &clocks);
//!
//! delay.delay_ms(500);
//!
//! // Release SYST from the delay
//! let syst = delay.free();
//! ```
//!
//! ## Periodic SysTick
//!
//! ```ignore
//! let reload = systick_reload(&clocks, 1.kHz()).unwrap();
//! syst.set_reload(reload);
//! ```

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use embedded_hal::delay::DelayNs;
use fugit::SecsDurationU64;

use crate::rcc::CoreClocks;
use crate::time::Hertz;

const SYSTICK_HCLK_DIV: u32 = 8;

/// The SysTick Reload Value register supports values between 1 and 0x00FFFFFF.
const MAX_RVR: u32 = 0x00FF_FFFF;

pub trait DelayExt {
    fn delay(self, clocks: &CoreClocks) -> Delay;
}

impl DelayExt for SYST {
    fn delay(self, clocks: &CoreClocks) -> Delay {
        Delay::new(self, clocks)
    }
}

/// System timer (SysTick) as a delay provider
pub struct Delay {
    hclk_hz: u32,
    syst: SYST,
}

/// SysTick counts needed to cover `ns` with HCLK at `hclk` Hz
fn calc_rvr(ns: u32, hclk: u32) -> u32 {
    let systick_hz = u64::from(hclk / SYSTICK_HCLK_DIV);
    let ns_per_sec = SecsDurationU64::secs(1).to_nanos();
    // At most 4.29 s of 9 MHz counts, always fits
    (u64::from(ns) * systick_hz / ns_per_sec) as u32
}

/// Reload value making SysTick, fed by HCLK/8, wrap at `tick`
///
/// Returns `None` if `tick` is zero or the period does not fit the 24-bit
/// reload register.
pub fn systick_reload(clocks: &CoreClocks, tick: Hertz) -> Option<u32> {
    crate::timer::reload_value(clocks.hclk(), SYSTICK_HCLK_DIV, tick)
        .ok()
        .map(|count| count - 1)
        .filter(|rvr| (1..=MAX_RVR).contains(rvr))
}

impl Delay {
    /// Configures the system timer (SysTick) as a delay provider
    pub fn new(mut syst: SYST, clocks: &CoreClocks) -> Self {
        syst.set_clock_source(SystClkSource::External);

        Delay {
            hclk_hz: clocks.hclk().raw(),
            syst,
        }
    }

    /// Releases the system timer (SysTick) resource
    pub fn free(self) -> SYST {
        self.syst
    }
}

impl Delay {
    /// Count `rvr` SysTick ticks, `rvr` no larger than the 24-bit reload
    fn wait_counts(&mut self, rvr: u32) {
        self.syst.set_reload(rvr);
        self.syst.clear_current();
        self.syst.enable_counter();
        while !self.syst.has_wrapped() {}
        self.syst.disable_counter();
    }
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        let mut remaining = calc_rvr(ns, self.hclk_hz);

        // Delays longer than one reload period are split
        while remaining != 0 {
            let chunk = remaining.min(MAX_RVR);
            self.wait_counts(chunk);
            remaining -= chunk;
        }
    }
}
