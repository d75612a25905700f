//! Timing parameters that follow from the SYSCLK frequency

use super::regs::cfgr;
use super::{ClockRequest, Error};
use crate::time::Hertz;

/// SYSCLK from which one flash wait state is needed
const ONE_WAIT_STATE_FROM_HZ: u32 = 24_000_000;
/// SYSCLK from which two flash wait states are needed
const TWO_WAIT_STATES_FROM_HZ: u32 = 48_000_000;
/// Highest frequency APB1 may run at
pub const MAX_PCLK1_FREQ_HZ: u32 = 36_000_000;

/// Flash wait states, RM0008 section 3.3.3
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashLatency {
    /// SYSCLK below 24 MHz
    WS0,
    /// 24 MHz up to, but not including, 48 MHz
    WS1,
    /// 48 MHz and above
    WS2,
}

impl FlashLatency {
    /// Wait states needed at `sys_ck` Hz
    pub const fn for_sysclk(sys_ck: u32) -> Self {
        if sys_ck >= TWO_WAIT_STATES_FROM_HZ {
            FlashLatency::WS2
        } else if sys_ck >= ONE_WAIT_STATE_FROM_HZ {
            FlashLatency::WS1
        } else {
            FlashLatency::WS0
        }
    }

    /// Number of wait states
    pub const fn wait_states(self) -> u8 {
        self as u8
    }

    /// LATENCY field value
    pub(super) const fn bits(self) -> u32 {
        self as u32
    }
}

/// APB1 prescaler, RM0008 section 7.3.2
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ApbPrescaler {
    /// HCLK not divided
    Div1,
    /// HCLK divided by 2
    Div2,
}

impl ApbPrescaler {
    /// Prescaler keeping APB1 within 36 MHz at `sys_ck` Hz
    pub const fn for_sysclk(sys_ck: u32) -> Self {
        if sys_ck > MAX_PCLK1_FREQ_HZ {
            ApbPrescaler::Div2
        } else {
            ApbPrescaler::Div1
        }
    }

    /// Division factor
    pub const fn divisor(self) -> u8 {
        match self {
            ApbPrescaler::Div1 => 1,
            ApbPrescaler::Div2 => 2,
        }
    }

    /// PPRE1 field value, in place
    pub(super) const fn bits(self) -> u32 {
        match self {
            ApbPrescaler::Div1 => 0b000 << cfgr::PPRE1_SHIFT,
            ApbPrescaler::Div2 => 0b100 << cfgr::PPRE1_SHIFT,
        }
    }
}

/// Values derived from a SYSCLK frequency. Computed, never stored in
/// hardware as such.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DerivedTiming {
    sys_ck: u32,
    flash_latency: FlashLatency,
    ppre1: ApbPrescaler,
}

impl DerivedTiming {
    /// Timing for an already validated SYSCLK frequency
    pub const fn for_sysclk(sys_ck: u32) -> Self {
        Self {
            sys_ck,
            flash_latency: FlashLatency::for_sysclk(sys_ck),
            ppre1: ApbPrescaler::for_sysclk(sys_ck),
        }
    }

    /// Validate `request` against an HSE crystal of `hse` Hz and derive
    /// its timing. No hardware is touched.
    pub fn for_request(request: ClockRequest, hse: u32) -> Result<Self, Error> {
        request.sysclk(hse).map(Self::for_sysclk)
    }

    /// Achieved SYSCLK
    pub fn sys_ck(&self) -> Hertz {
        Hertz::from_raw(self.sys_ck)
    }

    /// Flash wait states
    pub fn flash_latency(&self) -> FlashLatency {
        self.flash_latency
    }

    /// APB1 prescaler
    pub fn apb1_prescaler(&self) -> ApbPrescaler {
        self.ppre1
    }

    /// Whether the APB1 prescaler has to divide
    pub fn apb1_prescaled(&self) -> bool {
        self.ppre1 == ApbPrescaler::Div2
    }
}
