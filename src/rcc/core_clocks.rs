//! Structure to represent frozen core clock frequencies

use super::timing::{DerivedTiming, FlashLatency};
use super::{ClockRequest, HSI};
use crate::time::Hertz;

/// Frozen core clock frequencies
///
/// The existence of this value indicates that the core clock
/// configuration can no longer be changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoreClocks {
    pub(super) hclk: Hertz,
    pub(super) pclk1: Hertz,
    pub(super) pclk2: Hertz,
    pub(super) ppre1: u8,
    pub(super) ppre2: u8,
    pub(super) hsi_ck: Option<Hertz>,
    pub(super) hse_ck: Option<Hertz>,
    pub(super) pll_ck: Option<Hertz>,
    pub(super) timx_ker_ck: Hertz,
    pub(super) timy_ker_ck: Hertz,
    pub(super) flash_latency: FlashLatency,
    pub(super) sys_ck: Hertz,
}

impl CoreClocks {
    /// Clocks resulting from applying `request`, whose timing is `timing`,
    /// with an HSE crystal of `hse` Hz
    pub(super) fn new(
        request: ClockRequest,
        timing: &DerivedTiming,
        hse: u32,
    ) -> Self {
        let sys_ck = timing.sys_ck();
        // No AHB prescaler is used
        let hclk = sys_ck;

        let ppre1 = timing.apb1_prescaler().divisor();
        let pclk1 = hclk / u32::from(ppre1);
        let ppre2 = 1;
        let pclk2 = hclk;

        // Timers on a divided APB run at twice the bus clock
        let timx_ker_ck = if ppre1 == 1 { pclk1 } else { pclk1 * 2 };
        let timy_ker_ck = pclk2;

        CoreClocks {
            hclk,
            pclk1,
            pclk2,
            ppre1,
            ppre2,
            // HSI is left running after a switch away from it
            hsi_ck: Some(Hertz::from_raw(HSI)),
            hse_ck: request
                .source()
                .uses_hse()
                .then(|| Hertz::from_raw(hse)),
            pll_ck: request.uses_pll().then_some(sys_ck),
            timx_ker_ck,
            timy_ker_ck,
            flash_latency: timing.flash_latency(),
            sys_ck,
        }
    }
}

/// Getters for pclk and ppre
macro_rules! pclk_ppre_getter {
    ($(($pclk:ident, $ppre:ident),)+) => {
        $(
            /// Returns the frequency of the APBn
            pub fn $pclk(&self) -> Hertz {
                self.$pclk
            }
            /// Returns the prescaler of the APBn
            pub fn $ppre(&self) -> u8 {
                self.$ppre
            }
        )+
    };
}

/// Getters for optional clocks
macro_rules! optional_ck_getter {
    ($($opt_ck:ident: $doc:expr,)+) => {
        $(
            /// Returns `Some(frequency)` if
            #[doc=$doc]
            /// is running, otherwise `None`
            pub fn $opt_ck(&self) -> Option<Hertz> {
                self.$opt_ck
            }
        )+
    };
}

impl CoreClocks {
    /// Returns the frequency of the AHB
    pub fn hclk(&self) -> Hertz {
        self.hclk
    }

    pclk_ppre_getter! {
        (pclk1, ppre1),
        (pclk2, ppre2),
    }

    optional_ck_getter! {
        hsi_ck: "hsi_ck",
        hse_ck: "hse_ck",
        pll_ck: "pll_ck",
    }

    /// Returns the system clock frequency
    pub fn sys_ck(&self) -> Hertz {
        self.sys_ck
    }

    /// Returns the system clock frequency - ALIAS
    pub fn sysclk(&self) -> Hertz {
        self.sys_ck
    }

    /// Returns the CK_INT frequency for timers on APB1
    pub fn timx_ker_ck(&self) -> Hertz {
        self.timx_ker_ck
    }

    /// Returns the CK_INT frequency for timers on APB2
    pub fn timy_ker_ck(&self) -> Hertz {
        self.timy_ker_ck
    }

    /// Returns the flash wait states programmed for `sys_ck`
    pub fn flash_latency(&self) -> FlashLatency {
        self.flash_latency
    }
}
