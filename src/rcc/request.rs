//! Clock source selection and PLL multiplier
//!
//! A [`ClockRequest`] names where SYSCLK comes from. Only the HSI may
//! drive SYSCLK directly; every other source goes through the PLL with a
//! multiplier in `2..=16`:
//!
//! ```text
//!   HSI ---------------------------------------------> SYSCLK (SW = HSI)
//!   HSI/2 ---\
//!   HSE -----+--> PLLSRC/PLLXTPRE --> x PLLMUL ------> SYSCLK (SW = PLL)
//!   HSE/2 ---/
//! ```
//!
//! The same request can also be written as a packed RCC_CFGR word
//! holding the PLLSRC, PLLXTPRE, PLLMUL and SW fields, see
//! [`ClockRequest::bits`] and [`ClockRequest::from_bits`].

use super::regs::cfgr;
use super::{Error, HSI, MAX_SYSCLK_FREQ_HZ};

/// Smallest PLL multiplication factor
pub const PLL_MUL_MIN: u8 = 2;
/// Largest PLL multiplication factor
pub const PLL_MUL_MAX: u8 = 16;

/// Oscillator feeding SYSCLK, directly or through the PLL
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockSource {
    /// Internal 8 MHz RC oscillator, driving SYSCLK directly
    Hsi,
    /// Internal oscillator halved, as PLL input
    HsiDiv2,
    /// External crystal, as PLL input
    Hse,
    /// External crystal halved, as PLL input
    HseDiv2,
}

impl ClockSource {
    /// Nominal frequency presented by this source, in Hz, given the HSE
    /// crystal frequency `hse`
    pub const fn input_freq(self, hse: u32) -> u32 {
        match self {
            ClockSource::Hsi => HSI,
            ClockSource::HsiDiv2 => HSI / 2,
            ClockSource::Hse => hse,
            ClockSource::HseDiv2 => hse / 2,
        }
    }

    /// Whether the external oscillator has to be started
    pub const fn uses_hse(self) -> bool {
        matches!(self, ClockSource::Hse | ClockSource::HseDiv2)
    }
}

/// A requested SYSCLK configuration
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockRequest {
    source: ClockSource,
    multiplier: u8,
}

impl Default for ClockRequest {
    fn default() -> Self {
        Self::hsi()
    }
}

impl ClockRequest {
    /// Request `source` with PLL factor `multiplier`. A multiplier of 1
    /// means the source drives SYSCLK without the PLL.
    ///
    /// Nothing is checked here; an impossible combination is rejected
    /// when the request is evaluated.
    pub const fn new(source: ClockSource, multiplier: u8) -> Self {
        Self { source, multiplier }
    }

    /// SYSCLK straight from the HSI, PLL unused
    pub const fn hsi() -> Self {
        Self::new(ClockSource::Hsi, 1)
    }

    /// SYSCLK from the PLL, fed by `source`
    pub const fn pll(source: ClockSource, multiplier: u8) -> Self {
        Self::new(source, multiplier)
    }

    /// Selected source
    pub const fn source(&self) -> ClockSource {
        self.source
    }

    /// PLL multiplication factor, 1 when the PLL is bypassed
    pub const fn multiplier(&self) -> u8 {
        self.multiplier
    }

    /// Whether SYSCLK is taken from the PLL output
    pub const fn uses_pll(&self) -> bool {
        !matches!(self.source, ClockSource::Hsi)
    }

    /// Check the source / multiplier combination, without regard to the
    /// resulting frequency
    fn check_shape(&self) -> Result<(), Error> {
        match (self.source, self.multiplier) {
            (ClockSource::Hsi, 1) => Ok(()),
            // HSI only reaches the PLL through the fixed /2
            (ClockSource::Hsi, _) => Err(Error::InvalidConfiguration),
            (_, m) if (PLL_MUL_MIN..=PLL_MUL_MAX).contains(&m) => Ok(()),
            _ => Err(Error::InvalidConfiguration),
        }
    }

    /// SYSCLK frequency in Hz this request produces with an HSE crystal
    /// of `hse` Hz.
    ///
    /// Fails with [`Error::InvalidConfiguration`] if the multiplier is out
    /// of range, if a PLL-only source is asked to bypass the PLL, or if
    /// the result exceeds the 72 MHz ceiling.
    pub fn sysclk(&self, hse: u32) -> Result<u32, Error> {
        self.check_shape()?;

        let input = self.source.input_freq(hse);
        let freq = if self.uses_pll() {
            input
                .checked_mul(u32::from(self.multiplier))
                .ok_or(Error::InvalidConfiguration)?
        } else {
            input
        };

        if freq > MAX_SYSCLK_FREQ_HZ {
            return Err(Error::InvalidConfiguration);
        }
        Ok(freq)
    }

    /// PLLSRC, PLLXTPRE and PLLMUL field values. Zero when the PLL is
    /// bypassed.
    pub(super) fn pll_bits(&self) -> u32 {
        let (pllsrc, pllxtpre) = match self.source {
            ClockSource::Hsi => return 0,
            ClockSource::HsiDiv2 => (0, 0),
            ClockSource::Hse => (cfgr::PLLSRC, 0),
            ClockSource::HseDiv2 => (cfgr::PLLSRC, cfgr::PLLXTPRE),
        };
        // PLLMUL = 0b0000 is x2
        let pllmul = u32::from(self.multiplier.saturating_sub(PLL_MUL_MIN))
            << cfgr::PLLMUL_SHIFT;
        pllsrc | pllxtpre | (pllmul & cfgr::PLLMUL_MASK)
    }

    /// SW field value
    pub(super) fn sw_bits(&self) -> u32 {
        if self.uses_pll() {
            cfgr::SW_PLL
        } else {
            cfgr::SW_HSI
        }
    }

    /// Pack this request into RCC_CFGR layout (PLLSRC, PLLXTPRE, PLLMUL
    /// and SW)
    pub fn bits(&self) -> Result<u32, Error> {
        self.check_shape()?;
        Ok(self.pll_bits() | self.sw_bits())
    }

    /// Decode a request packed in RCC_CFGR layout
    ///
    /// Any bit outside the PLLSRC, PLLXTPRE, PLLMUL and SW fields, a
    /// direct HSE switch, an HSI selection carrying PLL fields, or
    /// PLLXTPRE without PLLSRC is rejected. PLLMUL = 0b1111 reads as x16,
    /// as on the hardware.
    ///
    /// Only the encoding is checked here. The resulting frequency depends
    /// on the HSE crystal and is checked against the 72 MHz ceiling when
    /// the request is evaluated, so `HSE x16` decodes but is refused by
    /// [`sysclk`](Self::sysclk) and by `Rcc::configure`.
    pub fn from_bits(word: u32) -> Result<Self, Error> {
        if word & !(cfgr::PLL_MASK | cfgr::SW_MASK) != 0 {
            return Err(Error::InvalidConfiguration);
        }

        let request = match word & cfgr::SW_MASK {
            cfgr::SW_HSI if word & cfgr::PLL_MASK == 0 => Self::hsi(),
            cfgr::SW_PLL => {
                let source = match (
                    word & cfgr::PLLSRC != 0,
                    word & cfgr::PLLXTPRE != 0,
                ) {
                    (false, false) => ClockSource::HsiDiv2,
                    (true, false) => ClockSource::Hse,
                    (true, true) => ClockSource::HseDiv2,
                    (false, true) => return Err(Error::InvalidConfiguration),
                };
                let pllmul =
                    ((word & cfgr::PLLMUL_MASK) >> cfgr::PLLMUL_SHIFT) as u8;
                let multiplier = (pllmul + PLL_MUL_MIN).min(PLL_MUL_MAX);
                Self::pll(source, multiplier)
            }
            _ => return Err(Error::InvalidConfiguration),
        };
        Ok(request)
    }
}

/// Named requests for every SYSCLK step reachable from a given source
macro_rules! presets {
    ($(
        $source:ident as $prefix:ident ($doc:literal):
            [$($mul:literal => $mhz:literal),* $(,)?],
    )+) => {
        impl ClockRequest {
            $(
                $(
                    paste::paste! {
                        preset! {
                            [<$prefix _X $mul _ $mhz MHZ>]: $source x $mul,
                            concat!(
                                $doc, " x ", stringify!($mul),
                                " = ", stringify!($mhz), " MHz"
                            )
                        }
                    }
                )*
            )+
        }
    };
}

macro_rules! preset {
    ($name:ident: $source:ident x $mul:literal, $doc:expr) => {
        #[doc = $doc]
        pub const $name: ClockRequest =
            ClockRequest::pll(ClockSource::$source, $mul);
    };
}

impl ClockRequest {
    /// HSI = 8 MHz, PLL unused
    pub const HSI_8MHZ: ClockRequest = ClockRequest::hsi();
}

presets! {
    HsiDiv2 as HSI_DIV2 ("HSI/2"): [
        2 => 8, 3 => 12, 4 => 16, 5 => 20, 6 => 24, 7 => 28, 8 => 32,
        9 => 36, 10 => 40, 11 => 44, 12 => 48, 13 => 52, 14 => 56,
        15 => 60, 16 => 64,
    ],
}

// HSE_* and HSE_DIV2_* follow the crystal set by STM32F1XX_RCC_HSE_HZ,
// along with HSE_FASTEST
include!(concat!(env!("OUT_DIR"), "/hse_presets.rs"));
