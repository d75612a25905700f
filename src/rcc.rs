//! Reset and Clock Control
//!
//! This module configures the RCC unit to derive the system clock
//! `sys_ck` from one of the on-chip oscillators, optionally through the
//! PLL, and sets the flash wait states and APB1 prescaler that frequency
//! requires.
//!
//! See Figure 8 "Clock tree" in Reference Manual RM0008 for more
//! information.
//!
//! HSI is 8 MHz.
//! HSE is 8 MHz unless `STM32F1XX_RCC_HSE_HZ` is set at build time.
//! SYSCLK may not exceed 72 MHz and APB1 may not exceed 36 MHz.
//!
//! # Usage
//!
//! A builder pattern is used to pick a [`ClockRequest`]. The `freeze`
//! method validates the request, then programs the RCC and FLASH
//! registers in this order:
//!
//! 1. Flash wait states and prefetch buffer, before the clock is raised
//! 2. HSE enable, waiting for HSERDY, if HSE feeds the PLL
//! 3. PLL source, HSE divider and multiplication factor
//! 4. APB1 prescaler
//! 5. PLL enable, waiting for PLLRDY
//! 6. System clock switch
//!
//! A request that cannot be achieved is rejected with
//! [`Error::InvalidConfiguration`] before any register is touched.
//!
//! The ready flags are polled with no timeout: if the crystal never
//! starts, `freeze` never returns. Use `freeze_with` and a
//! [`Bounded`](poll::Bounded) poller to get [`Error::Timeout`] instead.
//!
//! The switch to the new SYSCLK is not awaited unless
//! [`wait_for_switch`](Rcc::wait_for_switch) is set.
//!
//! This routine is not reentrant. Run it once during start-up, before
//! interrupts are enabled.
//!
//! ```ignore
//!     let dp = pac::Peripherals::take().unwrap();
//!
//!     let rcc = dp.RCC.constrain();
//!     let clocks = rcc
//!         .request(ClockRequest::HSE_X9_72MHZ)
//!         .freeze()
//!         .unwrap();
//!
//!     assert_eq!(clocks.sys_ck().raw(), 72_000_000);
//!     assert_eq!(clocks.pclk1().raw(), 36_000_000);
//! ```
//!
//! The source and multiplier can also be given separately, or decoded
//! from a packed RCC_CFGR style word:
//!
//! ```ignore
//!     let clocks = rcc
//!         .sysclk(ClockSource::HseDiv2, 16)
//!         .freeze()?;
//!
//!     let request = ClockRequest::from_bits(0x001d_0002)?;
//! ```
//!
//! # Register access
//!
//! `Rcc` is generic over [`ClockRegisters`]. On the device this is
//! [`PacRegisters`](regs::PacRegisters), created by `constrain()`; any
//! other implementation can be supplied with [`Rcc::new`].
#![deny(missing_docs)]

use core::fmt::Display;

#[cfg(feature = "device-selected")]
use crate::stm32::RCC;
use crate::time::Hertz;

#[cfg(feature = "log")]
use log::{debug, warn};

mod core_clocks;
pub mod poll;
pub mod regs;
mod request;
mod timing;

pub use core_clocks::CoreClocks;
pub use regs::{ClockRegisters, Register};
pub use request::{ClockRequest, ClockSource, PLL_MUL_MAX, PLL_MUL_MIN};
pub use timing::{ApbPrescaler, DerivedTiming, FlashLatency, MAX_PCLK1_FREQ_HZ};

use poll::{Poll, Spin};
use regs::{acr, cfgr, cr};

/// Internal RC oscillator
pub const HSI: u32 = 8_000_000; // Hz

include!(concat!(env!("OUT_DIR"), "/hse.rs"));

/// Highest SYSCLK the device is rated for
pub const MAX_SYSCLK_FREQ_HZ: u32 = 72_000_000;

const EINVAL: i32 = 22;
const ETIMEDOUT: i32 = 110;

/// Handshake that did not complete
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Handshake {
    /// HSERDY after setting HSEON
    Hse,
    /// PLLRDY after setting PLLON
    Pll,
    /// SWS matching SW
    Switch,
}

/// Clock configuration error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The multiplier is out of range, the source cannot bypass the PLL,
    /// or the resulting SYSCLK exceeds 72 MHz. No register was accessed.
    InvalidConfiguration,
    /// A ready flag was not observed by a bounded poller. Never returned
    /// when polling with [`Spin`](poll::Spin).
    Timeout(Handshake),
}

impl Error {
    /// Negative errno equivalent
    pub const fn errno(&self) -> i32 {
        match self {
            Error::InvalidConfiguration => -EINVAL,
            Error::Timeout(_) => -ETIMEDOUT,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidConfiguration => {
                write!(f, "invalid clock configuration")
            }
            Error::Timeout(handshake) => {
                write!(f, "timed out waiting for {:?}", handshake)
            }
        }
    }
}

impl core::error::Error for Error {}

/// Configuration of the core clocks
#[derive(Debug, Copy, Clone)]
pub struct Config {
    request: ClockRequest,
    hse: u32,
    wait_for_switch: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            request: ClockRequest::hsi(),
            hse: HSE,
            wait_for_switch: false,
        }
    }
}

impl Config {
    /// Request applied by `freeze`
    pub fn request(&self) -> ClockRequest {
        self.request
    }

    /// HSE crystal frequency assumed for HSE based requests
    pub fn hse(&self) -> Hertz {
        Hertz::from_raw(self.hse)
    }

    /// Whether the system clock switch is awaited
    pub fn waits_for_switch(&self) -> bool {
        self.wait_for_switch
    }
}

/// Extension trait that constrains the `RCC` peripheral
#[cfg(feature = "device-selected")]
pub trait RccExt {
    /// Constrains the `RCC` peripheral so it plays nicely with the
    /// other abstractions
    fn constrain(self) -> Rcc<regs::PacRegisters>;
}

#[cfg(feature = "device-selected")]
impl RccExt for RCC {
    fn constrain(self) -> Rcc<regs::PacRegisters> {
        Rcc::new(regs::PacRegisters::new(self))
    }
}

/// Constrained RCC peripheral
///
/// Generated by calling `constrain` on the PAC's RCC peripheral, or by
/// [`Rcc::new`] over any [`ClockRegisters`].
///
/// ```ignore
/// let dp = stm32::Peripherals::take().unwrap();
/// let rcc = dp.RCC.constrain();
/// ```
pub struct Rcc<R> {
    config: Config,
    regs: R,
}

impl<R: ClockRegisters> Rcc<R> {
    /// Wrap a register set. The default request is the HSI, unmultiplied.
    pub fn new(regs: R) -> Self {
        Rcc {
            config: Config::default(),
            regs,
        }
    }

    /// Set the SYSCLK request applied by `freeze`
    #[must_use]
    pub fn request(mut self, request: ClockRequest) -> Self {
        self.config.request = request;
        self
    }

    /// Set SYSCLK to `source` multiplied by `multiplier`. A multiplier of
    /// 1 bypasses the PLL, which only the HSI may do.
    #[must_use]
    pub fn sysclk(self, source: ClockSource, multiplier: u8) -> Self {
        self.request(ClockRequest::new(source, multiplier))
    }

    /// Override the HSE crystal frequency fixed at build time
    #[must_use]
    pub fn use_hse(mut self, freq: Hertz) -> Self {
        assert!(
            (4_000_000..=16_000_000).contains(&freq.raw()),
            "HSE must be between 4 MHz and 16 MHz"
        );
        self.config.hse = freq.raw();
        self
    }

    /// Wait for the system clock switch status to report the new source
    /// before returning. Not done by default.
    #[must_use]
    pub fn wait_for_switch(mut self) -> Self {
        self.config.wait_for_switch = true;
        self
    }

    /// Current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Borrow the underlying registers
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Release the underlying registers
    pub fn free(self) -> R {
        self.regs
    }

    /// Apply `request`, spinning on each ready flag for as long as it
    /// takes. Returns the achieved SYSCLK.
    ///
    /// On [`Error::InvalidConfiguration`] no register has been read or
    /// written.
    pub fn configure(&mut self, request: ClockRequest) -> Result<Hertz, Error> {
        self.configure_with(request, &mut Spin)
    }

    /// Apply `request`, waiting on ready flags with `poll`
    pub fn configure_with<P: Poll>(
        &mut self,
        request: ClockRequest,
        poll: &mut P,
    ) -> Result<Hertz, Error> {
        // Every check happens before the first register access
        let timing = match DerivedTiming::for_request(request, self.config.hse)
        {
            Ok(timing) => timing,
            Err(e) => {
                #[cfg(feature = "log")]
                warn!("Rejected clock request {:?}", request);

                #[cfg(feature = "defmt")]
                defmt::warn!("Rejected clock request {}", request);

                return Err(e);
            }
        };

        #[cfg(feature = "log")]
        debug!(
            "sys_ck = {} Hz, flash latency = {:?}, ppre1 = {:?}",
            timing.sys_ck().raw(),
            timing.flash_latency(),
            timing.apb1_prescaler()
        );

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "sys_ck = {} Hz, flash latency = {}, ppre1 = {}",
            timing.sys_ck().raw(),
            timing.flash_latency(),
            timing.apb1_prescaler()
        );

        self.apply(request, &timing, poll)?;

        #[cfg(feature = "log")]
        {
            debug!("--- RCC register settings");
            debug!(
                "FLASH_ACR register: {:#010x}",
                self.regs.read(Register::FlashAcr)
            );
            debug!(
                "RCC_CR register: {:#010x}",
                self.regs.read(Register::RccCr)
            );
            debug!(
                "RCC_CFGR register: {:#010x}",
                self.regs.read(Register::RccCfgr)
            );
        }

        Ok(timing.sys_ck())
    }

    /// Program the registers for an already validated request
    fn apply<P: Poll>(
        &mut self,
        request: ClockRequest,
        timing: &DerivedTiming,
        poll: &mut P,
    ) -> Result<(), Error> {
        let regs = &mut self.regs;

        // Flash wait states must suit the new SYSCLK before it is raised.
        // Half cycle access stays off, the prefetch buffer stays on.
        let latency = timing.flash_latency().bits();
        regs.modify(Register::FlashAcr, |w| {
            (w & !acr::CONFIG_MASK) | acr::PRFTBE | latency
        });

        // HSE
        if request.source().uses_hse() {
            // Ensure HSE is on and stable
            regs.modify(Register::RccCr, |w| w | cr::HSEON);
            poll.wait_until(|| regs.read(Register::RccCr) & cr::HSERDY != 0)
                .map_err(|_| Error::Timeout(Handshake::Hse))?;
        }

        // PLL entry. Fields left over from an earlier configuration are
        // cleared rather than OR-ed into.
        if request.uses_pll() {
            let pll = request.pll_bits();
            regs.modify(Register::RccCfgr, |w| (w & !cfgr::PLL_MASK) | pll);
        }

        // APB1 Prescaler
        let ppre1 = timing.apb1_prescaler().bits();
        regs.modify(Register::RccCfgr, |w| (w & !cfgr::PPRE1_MASK) | ppre1);

        // PLL
        if request.uses_pll() {
            // Enable PLL and wait for it to stabilise
            regs.modify(Register::RccCr, |w| w | cr::PLLON);
            poll.wait_until(|| regs.read(Register::RccCr) & cr::PLLRDY != 0)
                .map_err(|_| Error::Timeout(Handshake::Pll))?;
        }

        // Select system clock source
        let sw = request.sw_bits();
        regs.modify(Register::RccCfgr, |w| (w & !cfgr::SW_MASK) | sw);

        if self.config.wait_for_switch {
            poll.wait_until(|| {
                let word = regs.read(Register::RccCfgr);
                (word & cfgr::SWS_MASK) >> cfgr::SWS_SHIFT == sw
            })
            .map_err(|_| Error::Timeout(Handshake::Switch))?;
        }

        Ok(())
    }

    /// `configure` with a C-style result: the achieved SYSCLK in Hz, or a
    /// negative errno (`-EINVAL`) if the request is rejected
    pub fn sysclk_raw(&mut self, source: ClockSource, multiple: i32) -> i32 {
        let Ok(multiplier) = u8::try_from(multiple) else {
            return Error::InvalidConfiguration.errno();
        };
        match self.configure(ClockRequest::new(source, multiplier)) {
            // At most 72 MHz, always representable
            Ok(freq) => freq.raw() as i32,
            Err(e) => e.errno(),
        }
    }

    /// Freeze the core clocks, returning the achieved frequencies.
    ///
    /// Spins on each ready flag for as long as it takes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] if the requested configuration
    /// cannot be achieved by the hardware. No register has been touched
    /// in that case.
    pub fn freeze(self) -> Result<CoreClocks, Error> {
        self.freeze_with(&mut Spin)
    }

    /// Freeze the core clocks, waiting on ready flags with `poll`
    pub fn freeze_with<P: Poll>(
        mut self,
        poll: &mut P,
    ) -> Result<CoreClocks, Error> {
        let request = self.config.request;
        let sys_ck = self.configure_with(request, poll)?;
        let timing = DerivedTiming::for_sysclk(sys_ck.raw());

        Ok(CoreClocks::new(request, &timing, self.config.hse))
    }
}

#[cfg(test)]
mod tests {
    use super::poll::Bounded;
    use super::regs::mock::{Access, MockRegisters};
    use super::*;

    fn rcc() -> Rcc<MockRegisters> {
        Rcc::new(MockRegisters::reset())
    }

    /// Index of the first write of `reg` matching `pred`
    fn first_write(
        regs: &MockRegisters,
        reg: Register,
        pred: impl Fn(u32) -> bool,
    ) -> Option<usize> {
        regs.accesses().iter().position(|a| match *a {
            Access::Write(r, value) => r == reg && pred(value),
            Access::Read(..) => false,
        })
    }

    /// Index of the first read of `reg` matching `pred`
    fn first_read(
        regs: &MockRegisters,
        reg: Register,
        pred: impl Fn(u32) -> bool,
    ) -> Option<usize> {
        regs.accesses().iter().position(|a| match *a {
            Access::Read(r, value) => r == reg && pred(value),
            Access::Write(..) => false,
        })
    }

    #[test]
    fn hsi_without_pll() {
        let mut rcc = rcc();
        assert_eq!(rcc.configure(ClockRequest::hsi()), Ok(Hertz::MHz(8)));

        let regs = rcc.registers();
        assert_eq!(regs.flash_acr & acr::LATENCY_MASK, 0);
        assert_eq!(regs.flash_acr & acr::PRFTBE, acr::PRFTBE);
        assert_eq!(regs.cfgr & cfgr::PPRE1_MASK, 0);
        assert_eq!(regs.cfgr & cfgr::SW_MASK, cfgr::SW_HSI);
        assert_eq!(regs.cfgr & cfgr::PLL_MASK, 0);
        // Neither oscillator nor PLL is started
        assert_eq!(regs.cr & (cr::HSEON | cr::PLLON), 0);
    }

    #[test]
    fn hse_times_nine() {
        let mut rcc = rcc();
        assert_eq!(
            rcc.configure(ClockRequest::HSE_X9_72MHZ),
            Ok(Hertz::MHz(72))
        );

        let regs = rcc.registers();
        assert_eq!(regs.flash_acr & acr::LATENCY_MASK, 2);
        assert_eq!(regs.flash_acr & acr::PRFTBE, acr::PRFTBE);
        assert_eq!(regs.cfgr & cfgr::PPRE1_MASK, 0b100 << 8);
        assert_eq!(regs.cfgr & cfgr::PLLMUL_MASK, 0b0111 << 18);
        assert_eq!(regs.cfgr & cfgr::PLLSRC, cfgr::PLLSRC);
        assert_eq!(regs.cfgr & cfgr::PLLXTPRE, 0);
        assert_eq!(regs.cfgr & cfgr::SW_MASK, cfgr::SW_PLL);
        assert_eq!(regs.cr & (cr::HSEON | cr::PLLON), cr::HSEON | cr::PLLON);

        // Both ready flags were seen before SW was written
        let hse_ready =
            first_read(regs, Register::RccCr, |v| v & cr::HSERDY != 0).unwrap();
        let pll_ready =
            first_read(regs, Register::RccCr, |v| v & cr::PLLRDY != 0).unwrap();
        let switch = first_write(regs, Register::RccCfgr, |v| {
            v & cfgr::SW_MASK == cfgr::SW_PLL
        })
        .unwrap();
        assert!(hse_ready < pll_ready);
        assert!(pll_ready < switch);
    }

    #[test]
    fn write_order() {
        let mut rcc = rcc();
        rcc.configure(ClockRequest::HSE_DIV2_X16_64MHZ).unwrap();

        let writes = rcc.registers().writes();
        let order: Vec<Register> = writes.iter().map(|(reg, _)| *reg).collect();
        assert_eq!(
            order,
            [
                Register::FlashAcr, // wait states
                Register::RccCr,    // HSEON
                Register::RccCfgr,  // PLL entry
                Register::RccCfgr,  // PPRE1
                Register::RccCr,    // PLLON
                Register::RccCfgr,  // SW
            ]
        );
        assert_eq!(writes[0].1 & acr::LATENCY_MASK, 2);
        assert_eq!(
            writes[2].1 & cfgr::PLL_MASK,
            cfgr::PLLSRC | cfgr::PLLXTPRE | (0b1110 << 18)
        );
        assert_eq!(writes[5].1 & cfgr::SW_MASK, cfgr::SW_PLL);
    }

    #[test]
    fn hsi_pll_does_not_start_hse() {
        let mut rcc = rcc();
        assert_eq!(
            rcc.configure(ClockRequest::HSI_DIV2_X9_36MHZ),
            Ok(Hertz::MHz(36))
        );
        let regs = rcc.registers();
        assert_eq!(regs.cr & cr::HSEON, 0);
        assert_eq!(regs.cr & cr::PLLON, cr::PLLON);
        assert_eq!(regs.cfgr & (cfgr::PLLSRC | cfgr::PLLXTPRE), 0);
        // Exactly 36 MHz keeps APB1 undivided
        assert_eq!(regs.cfgr & cfgr::PPRE1_MASK, 0);
        assert_eq!(regs.flash_acr & acr::LATENCY_MASK, 1);
    }

    #[test]
    fn rejected_requests_touch_nothing() {
        for request in [
            ClockRequest::pll(ClockSource::Hse, 17),
            ClockRequest::pll(ClockSource::Hse, 10),
            ClockRequest::pll(ClockSource::HsiDiv2, 0),
            ClockRequest::new(ClockSource::Hse, 1),
            ClockRequest::new(ClockSource::HseDiv2, 1),
            ClockRequest::new(ClockSource::Hsi, 4),
        ] {
            let mut rcc = rcc();
            let before = rcc.registers().snapshot();
            assert_eq!(
                rcc.configure(request),
                Err(Error::InvalidConfiguration),
                "{request:?}"
            );
            assert_eq!(rcc.registers().snapshot(), before);
            assert!(rcc.registers().accesses().is_empty());
        }
    }

    #[test]
    fn same_request_same_result() {
        let mut a = rcc();
        let mut b = rcc();
        let request = ClockRequest::HSE_X6_48MHZ;
        assert_eq!(a.configure(request), b.configure(request));
        assert_eq!(a.registers().snapshot(), b.registers().snapshot());

        // Applying it again changes nothing
        let after_first = a.registers().snapshot();
        assert_eq!(a.configure(request), Ok(Hertz::MHz(48)));
        assert_eq!(a.registers().snapshot(), after_first);
    }

    #[test]
    fn stale_fields_are_cleared() {
        let mut regs = MockRegisters::reset();
        // Left over from a x16 HSE/2 configuration with APB1 /16
        regs.cfgr =
            cfgr::PLLXTPRE | cfgr::PLLSRC | (0b1111 << 18) | (0b111 << 8);
        let mut rcc = Rcc::new(regs);

        rcc.configure(ClockRequest::HSI_DIV2_X4_16MHZ).unwrap();
        let regs = rcc.registers();
        assert_eq!(regs.cfgr & cfgr::PLL_MASK, 0b0010 << 18);
        assert_eq!(regs.cfgr & cfgr::PPRE1_MASK, 0);
    }

    #[test]
    fn unrelated_bits_survive() {
        let mut regs = MockRegisters::reset();
        // USBPRE and ADCPRE
        regs.cfgr = (1 << 22) | (0b10 << 14);
        let mut rcc = Rcc::new(regs);

        rcc.configure(ClockRequest::HSE_X9_72MHZ).unwrap();
        let regs = rcc.registers();
        assert_eq!(
            regs.cfgr & ((1 << 22) | (0b11 << 14)),
            (1 << 22) | (0b10 << 14)
        );
        // HSITRIM and HSION untouched
        assert_eq!(regs.cr & 0xff, cr::RESET & 0xff);
    }

    #[test]
    fn half_cycle_access_is_disabled() {
        let mut regs = MockRegisters::reset();
        regs.flash_acr = acr::HLFCYA;
        let mut rcc = Rcc::new(regs);

        rcc.configure(ClockRequest::hsi()).unwrap();
        assert_eq!(
            rcc.registers().flash_acr & acr::CONFIG_MASK,
            acr::PRFTBE
        );
    }

    #[test]
    fn bounded_poll_times_out_on_dead_crystal() {
        let mut regs = MockRegisters::reset();
        regs.hse_starts = false;
        let mut rcc = Rcc::new(regs);

        assert_eq!(
            rcc.configure_with(
                ClockRequest::HSE_X9_72MHZ,
                &mut Bounded::new(100)
            ),
            Err(Error::Timeout(Handshake::Hse))
        );
        // Never switched
        assert_eq!(rcc.registers().cfgr & cfgr::SW_MASK, cfgr::SW_HSI);
        assert_eq!(rcc.registers().cr & cr::PLLON, 0);

        // HSI based requests are unaffected
        assert_eq!(
            rcc.configure_with(
                ClockRequest::HSI_DIV2_X16_64MHZ,
                &mut Bounded::new(100)
            ),
            Ok(Hertz::MHz(64))
        );
    }

    #[test]
    fn switch_wait_is_opt_in() {
        let mut regs = MockRegisters::reset();
        regs.switch_follows = false;

        // Default: no wait, so a lagging SWS goes unnoticed
        let mut rcc = Rcc::new(regs.clone());
        assert_eq!(
            rcc.configure_with(
                ClockRequest::HSE_X9_72MHZ,
                &mut Bounded::new(10)
            ),
            Ok(Hertz::MHz(72))
        );

        let rcc = Rcc::new(regs)
            .request(ClockRequest::HSE_X9_72MHZ)
            .wait_for_switch();
        assert_eq!(
            rcc.freeze_with(&mut Bounded::new(10)),
            Err(Error::Timeout(Handshake::Switch))
        );

        let rcc = Rcc::new(MockRegisters::reset())
            .request(ClockRequest::HSE_X9_72MHZ)
            .wait_for_switch();
        assert!(rcc.freeze_with(&mut Bounded::new(10)).is_ok());
    }

    #[test]
    fn freeze_reports_core_clocks() {
        let clocks = rcc().sysclk(ClockSource::Hse, 6).freeze().unwrap();
        assert_eq!(clocks.sys_ck().raw(), 48_000_000);
        assert_eq!(clocks.pclk1().raw(), 24_000_000);
        assert_eq!(clocks.flash_latency(), FlashLatency::WS2);

        assert_eq!(
            rcc().sysclk(ClockSource::Hse, 12).freeze(),
            Err(Error::InvalidConfiguration)
        );
    }

    #[test]
    fn other_crystal() {
        let clocks = rcc()
            .use_hse(Hertz::MHz(12))
            .request(ClockRequest::pll(ClockSource::Hse, 6))
            .freeze()
            .unwrap();
        assert_eq!(clocks.sys_ck().raw(), 72_000_000);
        assert_eq!(clocks.hse_ck(), Some(Hertz::MHz(12)));

        // x9 is fine with 8 MHz but not with 12 MHz
        assert_eq!(
            rcc()
                .use_hse(Hertz::MHz(12))
                .request(ClockRequest::HSE_X9_72MHZ)
                .freeze(),
            Err(Error::InvalidConfiguration)
        );
    }

    #[test]
    #[should_panic]
    fn hse_out_of_range() {
        let _ = rcc().use_hse(Hertz::MHz(25));
    }

    #[test]
    fn raw_interface() {
        let mut rcc = rcc();
        assert_eq!(rcc.sysclk_raw(ClockSource::Hse, 9), 72_000_000);
        assert_eq!(rcc.sysclk_raw(ClockSource::Hsi, 1), 8_000_000);
        assert_eq!(rcc.sysclk_raw(ClockSource::Hse, 17), -22);
        assert_eq!(rcc.sysclk_raw(ClockSource::Hse, -1), -22);
        assert_eq!(rcc.sysclk_raw(ClockSource::Hse, 1 << 20), -22);
        assert_eq!(Error::Timeout(Handshake::Pll).errno(), -110);
    }

    #[test]
    fn default_hse_is_build_constant() {
        assert_eq!(Config::default().hse, HSE);
        assert!((4_000_000..=16_000_000).contains(&HSE));
    }
}
