//! Register access for the clock tree
//!
//! The configuration sequence only ever touches three 32-bit registers:
//! `FLASH_ACR`, `RCC_CR` and `RCC_CFGR`. Access goes through the
//! [`ClockRegisters`] trait so that the sequence can be driven against
//! the real memory-mapped peripherals or against an in-memory register
//! set on the host.
//!
//! See RM0008 sections 3.3.3 (FLASH_ACR), 7.3.1 (RCC_CR) and 7.3.2
//! (RCC_CFGR).

/// Registers written while configuring the clock tree
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Flash access control register
    FlashAcr,
    /// Clock control register
    RccCr,
    /// Clock configuration register
    RccCfgr,
}

/// Volatile access to the clock tree registers
///
/// Implementations must perform every `read` and `write` on the
/// underlying storage; the configuration sequence relies on `read`
/// observing hardware status bits that change independently.
pub trait ClockRegisters {
    /// Read the current value of `reg`
    fn read(&self, reg: Register) -> u32;

    /// Overwrite `reg` with `value`
    fn write(&mut self, reg: Register, value: u32);

    /// Read-modify-write of `reg`
    fn modify<F>(&mut self, reg: Register, f: F)
    where
        F: FnOnce(u32) -> u32,
    {
        let value = f(self.read(reg));
        self.write(reg, value);
    }
}

/// FLASH_ACR bit fields
pub mod acr {
    /// Wait states, bits 2:0
    pub const LATENCY_MASK: u32 = 0b111;
    /// Flash half cycle access enable
    pub const HLFCYA: u32 = 1 << 3;
    /// Prefetch buffer enable
    pub const PRFTBE: u32 = 1 << 4;
    /// Every bit rewritten by the configuration sequence
    pub const CONFIG_MASK: u32 = LATENCY_MASK | HLFCYA | PRFTBE;
}

/// RCC_CR bit fields
pub mod cr {
    /// Internal high-speed clock enable
    pub const HSION: u32 = 1 << 0;
    /// Internal high-speed clock ready flag
    pub const HSIRDY: u32 = 1 << 1;
    /// External high-speed clock enable
    pub const HSEON: u32 = 1 << 16;
    /// External high-speed clock ready flag
    pub const HSERDY: u32 = 1 << 17;
    /// PLL enable
    pub const PLLON: u32 = 1 << 24;
    /// PLL clock ready flag
    pub const PLLRDY: u32 = 1 << 25;
    /// Value after reset, HSITRIM = 16 with the HSI on and ready
    pub const RESET: u32 = 0x0000_0083;
}

/// RCC_CFGR bit fields
pub mod cfgr {
    /// System clock switch, bits 1:0
    pub const SW_MASK: u32 = 0b11;
    /// System clock switch status, bits 3:2
    pub const SWS_SHIFT: u32 = 2;
    /// System clock switch status mask
    pub const SWS_MASK: u32 = 0b11 << SWS_SHIFT;
    /// APB1 prescaler, bits 10:8
    pub const PPRE1_SHIFT: u32 = 8;
    /// APB1 prescaler mask
    pub const PPRE1_MASK: u32 = 0b111 << PPRE1_SHIFT;
    /// PLL entry clock source, set for HSE
    pub const PLLSRC: u32 = 1 << 16;
    /// HSE divider for PLL entry
    pub const PLLXTPRE: u32 = 1 << 17;
    /// PLL multiplication factor, bits 21:18
    pub const PLLMUL_SHIFT: u32 = 18;
    /// PLL multiplication factor mask
    pub const PLLMUL_MASK: u32 = 0b1111 << PLLMUL_SHIFT;
    /// Every PLL entry field
    pub const PLL_MASK: u32 = PLLSRC | PLLXTPRE | PLLMUL_MASK;

    /// SW / SWS encoding for HSI
    pub const SW_HSI: u32 = 0b00;
    /// SW / SWS encoding for HSE
    pub const SW_HSE: u32 = 0b01;
    /// SW / SWS encoding for the PLL output
    pub const SW_PLL: u32 = 0b10;
}

#[cfg(feature = "device-selected")]
pub use pac_binding::PacRegisters;

#[cfg(feature = "device-selected")]
mod pac_binding {
    use super::{ClockRegisters, Register};
    use crate::stm32::{FLASH, RCC};

    /// [`ClockRegisters`] bound to the memory-mapped RCC and FLASH
    /// peripherals
    ///
    /// Owns the RCC singleton. FLASH_ACR is reached through its fixed
    /// address since no other part of this crate writes it.
    pub struct PacRegisters {
        rb: RCC,
    }

    impl PacRegisters {
        /// Wrap the RCC peripheral
        pub fn new(rb: RCC) -> Self {
            Self { rb }
        }

        /// Release the RCC peripheral
        pub fn free(self) -> RCC {
            self.rb
        }
    }

    impl ClockRegisters for PacRegisters {
        fn read(&self, reg: Register) -> u32 {
            match reg {
                Register::FlashAcr => {
                    let flash = unsafe { &(*FLASH::ptr()) };
                    flash.acr().read().bits()
                }
                Register::RccCr => self.rb.cr().read().bits(),
                Register::RccCfgr => self.rb.cfgr().read().bits(),
            }
        }

        fn write(&mut self, reg: Register, value: u32) {
            match reg {
                Register::FlashAcr => {
                    let flash = unsafe { &(*FLASH::ptr()) };
                    flash.acr().write(|w| unsafe { w.bits(value) });
                }
                Register::RccCr => {
                    self.rb.cr().write(|w| unsafe { w.bits(value) });
                }
                Register::RccCfgr => {
                    self.rb.cfgr().write(|w| unsafe { w.bits(value) });
                }
            }
        }
    }
}
