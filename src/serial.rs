//! USART baud rate divisors
//!
//! The STM32F1 USARTs divide their bus clock by a 12.4 fixed point
//! USARTDIV held in BRR. Sixteen times oversampling makes the register
//! value simply
//!
//! ```text
//! BRR = bus_clock / baudrate
//! ```
//!
//! USART1 sits on APB2, USART2 and USART3 on APB1, so the same baudrate
//! needs a different divisor once APB1 is prescaled.
//!
//! # Usage
//!
//! ```ignore
//! let clocks = dp
//!     .RCC
//!     .constrain()
//!     .request(ClockRequest::HSE_X9_72MHZ)
//!     .freeze()?;
//!
//! let brr = serial::baud_divisor(&clocks, Usart::Usart2, 115_200.bps())?;
//! usart2.brr().write(|w| unsafe { w.bits(brr.into()) });
//! ```

use core::fmt::Display;

#[cfg(feature = "log")]
use log::debug;

use crate::rcc::CoreClocks;
use crate::time::{Bps, Hertz};

/// Smallest BRR value: a mantissa of 1
const BRR_MIN: u32 = 16;

/// Serial configuration error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// A baudrate of zero was requested
    ZeroBaudrate,
    /// The bus clock is too slow for the requested baudrate
    BaudrateTooHigh,
    /// The bus clock is too fast for the requested baudrate
    BaudrateTooLow,
}

impl Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl core::error::Error for Error {}

/// USART peripherals of the STM32F103
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Usart {
    /// On APB2
    Usart1,
    /// On APB1
    Usart2,
    /// On APB1
    Usart3,
}

impl Usart {
    /// Frequency of the bus clocking this USART
    pub fn bus_clk(self, clocks: &CoreClocks) -> Hertz {
        match self {
            Usart::Usart1 => clocks.pclk2(),
            Usart::Usart2 | Usart::Usart3 => clocks.pclk1(),
        }
    }
}

/// BRR value giving `baudrate` on `usart`
pub fn baud_divisor(
    clocks: &CoreClocks,
    usart: Usart,
    baudrate: Bps,
) -> Result<u16, Error> {
    if baudrate.raw() == 0 {
        return Err(Error::ZeroBaudrate);
    }
    let bus_clk = usart.bus_clk(clocks);
    let div = bus_clk.raw() / baudrate.raw();

    #[cfg(feature = "log")]
    debug!(
        "{usart:?}: Bus clock: {}; Baudrate: {}; BRR: {div:#X}",
        bus_clk.raw(),
        baudrate.raw()
    );
    #[cfg(feature = "defmt")]
    defmt::debug!(
        "{}: Bus clock: {}; Baudrate: {}; BRR: {:#X}",
        usart,
        bus_clk.raw(),
        baudrate.raw(),
        div
    );

    if div < BRR_MIN {
        return Err(Error::BaudrateTooHigh);
    }
    u16::try_from(div).map_err(|_| Error::BaudrateTooLow)
}
