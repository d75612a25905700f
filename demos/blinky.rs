#![no_main]
#![no_std]

use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use fugit::SecsDurationU32;
use stm32f1xx_rcc::{delay::Delay, pac, prelude::*, rcc::ClockRequest};

#[entry]
fn main() -> ! {
    rtt_init_print!();

    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = pac::Peripherals::take().unwrap();

    // LED on PC13
    dp.RCC.apb2enr().modify(|_, w| w.iopcen().set_bit());
    dp.GPIOC.crh().modify(|r, w| unsafe {
        // MODE13 = output 2 MHz, CNF13 = push-pull
        w.bits((r.bits() & !(0xF << 20)) | (0b0010 << 20))
    });

    // Constrain and Freeze clock
    let rcc = dp.RCC.constrain();
    let clocks = rcc.request(ClockRequest::HSE_FASTEST).freeze().unwrap();

    let mut delay = Delay::new(cp.SYST, &clocks);
    let duration = SecsDurationU32::secs(1).to_millis();

    loop {
        dp.GPIOC.bsrr().write(|w| w.bs13().set_bit());
        delay.delay_ms(duration);
        rprintln!("Off");
        dp.GPIOC.bsrr().write(|w| w.br13().set_bit());
        delay.delay_ms(duration);
        rprintln!("On");
    }
}
