#![deny(warnings)]
#![no_main]
#![no_std]

use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};

use cortex_m_rt::entry;
use stm32f1xx_rcc::rcc::{
    ClockRequest, MAX_PCLK1_FREQ_HZ, MAX_SYSCLK_FREQ_HZ,
};
use stm32f1xx_rcc::{pac, prelude::*};

#[entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().unwrap();

    // Constrain and Freeze clock
    rprintln!("Setup RCC...                  ");
    let rcc = dp.RCC.constrain();
    let clocks = rcc.request(ClockRequest::HSE_FASTEST).freeze().unwrap();

    rprintln!("");
    rprintln!("stm32f1xx-rcc example - RCC");
    rprintln!("");

    // SYS_CK
    rprintln!("sys_ck = {} Hz", clocks.sys_ck().raw());
    assert!(clocks.sys_ck().raw() <= MAX_SYSCLK_FREQ_HZ);

    // PCLK1
    rprintln!("pclk1 = {} Hz", clocks.pclk1().raw());
    assert!(clocks.pclk1().raw() <= MAX_PCLK1_FREQ_HZ);

    rprintln!("flash latency = {:?}", clocks.flash_latency());

    loop {
        cortex_m::asm::nop()
    }
}
