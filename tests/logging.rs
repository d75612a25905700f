//! Log records emitted while configuring the clock tree. Run with
//! `--features log`.
#![cfg(feature = "log")]

use std::sync::{Mutex, Once};

use log::{Level, LevelFilter, Log, Metadata, Record};
use stm32f1xx_rcc::rcc::regs::cr;
use stm32f1xx_rcc::rcc::{
    ClockRegisters, ClockRequest, ClockSource, Error, Rcc, Register,
};
use stm32f1xx_rcc::serial::{self, Usart};
use stm32f1xx_rcc::time::Hertz;

/// Keeps every record as `(level, message)`
struct Capture {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

/// Tests in this file share the logger, so each takes the lock for its
/// whole body and starts from an empty record list.
static SERIAL: Mutex<()> = Mutex::new(());

fn drain() -> Vec<(Level, String)> {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    std::mem::take(&mut *LOGGER.records.lock().unwrap())
}

/// Plain register file with ready flags that follow their enables
struct Regs([u32; 3]);

impl Regs {
    fn new() -> Self {
        Regs([0x30, cr::RESET, 0])
    }
}

impl ClockRegisters for Regs {
    fn read(&self, reg: Register) -> u32 {
        self.0[reg as usize]
    }

    fn write(&mut self, reg: Register, mut value: u32) {
        if reg == Register::RccCr {
            if value & cr::HSEON != 0 {
                value |= cr::HSERDY;
            }
            if value & cr::PLLON != 0 {
                value |= cr::PLLRDY;
            }
        }
        self.0[reg as usize] = value;
    }
}

#[test]
fn rejected_request_is_a_warning() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    drain();

    let mut rcc = Rcc::new(Regs::new());
    assert_eq!(
        rcc.configure(ClockRequest::new(ClockSource::Hsi, 4)),
        Err(Error::InvalidConfiguration)
    );

    let records = drain();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, Level::Warn);
    assert!(records[0].1.starts_with("Rejected clock request"));
}

#[test]
fn applied_request_dumps_registers() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    drain();

    let mut rcc = Rcc::new(Regs::new());
    let sysclk = rcc.configure(ClockRequest::HSE_FASTEST).unwrap();

    let records = drain();
    assert!(records.iter().all(|(level, _)| *level == Level::Debug));
    let expected = format!("sys_ck = {} Hz,", sysclk.raw());
    assert!(records[0].1.starts_with(&expected));
    assert!(records.iter().any(|(_, msg)| msg.starts_with("RCC_CFGR")));
}

#[test]
fn baud_divisor_is_logged() {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    drain();

    let clocks = Rcc::new(Regs::new()).freeze().unwrap();
    drain();
    let brr = serial::baud_divisor(&clocks, Usart::Usart1, Hertz::Hz(9600))
        .unwrap();

    let records = drain();
    assert_eq!(records.len(), 1);
    assert!(records[0].1.contains(&format!("BRR: {brr:#X}")));
}
