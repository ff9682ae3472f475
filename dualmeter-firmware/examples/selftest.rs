//! Peripheral smoke tests, run on the board over the serial console.

#![no_std]
#![no_main]

use panic_halt as _;

use dualmeter_firmware::hal::Delay;
use dualmeter_firmware::testing::{AdcTest, SpiTest, TestCase, TestRunner, TimerTest};
use embedded_hal::blocking::delay::DelayMs;

#[avr_device::entry]
fn main() -> ! {
    let _dp = avr_device::atmega128::Peripherals::take().unwrap();

    let mut runner = TestRunner::new();

    let cases: [&dyn TestCase; 3] = [&AdcTest, &TimerTest, &SpiTest];
    runner.run_suite("peripheral smoke tests", &cases);

    let mut delay = Delay::new();
    loop {
        delay.delay_ms(1000u16);
    }
}
