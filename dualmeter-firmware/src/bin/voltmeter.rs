//! DC voltage meter.
//!
//! The converter free-runs on channel 0; every completed conversion fires
//! the ADC interrupt, which folds the sample into the shared accumulator.
//! The main loop polls for a full averaging window, snapshots it inside a
//! critical section, scales to millivolts and pushes the result to the
//! display.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use panic_halt as _;

use core::cell::RefCell;

use avr_device::interrupt::{self, Mutex};

use dualmeter_core::config::VOLT_DIGITS;
use dualmeter_core::display::Max7219;
use dualmeter_core::meas::{scale_millivolts, SampleAccumulator};
use dualmeter_firmware::drivers::SerialConsole;
use dualmeter_firmware::hal::board::DisplayLoad;
use dualmeter_firmware::hal::{
    Adc, AdcChannel, AdcPrescaler, AdcReference, Delay, Spi, SpiPrescaler,
};

// Shared with the conversion-complete handler
static SAMPLES: Mutex<RefCell<SampleAccumulator>> =
    Mutex::new(RefCell::new(SampleAccumulator::new()));

#[avr_device::entry]
fn main() -> ! {
    let _dp = avr_device::atmega128::Peripherals::take().unwrap();

    let mut delay = Delay::new();
    let mut console = SerialConsole::new();

    let spi = Spi::new(SpiPrescaler::Div16);
    let load = DisplayLoad::default().into_output();
    let mut display = Max7219::new(spi, load, VOLT_DIGITS);
    display.init(&mut delay).ok();

    let mut adc = Adc::new(AdcPrescaler::Div64, AdcReference::Internal2_56V);
    adc.select_channel(AdcChannel::Adc0);
    adc.start_free_running();

    unsafe { interrupt::enable() };

    console.write_line("voltmeter ready");

    loop {
        // Snapshot and reset happen as one unit with the handler held off.
        let average = interrupt::free(|cs| SAMPLES.borrow(cs).borrow_mut().poll_average());

        if let Some(average) = average {
            let millivolts = scale_millivolts(average);
            display.display_number(millivolts as u32, &mut delay).ok();
            ufmt::uwriteln!(&mut console, "dc: {} mV", millivolts).ok();
        }
    }
}

// Conversion complete: fold the new sample into the running sum.
#[avr_device::interrupt(atmega128)]
fn ADC() {
    let raw = unsafe {
        let p = avr_device::atmega128::ADC::ptr();
        let low = (*p).adcl.read().bits() as u16;
        let high = (*p).adch.read().bits() as u16;
        (high << 8) | low
    };

    interrupt::free(|cs| {
        SAMPLES.borrow(cs).borrow_mut().record_sample(raw);
    });
}
