//! Digital frequency counter.
//!
//! Timer 1 free-runs at the CPU clock and is reset on every transition of
//! the squared input waveform on INT4. The overflow handler counts timer
//! wraparounds between edges; the edge handler reconstructs the elapsed
//! half-period from the counter and the wraparound count. The main loop
//! polls for a full window of half-periods, averages, converts to Hz and
//! pushes the result to the display.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use panic_halt as _;

use core::cell::RefCell;

use avr_device::interrupt::{self, Mutex};

use dualmeter_core::config::FREQ_DIGITS;
use dualmeter_core::display::Max7219;
use dualmeter_core::meas::{frequency_hz, PeriodCapture};
use dualmeter_firmware::drivers::SerialConsole;
use dualmeter_firmware::hal::board::{DisplayLoad, FreqInput};
use dualmeter_firmware::hal::{CaptureTimer, Delay, Prescaler, Spi, SpiPrescaler};
use embedded_hal::blocking::delay::DelayMs;

// Shared with the edge and overflow handlers
static CAPTURE: Mutex<RefCell<PeriodCapture>> = Mutex::new(RefCell::new(PeriodCapture::new()));

/// Pause between display refreshes so the reading is legible.
const REFRESH_PAUSE_MS: u16 = 250;

// EICRB: interrupt on any logical change of INT4
const INT4_ANY_EDGE: u8 = 0x01;
const INT4_SENSE_MASK: u8 = 0x03;

// EIMSK enable bit for INT4
const INT4_ENABLE: u8 = 1 << 4;

#[avr_device::entry]
fn main() -> ! {
    let _dp = avr_device::atmega128::Peripherals::take().unwrap();

    let mut delay = Delay::new();
    let mut console = SerialConsole::new();

    let spi = Spi::new(SpiPrescaler::Div16);
    let load = DisplayLoad::default().into_output();
    let mut display = Max7219::new(spi, load, FREQ_DIGITS);
    display.init(&mut delay).ok();

    let _input = FreqInput::default().into_input();

    let mut timer = CaptureTimer::new();
    timer.enable_overflow_interrupt();
    timer.start(Prescaler::Direct);

    // Edge interrupt on the monitored line
    unsafe {
        let exint = &*avr_device::atmega128::EXINT::ptr();
        exint
            .eicrb
            .modify(|r, w| w.bits((r.bits() & !INT4_SENSE_MASK) | INT4_ANY_EDGE));
        exint.eimsk.modify(|r, w| w.bits(r.bits() | INT4_ENABLE));
    }

    unsafe { interrupt::enable() };

    console.write_line("frequency counter ready");

    loop {
        // Snapshot and reset happen as one unit with the handlers held off.
        let average = interrupt::free(|cs| CAPTURE.borrow(cs).borrow_mut().poll_average());

        if let Some(half_period) = average {
            match frequency_hz(half_period) {
                Some(hz) => {
                    display.display_number(hz, &mut delay).ok();
                    ufmt::uwriteln!(&mut console, "input: {} Hz", hz).ok();
                    delay.delay_ms(REFRESH_PAUSE_MS);
                }
                // Zero-length window; keep waiting rather than divide.
                None => console.write_line("no measurable period"),
            }
        }
    }
}

// Timer wrapped while waiting for the next edge.
#[avr_device::interrupt(atmega128)]
fn TIMER1_OVF() {
    interrupt::free(|cs| {
        CAPTURE.borrow(cs).borrow_mut().record_overflow();
    });
}

// Edge on the monitored line: capture the elapsed ticks and restart the
// timer for the next half-period. An overflow latched in the same tick as
// the edge is charged to the following half-period, costing at most one
// timer period of error.
#[avr_device::interrupt(atmega128)]
fn INT4() {
    interrupt::free(|cs| {
        let ticks = unsafe {
            let tc1 = &*avr_device::atmega128::TC1::ptr();
            let ticks = tc1.tcnt1.read().bits();
            tc1.tcnt1.write(|w| w.bits(0));
            ticks
        };
        CAPTURE.borrow(cs).borrow_mut().record_edge(ticks);
    });
}
