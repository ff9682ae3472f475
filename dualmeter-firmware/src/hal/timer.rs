//! 16-bit capture timer for the period measurement path, plus the
//! busy-wait delay provider.

use crate::config::CPU_FREQ_HZ;
use avr_device::atmega128::TC1;
use core::marker::PhantomData;
use embedded_hal::blocking::delay::{DelayMs, DelayUs};

/// Timer clock select (TCCR1B CS bits).
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum Prescaler {
    Stop = 0,
    Direct = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
}

// TIMSK overflow-interrupt enable for timer 1
const TOIE1: u8 = 1 << 2;

const PRESCALER_MASK: u8 = 0x07;

/// Timer 1 in normal (free-running) mode.
pub struct CaptureTimer {
    _timer: PhantomData<TC1>,
}

impl CaptureTimer {
    /// Normal mode, counter cleared, clock stopped.
    pub fn new() -> Self {
        unsafe {
            let p = TC1::ptr();
            (*p).tccr1a.write(|w| w.bits(0));
            (*p).tccr1b.write(|w| w.bits(0));
            (*p).tcnt1.write(|w| w.bits(0));
        }
        Self { _timer: PhantomData }
    }

    pub fn start(&mut self, prescaler: Prescaler) {
        unsafe {
            (*TC1::ptr()).tccr1b.modify(|r, w| {
                w.bits((r.bits() & !PRESCALER_MASK) | (prescaler as u8 & PRESCALER_MASK))
            });
        }
    }

    pub fn stop(&mut self) {
        unsafe {
            (*TC1::ptr())
                .tccr1b
                .modify(|r, w| w.bits(r.bits() & !PRESCALER_MASK));
        }
    }

    /// Current tick count.
    pub fn read(&self) -> u16 {
        unsafe { (*TC1::ptr()).tcnt1.read().bits() }
    }

    /// Reset the counter register pair to zero.
    pub fn reset(&mut self) {
        unsafe {
            (*TC1::ptr()).tcnt1.write(|w| w.bits(0));
        }
    }

    pub fn enable_overflow_interrupt(&mut self) {
        unsafe {
            (*TC1::ptr())
                .timsk
                .modify(|r, w| w.bits(r.bits() | TOIE1));
        }
    }

    pub fn disable_overflow_interrupt(&mut self) {
        unsafe {
            (*TC1::ptr())
                .timsk
                .modify(|r, w| w.bits(r.bits() & !TOIE1));
        }
    }
}

impl Default for CaptureTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Software delay provider.
///
/// Calibrated nop loops; coarse, but the display settle times and refresh
/// pauses that use it only need orders of magnitude.
pub struct Delay;

// Loop iterations per microsecond; each iteration costs roughly four cycles.
const LOOPS_PER_US: u32 = CPU_FREQ_HZ / 4_000_000 + 1;

impl Delay {
    pub fn new() -> Self {
        Delay
    }

    fn spin_us(&self, us: u32) {
        for _ in 0..us * LOOPS_PER_US {
            avr_device::asm::nop();
        }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::new()
    }
}

impl DelayUs<u8> for Delay {
    fn delay_us(&mut self, us: u8) {
        self.spin_us(us as u32);
    }
}

impl DelayUs<u16> for Delay {
    fn delay_us(&mut self, us: u16) {
        self.spin_us(us as u32);
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            self.spin_us(1000);
        }
    }
}
