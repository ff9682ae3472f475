use avr_device::atmega128::{PORTB, PORTE};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::OutputPin;

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

/// Typestate handle on a single port pin.
pub struct Pin<PORT, const P: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

impl<PORT, const P: u8, MODE> Default for Pin<PORT, P, MODE> {
    fn default() -> Self {
        Pin {
            _port: PhantomData,
            _mode: PhantomData,
        }
    }
}

macro_rules! impl_port {
    ($PORT:ident, $ddr:ident, $port:ident, $pin:ident) => {
        impl<const P: u8, MODE: PinMode> Pin<$PORT, P, MODE> {
            pub fn into_output(self) -> Pin<$PORT, P, Output> {
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin::default()
            }

            pub fn into_input(self) -> Pin<$PORT, P, Input> {
                // Clear the direction bit and disable the pull-up
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
                Pin::default()
            }
        }

        impl<const P: u8> Pin<$PORT, P, Output> {
            #[inline]
            pub fn set_state(&mut self, high: bool) {
                unsafe {
                    if high {
                        (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                    } else {
                        (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    }
                }
            }
        }

        impl<const P: u8> OutputPin for Pin<$PORT, P, Output> {
            type Error = Infallible;

            fn set_low(&mut self) -> Result<(), Infallible> {
                self.set_state(false);
                Ok(())
            }

            fn set_high(&mut self) -> Result<(), Infallible> {
                self.set_state(true);
                Ok(())
            }
        }

        impl<const P: u8> Pin<$PORT, P, Input> {
            #[inline]
            pub fn is_high(&self) -> bool {
                unsafe { ((*$PORT::ptr()).$pin.read().bits() & (1 << P)) != 0 }
            }

            #[inline]
            pub fn is_low(&self) -> bool {
                !self.is_high()
            }
        }
    };
}

impl_port!(PORTB, ddrb, portb, pinb);
impl_port!(PORTE, ddre, porte, pine);

// Board wiring
pub mod board {
    use super::*;

    /// MAX7219 LOAD (chip-select) line, on the SPI SS pin.
    pub type DisplayLoad = Pin<PORTB, 0, Output>;

    /// Comparator output carrying the squared input waveform (INT4).
    pub type FreqInput = Pin<PORTE, 4, Input>;
}
