//! SPI master used for the display link.

use avr_device::atmega128::{PORTB, SPI};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::spi::FullDuplex;

/// SPI clock prescaler options
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum SpiPrescaler {
    Div4 = 0,
    Div16 = 1,
    Div64 = 2,
    Div128 = 3,
}

// SPCR bit positions
const SPE: u8 = 1 << 6;
const MSTR: u8 = 1 << 4;

// SPSR transfer-complete flag
const SPIF: u8 = 1 << 7;

/// SPI peripheral driver, master mode 0, MSB first.
pub struct Spi {
    _spi: PhantomData<SPI>,
}

impl Spi {
    /// Take the SPI peripheral as bus master with the given clock divider.
    pub fn new(prescaler: SpiPrescaler) -> Self {
        unsafe {
            // SS, SCK and MOSI are driven by the master
            (*PORTB::ptr())
                .ddrb
                .modify(|r, w| w.bits(r.bits() | 0x07));

            (*SPI::ptr())
                .spcr
                .write(|w| w.bits(SPE | MSTR | (prescaler as u8 & 0x03)));
        }
        Self { _spi: PhantomData }
    }
}

impl FullDuplex<u8> for Spi {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Infallible> {
        unsafe {
            let p = SPI::ptr();
            if (*p).spsr.read().bits() & SPIF == 0 {
                return Err(nb::Error::WouldBlock);
            }
            Ok((*p).spdr.read().bits())
        }
    }

    fn send(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        unsafe {
            (*SPI::ptr()).spdr.write(|w| w.bits(byte));
        }
        Ok(())
    }
}

// Blocking writes in terms of the nb transfer above
impl embedded_hal::blocking::spi::write::Default<u8> for Spi {}
