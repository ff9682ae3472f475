//! Polled USART0 used by the serial console.

use crate::config::UBRR_VALUE;
use avr_device::atmega128::USART0;
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::serial;

// UCSR0A status flags
const RXC: u8 = 1 << 7;
const UDRE: u8 = 1 << 5;

// UCSR0B enables
const RXEN: u8 = 1 << 4;
const TXEN: u8 = 1 << 3;

// UCSR0C frame format: 8 data bits, 1 stop bit
const FRAME_8N1: u8 = 0x06;

pub struct Uart {
    _usart: PhantomData<USART0>,
}

impl Uart {
    /// Enable transmitter and receiver at the configured baud rate.
    pub fn new() -> Self {
        unsafe {
            let p = USART0::ptr();
            (*p).ubrr0h.write(|w| w.bits((UBRR_VALUE >> 8) as u8));
            (*p).ubrr0l.write(|w| w.bits(UBRR_VALUE as u8));
            (*p).ucsr0c.write(|w| w.bits(FRAME_8N1));
            (*p).ucsr0b.write(|w| w.bits(RXEN | TXEN));
        }
        Self { _usart: PhantomData }
    }
}

impl Default for Uart {
    fn default() -> Self {
        Self::new()
    }
}

impl serial::Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Infallible> {
        unsafe {
            let p = USART0::ptr();
            if (*p).ucsr0a.read().bits() & UDRE == 0 {
                return Err(nb::Error::WouldBlock);
            }
            (*p).udr0.write(|w| w.bits(byte));
        }
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Infallible> {
        unsafe {
            if (*USART0::ptr()).ucsr0a.read().bits() & UDRE == 0 {
                return Err(nb::Error::WouldBlock);
            }
        }
        Ok(())
    }
}

impl serial::Read<u8> for Uart {
    type Error = Infallible;

    fn read(&mut self) -> nb::Result<u8, Infallible> {
        unsafe {
            let p = USART0::ptr();
            if (*p).ucsr0a.read().bits() & RXC == 0 {
                return Err(nb::Error::WouldBlock);
            }
            Ok((*p).udr0.read().bits())
        }
    }
}
