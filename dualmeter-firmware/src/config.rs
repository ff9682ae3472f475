//! Board configuration for the ATmega128 build.

use dualmeter_core::config::CLOCK_HZ;

/// CPU frequency in Hz; the capture timer and UART both divide this clock.
pub const CPU_FREQ_HZ: u32 = CLOCK_HZ;

/// UART baud rate for the serial console.
pub const UART_BAUD: u32 = 9600;

/// USART0 baud register value for the configured rate.
pub const UBRR_VALUE: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16;
