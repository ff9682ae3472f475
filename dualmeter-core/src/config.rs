//! Configuration constants for the measurement paths.

/// System clock frequency in Hz (11.0592 MHz crystal).
pub const CLOCK_HZ: u32 = 11_059_200;

/// Number of ADC samples averaged per voltage reading.
pub const SAMPLE_TARGET: u16 = 1024;

/// log2 of `SAMPLE_TARGET`, for the exact power-of-two division.
pub const SAMPLE_TARGET_LOG2: u32 = 10;

/// Number of half-periods averaged per frequency reading.
pub const PULSE_TARGET: u16 = 512;

/// log2 of `PULSE_TARGET`.
pub const PULSE_TARGET_LOG2: u32 = 9;

/// ADC resolution in bits.
pub const ADC_RESOLUTION_BITS: u32 = 12;

/// The low 12 bits of the data register hold the sample; the top nibble
/// carries the channel id and must be discarded.
pub const SAMPLE_MASK: u16 = 0x0FFF;

/// Reference voltage in millivolts.
pub const VREF_MV: u32 = 2500;

/// Full-scale tick range of the 16-bit capture timer.
pub const TIMER_RANGE: u32 = 65_536;

/// Display digits used by the voltage meter.
pub const VOLT_DIGITS: u8 = 8;

/// Display digits used by the frequency counter.
pub const FREQ_DIGITS: u8 = 6;
