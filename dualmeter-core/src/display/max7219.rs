//! Driver for the MAX7219 serially interfaced display.
//!
//! Every register write is a two-byte transaction framed by the LOAD
//! (chip-select) line: address byte, short settle delay, data byte. The
//! driver is generic over `embedded-hal` SPI, pin and delay traits so the
//! wire protocol can be exercised against an in-memory bus.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::blocking::spi::Write;
use embedded_hal::digital::v2::OutputPin;

/// Control registers on the display device.
#[derive(Clone, Copy)]
#[repr(u8)]
pub enum Register {
    DecodeMode = 9,
    Intensity = 10,
    ScanLimit = 11,
    Shutdown = 12,
    DisplayTest = 15,
}

/// BCD decode enabled on every digit.
const DECODE_ALL: u8 = 0xFF;

/// Settle time between the address and data bytes of one transaction.
const INTER_BYTE_DELAY_US: u8 = 2;

#[derive(Debug, PartialEq)]
pub enum DisplayError<SE, PE> {
    /// SPI transfer failed.
    Bus(SE),
    /// The chip-select line could not be driven.
    ChipSelect(PE),
}

pub struct Max7219<SPI, LOAD> {
    spi: SPI,
    load: LOAD,
    digits: u8,
}

impl<SPI, LOAD, SE, PE> Max7219<SPI, LOAD>
where
    SPI: Write<u8, Error = SE>,
    LOAD: OutputPin<Error = PE>,
{
    /// A display using `digits` of the 8 digit registers.
    pub fn new(spi: SPI, load: LOAD, digits: u8) -> Self {
        Self { spi, load, digits }
    }

    /// Write one register: chip-select low, address byte, settle delay,
    /// data byte, chip-select high.
    pub fn send<D: DelayUs<u8>>(
        &mut self,
        address: u8,
        value: u8,
        delay: &mut D,
    ) -> Result<(), DisplayError<SE, PE>> {
        self.load.set_low().map_err(DisplayError::ChipSelect)?;
        self.spi.write(&[address]).map_err(DisplayError::Bus)?;
        delay.delay_us(INTER_BYTE_DELAY_US);
        self.spi.write(&[value]).map_err(DisplayError::Bus)?;
        self.load.set_high().map_err(DisplayError::ChipSelect)?;
        Ok(())
    }

    /// Power-up sequence: BCD decode everywhere, leave shutdown, normal
    /// operation, intensity and scan limit matched to the digits in use.
    pub fn init<D: DelayUs<u8>>(&mut self, delay: &mut D) -> Result<(), DisplayError<SE, PE>> {
        self.send(Register::DecodeMode as u8, DECODE_ALL, delay)?;
        self.send(Register::Shutdown as u8, 1, delay)?;
        self.send(Register::DisplayTest as u8, 0, delay)?;
        self.send(Register::Intensity as u8, self.digits, delay)?;
        self.send(Register::ScanLimit as u8, self.digits - 1, delay)?;
        Ok(())
    }

    /// Show an unsigned value, least significant digit in register 1.
    ///
    /// Digits past the value's natural width are sent as 0; digits past the
    /// display width are silently lost.
    pub fn display_number<D: DelayUs<u8>>(
        &mut self,
        mut value: u32,
        delay: &mut D,
    ) -> Result<(), DisplayError<SE, PE>> {
        for address in 1..=self.digits {
            self.send(address, (value % 10) as u8, delay)?;
            value /= 10;
        }
        Ok(())
    }

    /// Give the bus and chip-select line back.
    pub fn release(self) -> (SPI, LOAD) {
        (self.spi, self.load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh0::delay::NoopDelay as MockNoop;
    use embedded_hal_mock::eh0::pin::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh0::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    fn cs_frame() -> [PinTransaction; 2] {
        [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ]
    }

    /// Expected bus traffic for one register write.
    fn write_frame(address: u8, value: u8) -> [SpiTransaction; 2] {
        [
            SpiTransaction::write(vec![address]),
            SpiTransaction::write(vec![value]),
        ]
    }

    #[test]
    fn send_frames_address_then_data() {
        let spi = SpiMock::new(&write_frame(Register::DecodeMode as u8, DECODE_ALL));
        let load = PinMock::new(&cs_frame());
        let mut display = Max7219::new(spi, load, 8);

        display
            .send(Register::DecodeMode as u8, DECODE_ALL, &mut MockNoop::new())
            .unwrap();

        let (mut spi, mut load) = display.release();
        spi.done();
        load.done();
    }

    #[test]
    fn init_sends_the_startup_sequence_in_order() {
        let digits = 6u8;
        let mut expected = Vec::new();
        for (address, value) in [
            (Register::DecodeMode as u8, DECODE_ALL),
            (Register::Shutdown as u8, 1),
            (Register::DisplayTest as u8, 0),
            (Register::Intensity as u8, digits),
            (Register::ScanLimit as u8, digits - 1),
        ] {
            expected.extend(write_frame(address, value));
        }
        let mut pins = Vec::new();
        for _ in 0..5 {
            pins.extend(cs_frame());
        }

        let spi = SpiMock::new(&expected);
        let load = PinMock::new(&pins);
        let mut display = Max7219::new(spi, load, digits);

        display.init(&mut MockNoop::new()).unwrap();

        let (mut spi, mut load) = display.release();
        spi.done();
        load.done();
    }

    #[test]
    fn display_number_emits_decimal_digits_low_first() {
        let mut expected = Vec::new();
        // 1250 on 8 digits: 0,5,2,1 then four leading zeroes.
        for (address, digit) in [(1, 0), (2, 5), (3, 2), (4, 1), (5, 0), (6, 0), (7, 0), (8, 0)] {
            expected.extend(write_frame(address, digit));
        }
        let mut pins = Vec::new();
        for _ in 0..8 {
            pins.extend(cs_frame());
        }

        let spi = SpiMock::new(&expected);
        let load = PinMock::new(&pins);
        let mut display = Max7219::new(spi, load, 8);

        display.display_number(1250, &mut MockNoop::new()).unwrap();

        let (mut spi, mut load) = display.release();
        spi.done();
        load.done();
    }

    /// Decode a digit-register transcript back into a number: the inverse
    /// of the repeated `%10, /10` decomposition.
    fn decode(digits: &[(u8, u8)]) -> u32 {
        let mut value = 0u32;
        for &(address, digit) in digits.iter().rev() {
            assert!(address >= 1);
            value = value * 10 + digit as u32;
        }
        value
    }

    #[test]
    fn digit_decomposition_round_trips_modulo_display_width() {
        for (value, digits) in [(1152u32, 6u8), (1250, 8), (0, 6), (99_999_999, 8), (1_234_567, 6)] {
            let sent: Vec<(u8, u8)> = {
                let mut v = value;
                (1..=digits)
                    .map(|address| {
                        let d = (v % 10) as u8;
                        v /= 10;
                        (address, d)
                    })
                    .collect()
            };
            let modulus = 10u32.pow(digits as u32);
            assert_eq!(decode(&sent), value % modulus);
        }
    }

    #[test]
    fn values_wider_than_the_display_lose_high_digits() {
        let mut expected = Vec::new();
        // 1_234_567 on 6 digits: the leading "1" is never sent.
        for (address, digit) in [(1, 7), (2, 6), (3, 5), (4, 4), (5, 3), (6, 2)] {
            expected.extend(write_frame(address, digit));
        }
        let mut pins = Vec::new();
        for _ in 0..6 {
            pins.extend(cs_frame());
        }

        let spi = SpiMock::new(&expected);
        let load = PinMock::new(&pins);
        let mut display = Max7219::new(spi, load, 6);

        display.display_number(1_234_567, &mut MockNoop::new()).unwrap();

        let (mut spi, mut load) = display.release();
        spi.done();
        load.done();
    }
}
