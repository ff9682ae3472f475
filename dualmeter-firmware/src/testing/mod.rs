//! On-target smoke tests for the measurement peripherals.
//!
//! Host-side behavior of the measurement and display logic is covered in
//! `dualmeter-core`; these cases only prove the peripherals respond on real
//! hardware. Run them with the `selftest` example binary.

use crate::drivers::SerialConsole;
use crate::hal::{Adc, AdcChannel, AdcPrescaler, AdcReference, CaptureTimer, Delay, Prescaler, Spi, SpiPrescaler};
use dualmeter_core::config::SAMPLE_MASK;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::spi::FullDuplex;

pub trait TestCase {
    fn run(&self) -> TestResult;
    fn name(&self) -> &'static str;
}

#[derive(PartialEq)]
pub enum TestResult {
    Pass,
    Fail(TestError),
}

#[derive(PartialEq)]
pub enum TestError {
    Timeout,
    HardwareFault,
}

pub struct TestRunner {
    console: SerialConsole,
    total: u32,
    passed: u32,
}

impl TestRunner {
    pub fn new() -> Self {
        Self {
            console: SerialConsole::new(),
            total: 0,
            passed: 0,
        }
    }

    pub fn run_suite(&mut self, name: &str, tests: &[&dyn TestCase]) {
        ufmt::uwriteln!(&mut self.console, "=== {} ===", name).ok();

        for test in tests {
            self.total += 1;
            match test.run() {
                TestResult::Pass => {
                    self.passed += 1;
                    ufmt::uwriteln!(&mut self.console, "{}: PASS", test.name()).ok();
                }
                TestResult::Fail(_) => {
                    ufmt::uwriteln!(&mut self.console, "{}: FAIL", test.name()).ok();
                }
            }
        }

        ufmt::uwriteln!(&mut self.console, "passed {}/{}", self.passed, self.total).ok();
    }
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for a condition with a bounded number of 1 ms polls.
#[macro_export]
macro_rules! assert_timeout {
    ($cond:expr, $timeout_ms:expr) => {
        let mut timeout: u16 = $timeout_ms;
        while !$cond {
            if timeout == 0 {
                return $crate::testing::TestResult::Fail($crate::testing::TestError::Timeout);
            }
            timeout -= 1;
            embedded_hal::blocking::delay::DelayMs::delay_ms(
                &mut $crate::hal::Delay::new(),
                1u16,
            );
        }
    };
}

/// A single conversion completes and yields an in-range sample.
pub struct AdcTest;

impl TestCase for AdcTest {
    fn name(&self) -> &'static str {
        "adc conversion"
    }

    fn run(&self) -> TestResult {
        let mut adc = Adc::new(AdcPrescaler::Div64, AdcReference::Internal2_56V);
        adc.select_channel(AdcChannel::Adc0);
        adc.start_conversion();

        assert_timeout!(adc.conversion_done(), 10);

        // Top nibble is reserved for the channel id and reads back empty.
        if adc.read_data() & !SAMPLE_MASK != 0 {
            return TestResult::Fail(TestError::HardwareFault);
        }
        TestResult::Pass
    }
}

/// The capture timer advances once started.
pub struct TimerTest;

impl TestCase for TimerTest {
    fn name(&self) -> &'static str {
        "capture timer"
    }

    fn run(&self) -> TestResult {
        let mut timer = CaptureTimer::new();
        timer.start(Prescaler::Direct);

        let start = timer.read();
        Delay::new().delay_ms(1u16);
        let end = timer.read();
        timer.stop();

        if end == start {
            return TestResult::Fail(TestError::HardwareFault);
        }
        TestResult::Pass
    }
}

/// A byte clocks out and the transfer-complete flag comes back.
pub struct SpiTest;

impl TestCase for SpiTest {
    fn name(&self) -> &'static str {
        "spi transfer"
    }

    fn run(&self) -> TestResult {
        let mut spi = Spi::new(SpiPrescaler::Div16);

        if spi.send(0xA5).is_err() {
            return TestResult::Fail(TestError::HardwareFault);
        }
        assert_timeout!(spi.read().is_ok(), 10);

        TestResult::Pass
    }
}
