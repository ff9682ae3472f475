pub mod adc;
pub mod gpio;
pub mod spi;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use adc::{Adc, AdcChannel, AdcPrescaler, AdcReference};
pub use gpio::{board, Input, Output, Pin};
pub use spi::{Spi, SpiPrescaler};
pub use timer::{CaptureTimer, Delay, Prescaler};
pub use uart::Uart;
