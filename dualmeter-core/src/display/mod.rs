//! Display output path: digit encoding over the serial display link.

pub mod max7219;

pub use max7219::{DisplayError, Max7219, Register};
