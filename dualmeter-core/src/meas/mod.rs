//! Shared measurement state.
//!
//! Each accumulator has exactly one interrupt-context writer (the `record_*`
//! operations) and one control-loop owner (the `poll_average` snapshot step).
//! The structs are plain state machines with no hardware dependencies; the
//! firmware wraps them in `Mutex<RefCell<...>>` statics and calls them from
//! its interrupt handlers, with the snapshot executed inside a critical
//! section so no event is lost or double-counted.

pub mod frequency;
pub mod voltage;

pub use frequency::{frequency_hz, PeriodCapture};
pub use voltage::{scale_millivolts, SampleAccumulator};
