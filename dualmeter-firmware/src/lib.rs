//! ATmega128 platform adapter for the dualmeter measurement core.
//!
//! Thin register-level wrappers around the peripherals the two measurement
//! binaries use, plus the serial console and on-target smoke tests. The
//! interrupt handlers themselves live in the binaries; everything here is
//! callable from both interrupt and loop context.

#![no_std]

pub mod config;
pub mod drivers;
pub mod hal;
pub mod testing;
