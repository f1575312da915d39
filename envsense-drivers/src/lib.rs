//! Sensor driver implementations
//!
//! This crate provides concrete implementations of the sensor traits
//! defined in envsense-core:
//!
//! - Gas sensor (CCS811 eCO2/eTVOC)
//! - Humidity/temperature sensor (0x57 board)
//!
//! Both drivers follow the same shape: initialize, trigger or read,
//! decode status, convert, validate, and recover on fault. They block the
//! caller for the whole transaction plus the fixed settle delays, and do
//! no locking; callers sharing one physical bus must serialize the calls.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod climate;
pub mod gas;

#[cfg(test)]
mod mock;

pub use climate::Max30102;
pub use gas::Ccs811;

/// Minimum time to let a device settle after a mode switch, reset or
/// conversion trigger (ms)
///
/// Both devices are driven with fixed delays instead of polling a ready
/// bit, so a caller scheduling polls must leave at least this long
/// between command phases.
pub const SETTLE_DELAY_MS: u32 = 100;
