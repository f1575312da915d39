//! Board-agnostic core for the Envsense sensor drivers
//!
//! This crate contains everything the drivers share that does not depend
//! on a bus or a specific device:
//!
//! - Measurement records and the typed failure taxonomy
//! - The diagnostic-sink capability drivers report through
//! - Ordered flag-table decoding for status and error registers
//! - Plausibility limits and device configuration
//! - Sensor traits implemented by the drivers

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod diagnostics;
pub mod flags;
pub mod measurement;
pub mod traits;

pub use diagnostics::{DeviceKind, DiagnosticSink, Event, Record, Severity};
pub use measurement::{
    ClimateReading, GasFault, GasReading, NotReady, RawData, ReadError, SentinelPair,
};
