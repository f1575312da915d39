//! Sensor traits
//!
//! These traits define the interface between a polling consumer and the
//! device drivers.

pub mod sensor;

pub use sensor::{ClimateSensor, GasSensor};
