//! Humidity/temperature sensor drivers

pub mod max30102;

pub use max30102::Max30102;
