//! Envsense Hardware Abstraction Layer
//!
//! This crate defines the bus capability the sensor drivers are written
//! against. Drivers never talk to a chip-specific peripheral directly; they
//! receive something implementing [`i2c::I2cBus`] and address one device on
//! it through an [`device::I2cDevice`] handle.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  envsense-drivers (CCS811, MAX30102)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  envsense-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  test / host  │
//! │  I2c adapter  │       │   mock bus    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod device;
pub mod i2c;

// Re-export key types at crate root for convenience
pub use device::{Address, AddressError, I2cDevice};
pub use i2c::{EmbeddedHalBus, I2cBus};
