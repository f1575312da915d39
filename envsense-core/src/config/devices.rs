//! Per-device configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::limits::{ClimateLimits, GasLimits};
use super::ConfigError;

/// CCS811 default address (ADDR pin low)
pub const CCS811_ADDRESS: u8 = 0x5A;

/// CCS811 alternate address (ADDR pin high)
pub const CCS811_ALT_ADDRESS: u8 = 0x5B;

/// Humidity/temperature sensor address
pub const MAX30102_ADDRESS: u8 = 0x57;

/// Highest 7-bit address
///
/// Mirrors `envsense_hal::device::MAX_ADDRESS`; this crate does not depend
/// on the bus layer, so configuration is checked here before any driver
/// builds its `Address`.
pub const MAX_ADDRESS: u8 = 0x7F;

fn check_address(address: u8) -> Result<(), ConfigError> {
    if address > MAX_ADDRESS {
        return Err(ConfigError::InvalidAddress(address));
    }
    Ok(())
}

/// CCS811 gas sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Ccs811Config {
    /// Bus index the sensor is wired to
    pub bus: u8,
    /// 7-bit address
    pub address: u8,
    /// Plausibility limits
    pub limits: GasLimits,
}

impl Default for Ccs811Config {
    fn default() -> Self {
        Self {
            bus: 0,
            address: CCS811_ADDRESS,
            limits: GasLimits::default(),
        }
    }
}

/// Humidity/temperature sensor configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Max30102Config {
    /// Bus index the sensor is wired to
    pub bus: u8,
    /// 7-bit address
    pub address: u8,
    /// Plausibility limits and temperature calibration
    pub limits: ClimateLimits,
}

impl Default for Max30102Config {
    fn default() -> Self {
        Self {
            bus: 0,
            address: MAX30102_ADDRESS,
            limits: ClimateLimits::default(),
        }
    }
}

/// Complete sensor configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorConfig {
    pub ccs811: Ccs811Config,
    pub max30102: Max30102Config,
}

impl SensorConfig {
    /// Check addresses and limit ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_address(self.ccs811.address)?;
        self.ccs811.limits.validate()?;
        check_address(self.max30102.address)?;
        self.max30102.limits.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SensorConfig::default();
        assert_eq!(config.ccs811.address, 0x5A);
        assert_eq!(config.max30102.address, 0x57);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_wide_address_rejected() {
        let mut config = SensorConfig::default();
        config.max30102.address = 0xAE; // 8-bit write address by mistake
        assert_eq!(config.validate(), Err(ConfigError::InvalidAddress(0xAE)));
    }

    #[test]
    fn test_address_boundary() {
        let mut config = SensorConfig::default();
        config.ccs811.address = MAX_ADDRESS;
        assert_eq!(config.validate(), Ok(()));

        config.ccs811.address = MAX_ADDRESS + 1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidAddress(0x80)));
    }
}
