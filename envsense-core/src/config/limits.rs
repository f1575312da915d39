//! Plausibility limits
//!
//! A converted value outside these bounds is treated as a bad read, not
//! as a real environmental condition.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// eTVOC full scale (ppb)
pub const ETVOC_MAX_PPB: u16 = 32768;

/// Bounds for CCS811 results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GasLimits {
    /// Lowest accepted eTVOC (ppb)
    pub min_etvoc_ppb: u16,
    /// Highest accepted eTVOC (ppb)
    pub max_etvoc_ppb: u16,
}

impl Default for GasLimits {
    fn default() -> Self {
        Self {
            min_etvoc_ppb: 0,
            max_etvoc_ppb: ETVOC_MAX_PPB,
        }
    }
}

impl GasLimits {
    /// Is `etvoc_ppb` inside the accepted range?
    pub const fn accepts_etvoc(&self, etvoc_ppb: u16) -> bool {
        etvoc_ppb >= self.min_etvoc_ppb && etvoc_ppb <= self.max_etvoc_ppb
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_etvoc_ppb > self.max_etvoc_ppb {
            return Err(ConfigError::InvertedRange);
        }
        Ok(())
    }
}

/// Bounds and calibration for humidity/temperature results
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClimateLimits {
    /// Lowest accepted temperature (°C)
    pub min_temperature_c: f32,
    /// Highest accepted temperature (°C)
    pub max_temperature_c: f32,
    /// Lowest accepted relative humidity (%)
    pub min_humidity_percent: f32,
    /// Highest accepted relative humidity (%)
    pub max_humidity_percent: f32,
    /// Added to every converted temperature before the range check
    ///
    /// The reference board reads about 1°C above neighbouring sensors.
    pub temperature_offset_c: f32,
}

impl Default for ClimateLimits {
    fn default() -> Self {
        Self {
            min_temperature_c: -40.0,
            max_temperature_c: 120.0,
            min_humidity_percent: 0.0,
            max_humidity_percent: 100.0,
            temperature_offset_c: -1.0,
        }
    }
}

impl ClimateLimits {
    /// Are both values inside the accepted ranges? Bounds are inclusive.
    pub fn accepts(&self, humidity_percent: f32, temperature_c: f32) -> bool {
        (self.min_temperature_c..=self.max_temperature_c).contains(&temperature_c)
            && (self.min_humidity_percent..=self.max_humidity_percent).contains(&humidity_percent)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = [
            self.min_temperature_c,
            self.max_temperature_c,
            self.min_humidity_percent,
            self.max_humidity_percent,
            self.temperature_offset_c,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::NonFiniteLimit);
        }
        if self.min_temperature_c > self.max_temperature_c
            || self.min_humidity_percent > self.max_humidity_percent
        {
            return Err(ConfigError::InvertedRange);
        }
        Ok(())
    }
}
