//! Gas and climate sensor traits

use crate::measurement::{ClimateReading, GasReading, ReadError};

/// Trait for eCO2/eTVOC sensors
pub trait GasSensor {
    /// Bring the device into measuring state
    ///
    /// Best-effort: bus failures are reported to the driver's diagnostic
    /// sink, not returned.
    fn initialize(&mut self);

    /// Read the latest eCO2/eTVOC result
    ///
    /// Takes `&mut self` because a read may trigger device recovery.
    fn read_gas(&mut self) -> Result<GasReading, ReadError>;

    /// Feed ambient humidity (%) and temperature (°C) for compensation
    ///
    /// Sensors without compensation support ignore this.
    fn set_environment(&mut self, _humidity_percent: f32, _temperature_c: f32) {}
}

/// Trait for humidity/temperature sensors
pub trait ClimateSensor {
    /// Send the device's init sequence
    fn initialize(&mut self);

    /// Trigger a conversion and read the result
    fn read_climate(&mut self) -> Result<ClimateReading, ReadError>;

    /// Read only the temperature in °C
    fn read_celsius(&mut self) -> Result<f32, ReadError> {
        self.read_climate().map(|r| r.temperature_c)
    }
}
