//! Measurement records and read failures
//!
//! A poll either yields a complete reading or a [`ReadError`] saying why
//! not. There is no partially valid reading: both values of a pair are
//! produced together or not at all.

use core::fmt;

/// Value written into both tuple positions when a poll failed
pub const SENTINEL: i32 = -1;

/// Raw sensor-current and ADC diagnostics from the CCS811 result block
///
/// Decoded but never validated; the values are not used in any conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawData {
    /// Current through the sensor (µA, 0-63)
    pub current_ua: u8,
    /// Voltage across the sensor, 10-bit ADC counts
    pub raw_adc: u16,
}

impl RawData {
    /// Decode the two trailing bytes of the result block
    ///
    /// Byte 0 bits 7..2 are the current, byte 0 bits 1..0 and byte 1 form
    /// the 10-bit ADC value.
    pub const fn from_bytes(bytes: [u8; 2]) -> Self {
        Self {
            current_ua: bytes[0] >> 2,
            raw_adc: (((bytes[0] & 0b0000_0011) as u16) << 8) | bytes[1] as u16,
        }
    }
}

/// Gas sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GasReading {
    /// Equivalent CO2 in ppm (datasheet range 400-29206, not enforced)
    pub eco2_ppm: u16,
    /// Equivalent total VOC in ppb (0-32768)
    pub etvoc_ppb: u16,
    /// Sensor current / ADC diagnostics
    pub raw: RawData,
}

/// Humidity and temperature reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateReading {
    /// Relative humidity in %
    pub humidity_percent: f32,
    /// Temperature in °C, calibration offset already applied
    pub temperature_c: f32,
}

/// Fault reported by the CCS811 ERROR_ID register
///
/// Listed in decode priority order: when several bits are set, the
/// earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GasFault {
    /// Write to an invalid register address or with an invalid length
    WriteRegInvalid,
    /// Read from an invalid register address
    ReadRegInvalid,
    /// Unsupported drive mode requested in MEAS_MODE
    MeasModeInvalid,
    /// Sensor resistance reached or exceeded the maximum range
    MaxResistance,
    /// Heater current out of range
    HeaterFault,
    /// Heater voltage not applied correctly
    HeaterSupply,
    /// Error flag set without any known ERROR_ID bit
    Unspecified(u8),
}

impl fmt::Display for GasFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteRegInvalid => f.write_str("WRITE_REG_INVALID"),
            Self::ReadRegInvalid => f.write_str("READ_REG_INVALID"),
            Self::MeasModeInvalid => f.write_str("MEASMODE_INVALID"),
            Self::MaxResistance => f.write_str("MAX_RESISTANCE"),
            Self::HeaterFault => f.write_str("HEATER_FAULT"),
            Self::HeaterSupply => f.write_str("HEATER_SUPPLY"),
            Self::Unspecified(id) => write!(f, "unknown error id {:#04x}", id),
        }
    }
}

/// Transient conditions where the device has nothing usable to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotReady {
    /// No new sample since the last read
    NoNewData,
    /// No valid application firmware loaded
    InvalidFirmware,
    /// Device still in boot mode
    NotApplicationMode,
    /// Conversion in progress
    Busy,
    /// Calibration coefficients not loaded
    CalibrationDisabled,
}

impl fmt::Display for NotReady {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoNewData => "no new data",
            Self::InvalidFirmware => "invalid application firmware",
            Self::NotApplicationMode => "not in application mode",
            Self::Busy => "busy",
            Self::CalibrationDisabled => "calibration not enabled",
        })
    }
}

/// Why a poll produced no reading
///
/// None of these are fatal; the caller polls again on its next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError {
    /// Bus transaction failed; the payload was not interpreted
    Transport,
    /// Device raised its error flag (a reset was attempted)
    DeviceFault(GasFault),
    /// Device not ready this cycle
    NotReady(NotReady),
    /// Converted values fell outside the plausibility limits
    Implausible,
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => f.write_str("bus transaction failed"),
            Self::DeviceFault(fault) => write!(f, "device fault: {}", fault),
            Self::NotReady(reason) => write!(f, "not ready: {}", reason),
            Self::Implausible => f.write_str("implausible value"),
        }
    }
}

impl From<GasFault> for ReadError {
    fn from(fault: GasFault) -> Self {
        Self::DeviceFault(fault)
    }
}

impl From<NotReady> for ReadError {
    fn from(reason: NotReady) -> Self {
        Self::NotReady(reason)
    }
}

/// Conversion into the `(a, b)` tuple a storage backend persists
///
/// A failed poll becomes `(-1, -1)`; a successful one is never partially
/// replaced by the sentinel.
pub trait SentinelPair {
    /// Element type of the tuple
    type Value;

    /// Flatten into a pair, using the sentinel for both fields on failure
    fn sentinel_pair(&self) -> (Self::Value, Self::Value);
}

impl SentinelPair for Result<GasReading, ReadError> {
    type Value = i32;

    fn sentinel_pair(&self) -> (i32, i32) {
        match self {
            Ok(r) => (r.eco2_ppm as i32, r.etvoc_ppb as i32),
            Err(_) => (SENTINEL, SENTINEL),
        }
    }
}

impl SentinelPair for Result<ClimateReading, ReadError> {
    type Value = f32;

    fn sentinel_pair(&self) -> (f32, f32) {
        match self {
            Ok(r) => (r.humidity_percent, r.temperature_c),
            Err(_) => (SENTINEL as f32, SENTINEL as f32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_data_split() {
        // current = 0b101010 (42 µA), adc = 0b11_0000_0001 (769)
        let raw = RawData::from_bytes([0b1010_1011, 0b0000_0001]);
        assert_eq!(raw.current_ua, 42);
        assert_eq!(raw.raw_adc, 769);

        let raw = RawData::from_bytes([0xFF, 0xFF]);
        assert_eq!(raw.current_ua, 63);
        assert_eq!(raw.raw_adc, 1023);
    }

    #[test]
    fn test_gas_sentinel_pair() {
        let ok: Result<GasReading, ReadError> = Ok(GasReading {
            eco2_ppm: 400,
            etvoc_ppb: 12,
            raw: RawData::default(),
        });
        assert_eq!(ok.sentinel_pair(), (400, 12));

        let err: Result<GasReading, ReadError> = Err(ReadError::Transport);
        assert_eq!(err.sentinel_pair(), (-1, -1));
    }

    #[test]
    fn test_climate_sentinel_pair() {
        let ok: Result<ClimateReading, ReadError> = Ok(ClimateReading {
            humidity_percent: 45.5,
            temperature_c: 21.25,
        });
        assert_eq!(ok.sentinel_pair(), (45.5, 21.25));

        let err: Result<ClimateReading, ReadError> = Err(ReadError::Implausible);
        assert_eq!(err.sentinel_pair(), (-1.0, -1.0));
    }

    #[test]
    fn test_error_conversions() {
        assert_eq!(
            ReadError::from(GasFault::HeaterFault),
            ReadError::DeviceFault(GasFault::HeaterFault)
        );
        assert_eq!(
            ReadError::from(NotReady::Busy),
            ReadError::NotReady(NotReady::Busy)
        );
    }
}
