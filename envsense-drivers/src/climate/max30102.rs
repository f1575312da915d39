//! Humidity/temperature sensor at address 0x57
//!
//! Sold on the same breakout as a MAX30102 pulse sensor, but the part this
//! driver talks to answers a trigger-and-read humidity/temperature
//! protocol:
//!
//! 1. Write the trigger command.
//! 2. Wait for the conversion (at least 80 ms; this driver waits 100 ms).
//! 3. Read 7 bytes: status, 20-bit humidity, 20-bit temperature, CRC.
//!
//! ```text
//! byte  1        2        3        4        5
//!       HHHHHHHH HHHHHHHH HHHHTTTT TTTTTTTT TTTTTTTT
//! ```
//!
//! Status bit 7 means a conversion is still running; bit 3 means the
//! calibration coefficients are loaded. The CRC byte is not checked.

use embedded_hal::delay::DelayNs;
use envsense_core::config::{ClimateLimits, Max30102Config};
use envsense_core::flags::is_set;
use envsense_core::traits::ClimateSensor;
use envsense_core::{
    ClimateReading, DeviceKind, DiagnosticSink, Event, NotReady, ReadError, Record, Severity,
};
use envsense_hal::{Address, AddressError, I2cBus, I2cDevice};

use crate::SETTLE_DELAY_MS;

/// Initialization: load calibration coefficients
///
/// AHT-family command assumed for this board.
pub const INIT_SEQUENCE: [u8; 3] = [0xBE, 0x08, 0x00];

/// Start one humidity/temperature conversion
///
/// AHT-family command assumed for this board.
pub const TRIGGER_SEQUENCE: [u8; 3] = [0xAC, 0x33, 0x00];

/// Status register
///
/// AHT-family register assumed for this board.
pub const STATUS_REGISTER: u8 = 0x71;

/// Soft reset command
///
/// AHT-family command assumed for this board.
pub const SOFT_RESET_SEQUENCE: [u8; 1] = [0xBA];

/// Measurement block length (status, 5 data bytes, CRC)
pub const RESULT_LEN: usize = 7;

/// STATUS register bit positions
pub mod status_bits {
    pub const CALIBRATED: u8 = 3;
    pub const BUSY: u8 = 7;
}

/// Full scale of the 20-bit raw fields
const RAW_FULL_SCALE: f32 = (1u32 << 20) as f32;

/// Decode a status byte without side effects
///
/// Busy is checked before calibration.
pub fn decode_status(status: u8) -> Result<(), NotReady> {
    if is_set(status, status_bits::BUSY) {
        Err(NotReady::Busy)
    } else if !is_set(status, status_bits::CALIBRATED) {
        Err(NotReady::CalibrationDisabled)
    } else {
        Ok(())
    }
}

/// 20-bit humidity field: byte 1, byte 2, high nibble of byte 3
pub fn unpack_humidity_raw(data: &[u8; RESULT_LEN]) -> u32 {
    ((data[1] as u32) << 12) | ((data[2] as u32) << 4) | ((data[3] as u32) >> 4)
}

/// 20-bit temperature field: low nibble of byte 3, byte 4, byte 5
pub fn unpack_temperature_raw(data: &[u8; RESULT_LEN]) -> u32 {
    (((data[3] & 0x0F) as u32) << 16) | ((data[4] as u32) << 8) | data[5] as u32
}

/// Relative humidity in % from the raw field
pub fn humidity_from_raw(raw: u32) -> f32 {
    raw as f32 / RAW_FULL_SCALE * 100.0
}

/// Uncalibrated temperature in °C from the raw field
pub fn temperature_from_raw(raw: u32) -> f32 {
    raw as f32 / RAW_FULL_SCALE * 200.0 - 50.0
}

/// Convert a measurement block, applying the temperature offset after
/// scaling. No range check.
pub fn convert_result(data: &[u8; RESULT_LEN], temperature_offset_c: f32) -> ClimateReading {
    ClimateReading {
        humidity_percent: humidity_from_raw(unpack_humidity_raw(data)),
        temperature_c: temperature_from_raw(unpack_temperature_raw(data)) + temperature_offset_c,
    }
}

/// Humidity/temperature sensor driver
pub struct Max30102<B, D, S> {
    device: I2cDevice<B>,
    delay: D,
    sink: S,
    limits: ClimateLimits,
}

impl<B: I2cBus, D: DelayNs, S: DiagnosticSink> Max30102<B, D, S> {
    /// Create a new driver with default limits and calibration
    pub fn new(device: I2cDevice<B>, delay: D, sink: S) -> Self {
        Self {
            device,
            delay,
            sink,
            limits: ClimateLimits::default(),
        }
    }

    /// Create a driver from configuration
    pub fn from_config(
        bus: B,
        config: &Max30102Config,
        delay: D,
        sink: S,
    ) -> Result<Self, AddressError> {
        let address = Address::new(config.address)?;
        let device = I2cDevice::new(bus, config.bus, address);
        Ok(Self::new(device, delay, sink).with_limits(config.limits))
    }

    /// Replace the plausibility limits and temperature offset
    pub fn with_limits(mut self, limits: ClimateLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Get access to the plausibility limits and temperature offset
    pub fn limits(&self) -> &ClimateLimits {
        &self.limits
    }

    /// Get access to the device handle
    pub fn device(&self) -> &I2cDevice<B> {
        &self.device
    }

    /// Get access to the diagnostic sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get mutable access to the diagnostic sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Get access to the delay provider
    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Give back the device handle, delay and sink
    pub fn release(self) -> (I2cDevice<B>, D, S) {
        (self.device, self.delay, self.sink)
    }

    fn report(&mut self, severity: Severity, event: Event) {
        self.sink
            .report(Record::new(severity, DeviceKind::Max30102, event));
    }

    fn transport_failure(&mut self) -> ReadError {
        self.report(Severity::Debug, Event::TransportFailure);
        ReadError::Transport
    }

    /// Send the init sequence and let the device settle
    ///
    /// Best-effort; bus errors are reported to the sink and swallowed.
    pub fn initialize(&mut self) {
        match self.device.write(&INIT_SEQUENCE) {
            Ok(()) => self.report(Severity::Info, Event::Initialized),
            Err(_) => self.report(Severity::Debug, Event::TransportFailure),
        }
        self.delay.delay_ms(SETTLE_DELAY_MS);
    }

    /// Soft reset, used after an implausible reading
    pub fn soft_reset(&mut self) {
        match self.device.write(&SOFT_RESET_SEQUENCE) {
            Ok(()) => self.report(Severity::Info, Event::SoftReset),
            Err(_) => self.report(Severity::Debug, Event::TransportFailure),
        }
        self.delay.delay_ms(SETTLE_DELAY_MS);
    }

    /// Read the status byte
    pub fn read_status(&mut self) -> Result<u8, ReadError> {
        let mut status = [0u8; 1];
        self.device
            .write_read(STATUS_REGISTER, &mut status)
            .map_err(|_| self.transport_failure())?;
        Ok(status[0])
    }

    /// Check a status byte
    ///
    /// Busy is reported and left alone. Missing calibration is reported
    /// and the init sequence is re-sent once to recover.
    pub fn check_status(&mut self, status: u8) -> Result<(), ReadError> {
        match decode_status(status) {
            Ok(()) => Ok(()),
            Err(NotReady::CalibrationDisabled) => {
                self.report(
                    Severity::Warning,
                    Event::NotReady(NotReady::CalibrationDisabled),
                );
                self.report(Severity::Warning, Event::RecoveryAttempted);
                self.initialize();
                Err(ReadError::NotReady(NotReady::CalibrationDisabled))
            }
            Err(reason) => {
                self.report(Severity::Warning, Event::NotReady(reason));
                Err(ReadError::NotReady(reason))
            }
        }
    }

    /// Trigger a conversion and read humidity/temperature
    ///
    /// Both values are returned together or not at all. A reading outside
    /// the plausibility limits triggers a soft reset.
    pub fn read_climate(&mut self) -> Result<ClimateReading, ReadError> {
        self.device
            .write(&TRIGGER_SEQUENCE)
            .map_err(|_| self.transport_failure())?;

        self.delay.delay_ms(SETTLE_DELAY_MS);

        let mut data = [0u8; RESULT_LEN];
        self.device
            .read(&mut data)
            .map_err(|_| self.transport_failure())?;

        self.check_status(data[0])?;

        let reading = convert_result(&data, self.limits.temperature_offset_c);
        if !self
            .limits
            .accepts(reading.humidity_percent, reading.temperature_c)
        {
            self.report(Severity::Warning, Event::Implausible);
            self.soft_reset();
            return Err(ReadError::Implausible);
        }

        Ok(reading)
    }
}

impl<B: I2cBus, D: DelayNs, S: DiagnosticSink> ClimateSensor for Max30102<B, D, S> {
    fn initialize(&mut self) {
        Max30102::initialize(self)
    }

    fn read_climate(&mut self) -> Result<ClimateReading, ReadError> {
        Max30102::read_climate(self)
    }
}
