//! CCS811 digital gas sensor (eCO2 / eTVOC)
//!
//! The CCS811 (sold as the CJMCU-811 board) reports equivalent CO2 in ppm
//! (400-29206) and equivalent total VOC in ppb (0-32768). Both values are
//! derived from one metal-oxide element; eCO2 is computed from eTVOC, so
//! the two move together.
//!
//! # Protocol
//!
//! - Boots into a bootloader; writing APP_START switches it to the
//!   measurement firmware.
//! - MEAS_MODE selects the drive mode. This driver uses mode 1 (one sample
//!   per second) with the interrupt and threshold features disabled.
//! - ALG_RESULT_DATA is read as one 8-byte block:
//!   eCO2 hi/lo, eTVOC hi/lo, STATUS, ERROR_ID, current+ADC hi, ADC lo.
//! - Register reads must use a combined write-read transaction. Selecting
//!   the register with a separate write does not work on this part.
//!
//! # Status
//!
//! | bit | meaning                                  |
//! |-----|------------------------------------------|
//! | 0   | ERROR: details in ERROR_ID               |
//! | 3   | DATA_READY: new sample available         |
//! | 4   | APP_VALID: application firmware loaded   |
//! | 7   | FW_MODE: running application firmware    |
//!
//! An error flag takes precedence over everything else and triggers a
//! full recovery (soft reset, then initialize).

use embedded_hal::delay::DelayNs;
use envsense_core::config::{Ccs811Config, GasLimits};
use envsense_core::flags::{bit, first_clear, first_set, is_set, FlagRule};
use envsense_core::traits::GasSensor;
use envsense_core::{
    DeviceKind, DiagnosticSink, Event, GasFault, GasReading, NotReady, RawData, ReadError,
    Record, Severity,
};
use envsense_hal::{Address, AddressError, I2cBus, I2cDevice};

use crate::SETTLE_DELAY_MS;

/// CCS811 register addresses
pub mod reg {
    /// Measurement mode and conditions
    pub const MEAS_MODE: u8 = 0x01;
    /// eCO2, eTVOC, STATUS, ERROR_ID and raw data (8 bytes)
    pub const ALG_RESULT_DATA: u8 = 0x02;
    /// Humidity and temperature for compensation (4 bytes)
    pub const ENV_DATA: u8 = 0x05;
    /// Boot mode: start the application firmware
    pub const APP_START: u8 = 0xF4;
    /// Software reset (4-byte key)
    pub const SW_RESET: u8 = 0xFF;
}

/// STATUS register bit positions
pub mod status_bits {
    pub const ERROR: u8 = 0;
    pub const DATA_READY: u8 = 3;
    pub const APP_VALID: u8 = 4;
    pub const FW_MODE: u8 = 7;
}

/// MEAS_MODE value: drive mode 1 (every second), nINT off, no thresholds
///
/// Layout: `0 DDD I T 00` (reserved, drive mode, interrupt, threshold).
pub const MEAS_MODE_CONFIG: u8 = 0b0001_0000;

/// SW_RESET register followed by the reset key
pub const RESET_SEQUENCE: [u8; 5] = [reg::SW_RESET, 0x11, 0xE5, 0x72, 0x8A];

/// ALG_RESULT_DATA block length
pub const RESULT_LEN: usize = 8;

/// ENV_DATA temperature field is stored with this offset (°C)
pub const ENV_TEMPERATURE_OFFSET_C: f32 = 25.0;

/// Fractional bits of the ENV_DATA fixed-point fields
const Q9_SCALE: f32 = 512.0;

/// ERROR_ID bits in decode priority order
const ERROR_ID_RULES: &[FlagRule<GasFault>] = &[
    FlagRule::new(bit(0), GasFault::WriteRegInvalid),
    FlagRule::new(bit(1), GasFault::ReadRegInvalid),
    FlagRule::new(bit(2), GasFault::MeasModeInvalid),
    FlagRule::new(bit(3), GasFault::MaxResistance),
    FlagRule::new(bit(4), GasFault::HeaterFault),
    FlagRule::new(bit(5), GasFault::HeaterSupply),
];

/// STATUS bits that must be set for a usable sample, in check order
const READY_RULES: &[FlagRule<NotReady>] = &[
    FlagRule::new(bit(status_bits::DATA_READY), NotReady::NoNewData),
    FlagRule::new(bit(status_bits::APP_VALID), NotReady::InvalidFirmware),
    FlagRule::new(bit(status_bits::FW_MODE), NotReady::NotApplicationMode),
];

/// Decoded ALG_RESULT_DATA block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResultBlock {
    pub eco2_ppm: u16,
    pub etvoc_ppb: u16,
    pub status: u8,
    pub error_id: u8,
    pub raw: RawData,
}

/// Split an 8-byte result block into its fields
pub const fn decode_gas_result(data: &[u8; RESULT_LEN]) -> ResultBlock {
    ResultBlock {
        eco2_ppm: u16::from_be_bytes([data[0], data[1]]),
        etvoc_ppb: u16::from_be_bytes([data[2], data[3]]),
        status: data[4],
        error_id: data[5],
        raw: RawData::from_bytes([data[6], data[7]]),
    }
}

/// Name the fault behind a set error flag
pub fn decode_error_id(error_id: u8) -> GasFault {
    first_set(ERROR_ID_RULES, error_id).unwrap_or(GasFault::Unspecified(error_id))
}

/// Decode STATUS/ERROR_ID without side effects
///
/// The error flag wins over every not-ready condition.
pub fn decode_status(status: u8, error_id: u8) -> Result<(), ReadError> {
    if is_set(status, status_bits::ERROR) {
        return Err(ReadError::DeviceFault(decode_error_id(error_id)));
    }
    match first_clear(READY_RULES, status) {
        Some(reason) => Err(ReadError::NotReady(reason)),
        None => Ok(()),
    }
}

/// Convert to Q9 fixed point, truncating toward zero
///
/// Float-to-int casts saturate, so values past the 16-bit range clamp to
/// `u16::MAX` instead of wrapping.
fn to_q9(value: f32) -> u16 {
    (value * Q9_SCALE) as u16
}

/// Build the ENV_DATA write for the given conditions
///
/// Returns `None` unless humidity > 0 % and temperature > -25 °C; the
/// device cannot represent anything outside that.
pub fn encode_env_data(humidity_percent: f32, temperature_c: f32) -> Option<[u8; 5]> {
    if !(humidity_percent > 0.0 && temperature_c > -ENV_TEMPERATURE_OFFSET_C) {
        return None;
    }
    let humidity = to_q9(humidity_percent).to_be_bytes();
    let temperature = to_q9(temperature_c + ENV_TEMPERATURE_OFFSET_C).to_be_bytes();
    Some([
        reg::ENV_DATA,
        humidity[0],
        humidity[1],
        temperature[0],
        temperature[1],
    ])
}

/// CCS811 driver
pub struct Ccs811<B, D, S> {
    device: I2cDevice<B>,
    delay: D,
    sink: S,
    limits: GasLimits,
}

impl<B: I2cBus, D: DelayNs, S: DiagnosticSink> Ccs811<B, D, S> {
    /// Create a new driver with default limits
    ///
    /// Does not touch the bus; call [`Ccs811::initialize`] before reading.
    pub fn new(device: I2cDevice<B>, delay: D, sink: S) -> Self {
        Self {
            device,
            delay,
            sink,
            limits: GasLimits::default(),
        }
    }

    /// Create a driver from configuration
    pub fn from_config(
        bus: B,
        config: &Ccs811Config,
        delay: D,
        sink: S,
    ) -> Result<Self, AddressError> {
        let address = Address::new(config.address)?;
        let device = I2cDevice::new(bus, config.bus, address);
        Ok(Self::new(device, delay, sink).with_limits(config.limits))
    }

    /// Replace the plausibility limits
    pub fn with_limits(mut self, limits: GasLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Get access to the plausibility limits
    pub fn limits(&self) -> &GasLimits {
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
            .report(Record::new(severity, DeviceKind::Ccs811, event));
    }

    /// Write a command, reporting (not returning) a bus failure
    fn send(&mut self, command: &[u8]) -> bool {
        match self.device.write(command) {
            Ok(()) => true,
            Err(_) => {
                self.report(Severity::Debug, Event::TransportFailure);
                false
            }
        }
    }

    /// Switch to application mode and start sampling
    ///
    /// Best-effort; bus errors are reported to the sink and swallowed.
    pub fn initialize(&mut self) {
        if self.send(&[reg::APP_START]) {
            self.report(Severity::Info, Event::Initialized);
        }
        self.delay.delay_ms(SETTLE_DELAY_MS);

        if self.send(&[reg::MEAS_MODE, MEAS_MODE_CONFIG]) {
            self.report(Severity::Info, Event::MeasureModeSet);
        }
        self.delay.delay_ms(SETTLE_DELAY_MS);
    }

    /// Reset the device back into boot mode
    ///
    /// [`Ccs811::initialize`] must run again before the next read.
    pub fn soft_reset(&mut self) {
        if self.send(&RESET_SEQUENCE) {
            self.report(Severity::Info, Event::SoftReset);
        }
        self.delay.delay_ms(SETTLE_DELAY_MS);
    }

    /// Write ambient humidity (%) and temperature (°C) for compensation
    ///
    /// Silently does nothing unless humidity > 0 and temperature > -25.
    pub fn write_environment_data(&mut self, humidity_percent: f32, temperature_c: f32) {
        if let Some(payload) = encode_env_data(humidity_percent, temperature_c) {
            self.send(&payload);
        }
    }

    /// Decode STATUS/ERROR_ID, recovering the device on an error flag
    ///
    /// On a device fault the cause is reported, then the device is soft
    /// reset and re-initialized once. The recovery is not retried.
    pub fn interpret_status(&mut self, status: u8, error_id: u8) -> Result<(), ReadError> {
        let result = decode_status(status, error_id);
        match result {
            Ok(()) => {}
            Err(ReadError::DeviceFault(fault)) => {
                self.report(Severity::Error, Event::DeviceFault(fault));
                self.report(Severity::Warning, Event::RecoveryAttempted);
                self.soft_reset();
                self.initialize();
            }
            Err(ReadError::NotReady(reason)) => {
                self.report(Severity::Info, Event::NotReady(reason));
            }
            Err(ReadError::Transport | ReadError::Implausible) => {}
        }
        result
    }

    /// Read eCO2/eTVOC
    ///
    /// Both values are returned together or not at all.
    pub fn read_gas(&mut self) -> Result<GasReading, ReadError> {
        let mut data = [0u8; RESULT_LEN];
        self.device
            .write_read(reg::ALG_RESULT_DATA, &mut data)
            .map_err(|_| {
                self.report(Severity::Debug, Event::TransportFailure);
                ReadError::Transport
            })?;

        let block = decode_gas_result(&data);
        self.interpret_status(block.status, block.error_id)?;

        if !self.limits.accepts_etvoc(block.etvoc_ppb) {
            self.report(Severity::Warning, Event::Implausible);
            return Err(ReadError::Implausible);
        }

        Ok(GasReading {
            eco2_ppm: block.eco2_ppm,
            etvoc_ppb: block.etvoc_ppb,
            raw: block.raw,
        })
    }
}

impl<B: I2cBus, D: DelayNs, S: DiagnosticSink> GasSensor for Ccs811<B, D, S> {
    fn initialize(&mut self) {
        Ccs811::initialize(self)
    }

    fn read_gas(&mut self) -> Result<GasReading, ReadError> {
        Ccs811::read_gas(self)
    }

    fn set_environment(&mut self, humidity_percent: f32, temperature_c: f32) {
        self.write_environment_data(humidity_percent, temperature_c)
    }
}
