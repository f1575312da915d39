//! Diagnostic reporting
//!
//! Drivers report what they observe (faults, not-ready states, recovery
//! attempts) through an injected [`DiagnosticSink`] instead of a global
//! logger. The decision logic stays the same whichever backend the caller
//! plugs in.

mod sinks;

pub use sinks::{BufferedSink, NullSink};

#[cfg(feature = "defmt")]
pub use sinks::DefmtSink;

use crate::measurement::{GasFault, NotReady};

/// Report severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

/// Which device a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceKind {
    /// CCS811 eCO2/eTVOC sensor
    Ccs811,
    /// Humidity/temperature sensor at 0x57
    Max30102,
}

/// Something a driver observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Init command sequence sent (CCS811: app start)
    Initialized,
    /// CCS811 measurement mode configured
    MeasureModeSet,
    /// Soft reset issued; device back in boot mode
    SoftReset,
    /// A bus transaction failed
    TransportFailure,
    /// Device raised its error flag
    DeviceFault(GasFault),
    /// Device not ready this cycle
    NotReady(NotReady),
    /// Converted values outside the plausibility limits
    Implausible,
    /// Driver is re-running initialization to recover
    RecoveryAttempted,
}

/// One diagnostic report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Record {
    pub severity: Severity,
    pub device: DeviceKind,
    pub event: Event,
}

impl Record {
    pub const fn new(severity: Severity, device: DeviceKind, event: Event) -> Self {
        Self {
            severity,
            device,
            event,
        }
    }
}

/// Destination for driver diagnostics
///
/// Implementations must not block for long; they are called from inside
/// the measurement path.
pub trait DiagnosticSink {
    /// Accept one record
    fn report(&mut self, record: Record);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, record: Record) {
        (**self).report(record)
    }
}
