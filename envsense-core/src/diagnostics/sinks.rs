//! Stock diagnostic sinks

use heapless::Deque;

use super::{DiagnosticSink, Record, Severity};

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _record: Record) {}
}

/// Keeps the most recent `N` records
///
/// When full, the oldest record is dropped to make room. Records below
/// `min_severity` are ignored.
pub struct BufferedSink<const N: usize> {
    records: Deque<Record, N>,
    min_severity: Severity,
    dropped: u32,
}

impl<const N: usize> Default for BufferedSink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> BufferedSink<N> {
    /// Create a sink that keeps every severity
    pub const fn new() -> Self {
        Self::with_min_severity(Severity::Debug)
    }

    /// Create a sink that ignores records below `min_severity`
    pub const fn with_min_severity(min_severity: Severity) -> Self {
        Self {
            records: Deque::new(),
            min_severity,
            dropped: 0,
        }
    }

    /// Iterate records oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Number of buffered records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records evicted because the buffer was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Remove and return the oldest record
    pub fn pop(&mut self) -> Option<Record> {
        self.records.pop_front()
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> DiagnosticSink for BufferedSink<N> {
    fn report(&mut self, record: Record) {
        if record.severity < self.min_severity {
            return;
        }
        if self.records.is_full() {
            self.records.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        // Cannot fail: a slot was freed above (N == 0 aside)
        let _ = self.records.push_back(record);
    }
}

/// Forwards records to the `defmt` logger
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtSink;

#[cfg(feature = "defmt")]
impl DiagnosticSink for DefmtSink {
    fn report(&mut self, record: Record) {
        match record.severity {
            Severity::Debug => defmt::debug!("{}: {}", record.device, record.event),
            Severity::Info => defmt::info!("{}: {}", record.device, record.event),
            Severity::Warning => defmt::warn!("{}: {}", record.device, record.event),
            Severity::Error => defmt::error!("{}: {}", record.device, record.event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DeviceKind, Event};

    fn record(severity: Severity, event: Event) -> Record {
        Record::new(severity, DeviceKind::Ccs811, event)
    }

    #[test]
    fn test_buffer_keeps_latest() {
        let mut sink = BufferedSink::<2>::new();
        sink.report(record(Severity::Info, Event::Initialized));
        sink.report(record(Severity::Info, Event::MeasureModeSet));
        sink.report(record(Severity::Info, Event::SoftReset));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.dropped(), 1);
        assert_eq!(sink.pop().map(|r| r.event), Some(Event::MeasureModeSet));
        assert_eq!(sink.pop().map(|r| r.event), Some(Event::SoftReset));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_min_severity_filter() {
        let mut sink = BufferedSink::<4>::with_min_severity(Severity::Warning);
        sink.report(record(Severity::Debug, Event::TransportFailure));
        sink.report(record(Severity::Info, Event::Initialized));
        sink.report(record(Severity::Warning, Event::Implausible));

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.iter().next().map(|r| r.event), Some(Event::Implausible));
    }

    #[test]
    fn test_borrowed_sink_reports_into_owner() {
        fn emit<S: DiagnosticSink>(mut sink: S) {
            sink.report(record(Severity::Error, Event::RecoveryAttempted));
        }

        let mut sink = BufferedSink::<4>::new();
        emit(&mut sink);
        emit(&mut sink);
        assert_eq!(sink.len(), 2);

        sink.clear();
        assert!(sink.is_empty());
    }
}
