//! Log sinks receiving the facade's entries.
use core::fmt::{self, Display};
use std::sync::{Arc, Mutex, PoisonError};

use crate::types::Metadata;

/// Severity of an emitted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Informational entry, such as a logged success.
    Info,
    /// A failure or a caught panic.
    Problem,
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Problem => "problem",
        })
    }
}

/// Which outcomes [`Diagnostics::log`](crate::Diagnostics::log) emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogMode {
    /// Failures only.
    #[default]
    ErrorsOnly,
    /// Failures and successes.
    All,
}

/// Destination of log entries.
///
/// Emitting never fails from the caller's point of view: a sink that cannot
/// deliver an entry deals with that itself.
pub trait LogSink {
    fn emit(&self, severity: Severity, message: &str, metadata: &Metadata);
}

impl<S: LogSink + ?Sized> LogSink for &S {
    #[inline]
    fn emit(&self, severity: Severity, message: &str, metadata: &Metadata) {
        (**self).emit(severity, message, metadata)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    #[inline]
    fn emit(&self, severity: Severity, message: &str, metadata: &Metadata) {
        (**self).emit(severity, message, metadata)
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    #[inline]
    fn emit(&self, severity: Severity, message: &str, metadata: &Metadata) {
        (**self).emit(severity, message, metadata)
    }
}

/// One entry captured by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
    pub metadata: Metadata,
}

/// Keeps every emitted entry in memory.
///
/// # Examples
///
/// ```
/// use outcome_rail::facade::{LogSink, RecordingSink, Severity};
/// use outcome_rail::Metadata;
///
/// let sink = RecordingSink::new();
/// sink.emit(Severity::Problem, "boom", &Metadata::new());
/// assert_eq!(sink.len(), 1);
/// assert_eq!(sink.entries()[0].message, "boom");
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingSink {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Removes and returns the recorded entries.
    pub fn take(&self) -> Vec<LogEntry> {
        std::mem::take(&mut *self.entries.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for RecordingSink {
    fn emit(&self, severity: Severity, message: &str, metadata: &Metadata) {
        let entry = LogEntry { severity, message: message.to_owned(), metadata: metadata.clone() };
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(entry);
    }
}

/// Forwards entries to the `tracing` subscriber.
///
/// Problems are emitted as `ERROR` events and informational entries as `INFO`
/// events, with the metadata attached as the `metadata` field.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl LogSink for TracingSink {
    fn emit(&self, severity: Severity, message: &str, metadata: &Metadata) {
        match severity {
            Severity::Problem => tracing::error!(metadata = %metadata, "{}", message),
            Severity::Info => tracing::info!(metadata = %metadata, "{}", message),
        }
    }
}

/// Writes entries to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn emit(&self, severity: Severity, message: &str, metadata: &Metadata) {
        eprintln!("[{}] {} {}", severity, message, metadata);
    }
}

/// Sink used by [`Diagnostics::global`](crate::Diagnostics::global).
#[cfg(feature = "tracing")]
pub type DefaultSink = TracingSink;

/// Sink used by [`Diagnostics::global`](crate::Diagnostics::global).
#[cfg(not(feature = "tracing"))]
pub type DefaultSink = StderrSink;
