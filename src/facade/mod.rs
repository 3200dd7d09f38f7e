//! Logging outcomes and turning failures into user-facing messages.
//!
//! [`Diagnostics`] ties a [`DiagnosticConfig`], a [`LogSink`] and a
//! [`Serializer`] together and exposes the two operations of the facade:
//!
//! - [`Diagnostics::log`] emits one entry for a failure (and, in
//!   [`LogMode::All`], for a success) and returns the outcome unchanged.
//! - [`Diagnostics::user_message`] returns a message that is safe to show to
//!   an end user. Plain messages pass through; anything opaque is replaced by
//!   a correlation code and logged in full.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::facade::{Diagnostics, LogMode, RecordingSink, Severity};
//! use outcome_rail::config::DiagnosticConfig;
//! use outcome_rail::{Outcome, Raised, Reason};
//!
//! let diagnostics = Diagnostics::new(DiagnosticConfig::default(), RecordingSink::new());
//!
//! let failed: Outcome<u32, &str> = Outcome::FailureWith("x");
//! assert_eq!(diagnostics.log(failed, LogMode::ErrorsOnly), Outcome::FailureWith("x"));
//! assert_eq!(diagnostics.sink().entries()[0].severity, Severity::Problem);
//!
//! let opaque = Reason::from(Raised::new("DbError", "connection reset by 10.0.0.7"));
//! let message = diagnostics.user_message(&opaque);
//! assert!(message.starts_with("There was an error. Refer to code: "));
//! ```
use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::callsite::{CapturedStack, Resolver};
use crate::config::{self, DiagnosticAdapter, DiagnosticConfig};
use crate::shrink::Shrinker;
use crate::traits::Describe;
use crate::types::{Metadata, Outcome, OutcomeError, Reason, ShapeMode, Value};

pub mod serializer;
pub mod sink;

#[cfg(feature = "serde")]
pub use serializer::JsonSerializer;
pub use serializer::{DisplaySerializer, Serializer};
#[cfg(feature = "tracing")]
pub use sink::TracingSink;
pub use sink::{DefaultSink, LogEntry, LogMode, LogSink, RecordingSink, Severity, StderrSink};

/// Length of generated correlation codes.
pub const CODE_LENGTH: usize = 8;

/// Prefix of the generic message returned for opaque reasons.
pub const GENERIC_MESSAGE: &str = "There was an error. Refer to code: ";

/// Metadata key holding the outcome kind (`success`, `failure` or `raised`).
pub const KIND_KEY: &str = "kind";
/// Metadata key holding the resolved call site.
pub const CALL_SITE_KEY: &str = "call_site";
/// Metadata key holding the shrunk value or rendered chain.
pub const DETAILS_KEY: &str = "details";
/// Metadata key holding a correlation code.
pub const CODE_KEY: &str = "code";

/// The log and message facade.
pub struct Diagnostics<S = DefaultSink> {
    config: DiagnosticConfig,
    resolver: Resolver,
    shrinker: Shrinker,
    sink: S,
    serializer: Box<dyn Serializer + Send + Sync>,
}

impl Diagnostics<DefaultSink> {
    /// A facade using the process-wide configuration and the default sink.
    pub fn global() -> Self {
        Self::new(config::global().clone(), DefaultSink::default())
    }
}

impl<S: LogSink> Diagnostics<S> {
    /// Creates a facade.
    ///
    /// The serializer follows the configured adapter: JSON for
    /// [`DiagnosticAdapter::Json`] (when the `serde` feature is enabled), the
    /// `Display` rendering otherwise.
    pub fn new(config: DiagnosticConfig, sink: S) -> Self {
        let serializer: Box<dyn Serializer + Send + Sync> = match config.adapter {
            #[cfg(feature = "serde")]
            DiagnosticAdapter::Json => Box::new(JsonSerializer),
            _ => Box::new(DisplaySerializer),
        };
        Self {
            resolver: config.resolver(),
            shrinker: config.shrinker(),
            config,
            sink,
            serializer,
        }
    }

    /// Replaces the serializer used for [`DiagnosticAdapter::Json`] details.
    pub fn with_serializer<Z>(mut self, serializer: Z) -> Self
    where
        Z: Serializer + Send + Sync + 'static,
    {
        self.serializer = Box::new(serializer);
        self
    }

    #[inline]
    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    #[inline]
    pub fn shrinker(&self) -> &Shrinker {
        &self.shrinker
    }

    /// Logs an outcome and returns it unchanged.
    ///
    /// Failures are emitted at [`Severity::Problem`]; successes are emitted at
    /// [`Severity::Info`] only in [`LogMode::All`]. The entry's metadata holds
    /// the outcome kind, the call site of this call and the shrunk details.
    #[track_caller]
    pub fn log<T, E>(&self, outcome: Outcome<T, E>, mode: LogMode) -> Outcome<T, E>
    where
        T: Describe,
        E: Describe,
    {
        if outcome.is_success() && mode == LogMode::ErrorsOnly {
            return outcome;
        }

        let shrinker = &self.shrinker;
        let (kind, severity, details) = match &outcome {
            Outcome::Success => ("success", Severity::Info, Value::Null),
            Outcome::SuccessWith(value) => ("success", Severity::Info, value.shrunk(shrinker)),
            Outcome::Failure => ("failure", Severity::Problem, Value::Null),
            Outcome::FailureWith(reason) if reason.is_raised() => {
                ("raised", Severity::Problem, reason.shrunk(shrinker))
            },
            Outcome::FailureWith(reason) => ("failure", Severity::Problem, reason.shrunk(shrinker)),
        };

        let stack = CapturedStack::capture();
        let site = self.resolver.call_site(&stack);
        let summary = details.to_text();
        let summary = summary.lines().next().unwrap_or_default();
        let message = match &site {
            Some(site) => format!("[{}] {}: {}", site, kind, summary),
            None => format!("{}: {}", kind, summary),
        };

        let mut metadata = Metadata::new().with(KIND_KEY, Value::atom(kind));
        if let Some(site) = site {
            metadata.insert(CALL_SITE_KEY, site.to_string());
        }
        metadata.insert(DETAILS_KEY, self.encode_details(details));
        self.sink.emit(severity, &message, &metadata);
        outcome
    }

    /// Validates and logs a dynamic outcome, returning it unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::InvalidOutcomeShape`] without logging when
    /// `value` is not an outcome in [`ShapeMode::Loose`].
    #[track_caller]
    pub fn log_value(&self, value: Value, mode: LogMode) -> Result<Value, OutcomeError> {
        let outcome = Outcome::from_value(value.clone(), ShapeMode::Loose)?;
        let _ = self.log(outcome, mode);
        Ok(value)
    }

    /// Produces a message that is safe to show to an end user.
    ///
    /// - A plain [`Reason::Message`] is returned verbatim.
    /// - An annotated reason yields its terminal message followed by the frame
    ///   labels, outermost first: `"card declined [checkout > charging card]"`.
    ///   Metadata is never included.
    /// - Anything else is opaque: a correlation code is generated, one
    ///   [`Severity::Problem`] entry with the code and the shrunk reason is
    ///   emitted, and `"There was an error. Refer to code: XXXXXXXX"` is
    ///   returned. An annotated reason with an opaque terminal gets the
    ///   generic message followed by its label trail.
    pub fn user_message(&self, reason: &Reason) -> String {
        let Some(chain) = reason.as_wrapped() else {
            return match reason {
                Reason::Message(text) => text.clone(),
                opaque => self.report(opaque),
            };
        };

        let terminal = match chain.terminal() {
            Reason::Message(text) => text.clone(),
            _ => self.report(reason),
        };
        let labels: Vec<&str> = chain.frames().filter_map(|frame| frame.label()).collect();
        if labels.is_empty() {
            terminal
        } else {
            format!("{} [{}]", terminal, labels.join(" > "))
        }
    }

    /// Logs an opaque reason under a fresh correlation code and returns the
    /// generic message.
    fn report(&self, reason: &Reason) -> String {
        let code = correlation_code();
        let details = self.shrinker.shrink_reason(reason);

        #[cfg(feature = "tracing")]
        tracing::debug!(code = %code, "issued correlation code for opaque failure reason");

        let message = format!("[{}] {}", code, details.to_text());
        let metadata = Metadata::new()
            .with(KIND_KEY, Value::atom(if reason.is_raised() { "raised" } else { "failure" }))
            .with(CODE_KEY, code.as_str())
            .with(DETAILS_KEY, self.encode_details(details));
        self.sink.emit(Severity::Problem, &message, &metadata);

        format!("{}{}", GENERIC_MESSAGE, code)
    }

    fn encode_details(&self, details: Value) -> Value {
        match self.config.adapter {
            DiagnosticAdapter::Plain => details,
            DiagnosticAdapter::Json => Value::Str(self.serializer.encode(&details)),
        }
    }
}

/// Generates an uppercase alphanumeric correlation code.
pub fn correlation_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(|byte| char::from(byte).to_ascii_uppercase())
        .collect()
}

/// Logs an outcome through [`Diagnostics::global`].
#[track_caller]
pub fn log<T, E>(outcome: Outcome<T, E>, mode: LogMode) -> Outcome<T, E>
where
    T: Describe,
    E: Describe,
{
    Diagnostics::global().log(outcome, mode)
}

/// Builds a user-facing message through [`Diagnostics::global`].
pub fn user_message(reason: &Reason) -> String {
    Diagnostics::global().user_message(reason)
}
