//! Outcome values with diagnostic context chains.
//!
//! `outcome_rail` passes success-or-failure [`Outcome`]s across function
//! boundaries, records *where* and *why* a failure happened as it propagates,
//! and collapses any failure into one message that is safe to show a user.
//!
//! - [`combinators`]: `run`, `chain`, `recover`, `map_all`, `map_each`,
//!   `find_first_success` and `all_succeed`, with panic-converting and
//!   unguarded variants.
//! - [`context`]: [`annotate`] prepends a [`ContextFrame`] (label, metadata,
//!   call site) to a failure, building a [`WrappedFailure`] chain.
//! - [`callsite`]: picks the stack frame worth showing to a human.
//! - [`shrink`]: reduces arbitrary [`Value`]s to their identifying fields.
//! - [`facade`]: [`log`] and [`user_message`].
//!
//! # Examples
//!
//! ## Annotating a failure
//!
//! ```
//! use outcome_rail::{annotate, meta, unwrap_chain, Outcome, Reason};
//!
//! let failed: Outcome<(), &str> = Outcome::FailureWith("db_timeout");
//! let wrapped = annotate(failed, ("fetching user", meta!{ "user_id" => 123 }));
//!
//! let (frames, terminal) = unwrap_chain(wrapped.into_reason().unwrap());
//! assert_eq!(frames[0].label(), Some("fetching user"));
//! assert_eq!(terminal, Reason::message("db_timeout"));
//! ```
//!
//! ## Short-circuiting
//!
//! ```
//! use outcome_rail::{chain_unguarded, run_unguarded, Outcome};
//!
//! let missing = run_unguarded(|| Outcome::<u32, &str>::FailureWith("missing"));
//! let result = chain_unguarded(missing, |_| -> Outcome<u32, &str> { unreachable!() });
//! assert_eq!(result, Outcome::FailureWith("missing"));
//! ```
//!
//! ## User-facing messages
//!
//! ```
//! use outcome_rail::config::DiagnosticConfig;
//! use outcome_rail::facade::{Diagnostics, RecordingSink};
//! use outcome_rail::{annotate, Outcome};
//!
//! let diagnostics = Diagnostics::new(DiagnosticConfig::default(), RecordingSink::new());
//!
//! let failed: Outcome<(), &str> = Outcome::FailureWith("card declined");
//! let wrapped = annotate(annotate(failed, "charging card"), "checkout");
//! let message = diagnostics.user_message(wrapped.reason().unwrap());
//! assert_eq!(message, "card declined [checkout > charging card]");
//! assert!(diagnostics.sink().is_empty());
//! ```

/// Stack capture and call-site resolution
pub mod callsite;
/// Short-circuiting and panic-converting combinators
pub mod combinators;
/// Diagnostic configuration and its process-wide default
pub mod config;
/// Failure annotation and chain inspection
pub mod context;
/// Logging and user-facing messages
pub mod facade;
/// Macros for metadata and annotation
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Value shrinking
pub mod shrink;
/// Core traits connecting user types to the outcome algebra
pub mod traits;
/// Outcome, reason and diagnostic data types
pub mod types;

pub use combinators::*;
pub use context::{annotate, annotate_value, render_message, unwrap_chain};
pub use facade::{log, user_message, Diagnostics, LogMode, Severity};
pub use shrink::{ShrinkConfig, Shrinker};
pub use traits::*;
pub use types::{
    validate, Annotated, Annotation, ChainFormat, ContextFrame, Fields, FunctionRef, LazyAnnotation,
    Metadata, Outcome, OutcomeError, Raised, Reason, ShapeMode, Value, WrappedFailure,
};
