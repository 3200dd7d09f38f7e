//! Annotating failures with context frames.
//!
//! Key features:
//! - [`annotate`] wraps a failure in a new [`ContextFrame`] recording the
//!   caller's location, a label and metadata. Successes pass through.
//! - [`annotate_value`] does the same for dynamic values, validating their
//!   shape first.
//! - [`unwrap_chain`] and [`render_message`] take a chain apart again.
//!
//! Each annotation prepends a frame, so the frame list of a chain reads from
//! the most recent annotation down to the original failure.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{annotate, meta, unwrap_chain, Outcome, Reason, Value};
//!
//! let failed: Outcome<(), &str> = Outcome::FailureWith("db_timeout");
//! let wrapped = annotate(failed, ("fetching user", meta!{ "user_id" => 123 }));
//!
//! let (frames, terminal) = unwrap_chain(wrapped.into_reason().unwrap());
//! assert_eq!(frames.len(), 1);
//! assert_eq!(frames[0].label(), Some("fetching user"));
//! assert_eq!(frames[0].metadata().get("user_id"), Some(&Value::Int(123)));
//! assert_eq!(terminal, Reason::message("db_timeout"));
//! ```
use crate::traits::IntoAnnotation;
use crate::types::{
    Annotated, ContextFrame, Outcome, OutcomeError, Reason, ShapeMode, Value, WrappedFailure,
};

/// Wraps a failure in a new context frame; successes are returned unchanged.
///
/// The annotation is only converted when the outcome is a failure, so a
/// [`LazyAnnotation`](crate::LazyAnnotation) never runs on the success path. A
/// bare [`Outcome::Failure`] becomes a chain whose terminal reason is
/// [`Reason::Unspecified`].
///
/// # Examples
///
/// ```
/// use outcome_rail::{annotate, Outcome, Reason};
///
/// let ok: Outcome<i32, &str> = Outcome::SuccessWith(42);
/// assert_eq!(annotate(ok, "unused"), Outcome::SuccessWith(42));
///
/// let inner = annotate(Outcome::<(), &str>::FailureWith("refused"), "connecting");
/// let outer = annotate(inner, "syncing");
/// let chain = outer.reason().and_then(Reason::as_wrapped).unwrap();
/// assert_eq!(chain.depth(), 2);
/// assert_eq!(chain.frame().label(), Some("syncing"));
/// ```
#[track_caller]
pub fn annotate<T, E, A>(outcome: Outcome<T, E>, annotation: A) -> Annotated<T>
where
    E: Into<Reason>,
    A: IntoAnnotation,
{
    match outcome {
        Outcome::Success => Outcome::Success,
        Outcome::SuccessWith(value) => Outcome::SuccessWith(value),
        Outcome::Failure => Outcome::FailureWith(wrap(Reason::Unspecified, annotation)),
        Outcome::FailureWith(reason) => Outcome::FailureWith(wrap(reason.into(), annotation)),
    }
}

/// Annotates a dynamic outcome value.
///
/// # Errors
///
/// Returns [`OutcomeError::InvalidOutcomeShape`] when `value` is not an
/// outcome in [`ShapeMode::Loose`].
///
/// # Examples
///
/// ```
/// use outcome_rail::{annotate_value, Value};
///
/// let tagged = Value::tuple([Value::atom("error"), Value::atom("enoent")]);
/// let wrapped = annotate_value(tagged, "reading config").unwrap();
/// assert!(wrapped.is_failure());
///
/// assert!(annotate_value(Value::from(3), "reading config").is_err());
/// ```
#[track_caller]
pub fn annotate_value<A>(value: Value, annotation: A) -> Result<Annotated<Value>, OutcomeError>
where
    A: IntoAnnotation,
{
    let outcome = Outcome::from_value(value, ShapeMode::Loose)?;
    Ok(annotate(outcome, annotation))
}

/// Splits a reason into its frames (outermost first) and terminal reason.
///
/// A reason that was never annotated yields no frames.
#[inline]
pub fn unwrap_chain(reason: Reason) -> (Vec<ContextFrame>, Reason) {
    reason.into_parts()
}

/// Renders a reason: its own message, then one `[CONTEXT]` line per frame.
#[inline]
pub fn render_message(reason: &Reason) -> String {
    reason.derived_message()
}

#[track_caller]
pub(crate) fn wrap<A: IntoAnnotation>(cause: Reason, annotation: A) -> Reason {
    let (label, metadata) = annotation.into_annotation().into_parts();
    Reason::from(WrappedFailure::new(ContextFrame::capture(label, metadata), cause))
}
