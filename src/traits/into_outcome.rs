//! Coercion of callback returns into outcomes.
//!
//! Combinators accept any callback whose return type implements
//! [`IntoOutcome`]. Typed returns (`Outcome`, `Result`) convert exactly;
//! dynamic [`Value`] returns are shape-checked and coerced when they are not
//! outcomes.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{IntoOutcome, Outcome, Reason, Value};
//!
//! let plain = Value::from(42);
//! let coerced: Outcome<Value, Value> = plain.clone().into_outcome();
//! assert_eq!(coerced, Outcome::SuccessWith(Value::from(42)));
//!
//! let recovered: Outcome<Value, Reason> = plain.into_recovered();
//! assert_eq!(recovered, Outcome::FailureWith(Reason::Data(Value::from(42))));
//!
//! let typed: Result<u8, &str> = Err("nope");
//! assert_eq!(typed.into_outcome(), Outcome::FailureWith("nope"));
//! ```
use crate::types::{Outcome, ShapeMode, Value};

/// Converts a callback's return into an [`Outcome`].
pub trait IntoOutcome<T, E> {
    /// Coercion used by `run` and `chain`: non-outcomes become successes.
    fn into_outcome(self) -> Outcome<T, E>;

    /// Coercion used by `recover`: non-outcomes become failures.
    fn into_recovered(self) -> Outcome<T, E>
    where
        Self: Sized,
    {
        self.into_outcome()
    }

    /// Strict conversion used by `all_succeed`; the offending value is
    /// returned when `self` is not an outcome.
    fn try_into_outcome(self) -> Result<Outcome<T, E>, Value>
    where
        Self: Sized,
    {
        Ok(self.into_outcome())
    }
}

impl<T, E> IntoOutcome<T, E> for Outcome<T, E> {
    #[inline]
    fn into_outcome(self) -> Outcome<T, E> {
        self
    }
}

impl<T, E> IntoOutcome<T, E> for Result<T, E> {
    #[inline]
    fn into_outcome(self) -> Outcome<T, E> {
        Outcome::from(self)
    }
}

/// A callback returning nothing succeeded without a value.
impl<T, E> IntoOutcome<T, E> for () {
    #[inline]
    fn into_outcome(self) -> Outcome<T, E> {
        Outcome::Success
    }
}

/// Dynamic returns are shape-checked; failure payloads are converted with `E::from`.
impl<E: From<Value>> IntoOutcome<Value, E> for Value {
    #[inline]
    fn into_outcome(self) -> Outcome<Value, E> {
        Outcome::parse(self, ShapeMode::Loose)
            .unwrap_or_else(Outcome::SuccessWith)
            .map_reason(E::from)
    }

    #[inline]
    fn into_recovered(self) -> Outcome<Value, E> {
        Outcome::parse(self, ShapeMode::Loose)
            .unwrap_or_else(Outcome::FailureWith)
            .map_reason(E::from)
    }

    #[inline]
    fn try_into_outcome(self) -> Result<Outcome<Value, E>, Value> {
        Outcome::parse(self, ShapeMode::Strict).map(|outcome| outcome.map_reason(E::from))
    }
}
