//! The closed success/failure sum type.
//!
//! [`Outcome`] has exactly four shapes: a bare success, a success carrying a
//! value, a bare failure and a failure carrying a reason. Dynamic data that
//! claims to be an outcome is checked once, at the boundary, by
//! [`Outcome::from_value`].
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{Outcome, ShapeMode, Value};
//!
//! let ok: Outcome<i32, &str> = Outcome::SuccessWith(42);
//! assert_eq!(ok.map(|v| v + 1), Outcome::SuccessWith(43));
//!
//! let tagged = Value::tuple([Value::atom("error"), Value::from("missing")]);
//! let parsed = Outcome::from_value(tagged, ShapeMode::Strict).unwrap();
//! assert_eq!(parsed, Outcome::FailureWith(Value::from("missing")));
//! ```
use crate::types::{OutcomeError, Value};

/// Atom tag of a successful dynamic outcome.
pub const SUCCESS_TAG: &str = "ok";
/// Atom tag of a failed dynamic outcome.
pub const FAILURE_TAG: &str = "error";

/// A success-or-failure result whose payloads are both optional.
#[must_use]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Outcome<T, E> {
    /// Success without a value.
    Success,
    /// Success with a value.
    SuccessWith(T),
    /// Failure without a reason.
    Failure,
    /// Failure with a reason.
    FailureWith(E),
}

/// How strictly dynamic values are matched against the outcome shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeMode {
    /// Only `:ok`, `{:ok, v}`, `:error` and `{:error, r}`.
    #[default]
    Strict,
    /// Also any longer tuple whose first element is `:ok` or `:error`.
    Loose,
}

impl<T, E> Outcome<T, E> {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::SuccessWith(_))
    }

    #[inline]
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Returns the success value, if any.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::SuccessWith(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the failure reason, if any.
    #[inline]
    pub fn reason(&self) -> Option<&E> {
        match self {
            Self::FailureWith(reason) => Some(reason),
            _ => None,
        }
    }

    #[inline]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::SuccessWith(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn into_reason(self) -> Option<E> {
        match self {
            Self::FailureWith(reason) => Some(reason),
            _ => None,
        }
    }

    /// Maps the success value, leaving every other shape untouched.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Outcome<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success => Outcome::Success,
            Self::SuccessWith(value) => Outcome::SuccessWith(f(value)),
            Self::Failure => Outcome::Failure,
            Self::FailureWith(reason) => Outcome::FailureWith(reason),
        }
    }

    /// Maps the failure reason, leaving every other shape untouched.
    #[inline]
    pub fn map_reason<G, F>(self, f: F) -> Outcome<T, G>
    where
        F: FnOnce(E) -> G,
    {
        match self {
            Self::Success => Outcome::Success,
            Self::SuccessWith(value) => Outcome::SuccessWith(value),
            Self::Failure => Outcome::Failure,
            Self::FailureWith(reason) => Outcome::FailureWith(f(reason)),
        }
    }

    /// Converts into a `Result`; the bare shapes map to `None`.
    #[inline]
    pub fn into_result(self) -> Result<Option<T>, Option<E>> {
        match self {
            Self::Success => Ok(None),
            Self::SuccessWith(value) => Ok(Some(value)),
            Self::Failure => Err(None),
            Self::FailureWith(reason) => Err(Some(reason)),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    #[inline]
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::SuccessWith(value),
            Err(reason) => Self::FailureWith(reason),
        }
    }
}

/// `Some` is a valued success, `None` a bare failure.
impl<T, E> From<Option<T>> for Outcome<T, E> {
    #[inline]
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::SuccessWith(value),
            None => Self::Failure,
        }
    }
}

impl Outcome<Value, Value> {
    /// Validates a dynamic value as one of the outcome shapes.
    ///
    /// In [`ShapeMode::Loose`], a tagged tuple with more than one payload
    /// element carries the remaining elements as a [`Value::Tuple`].
    ///
    /// # Errors
    ///
    /// Returns [`OutcomeError::InvalidOutcomeShape`] for any other value.
    pub fn from_value(value: Value, mode: ShapeMode) -> Result<Self, OutcomeError> {
        Self::parse(value, mode).map_err(|value| OutcomeError::invalid_shape(mode, &value))
    }

    /// Like [`from_value`](Self::from_value), handing the value back on mismatch.
    pub(crate) fn parse(value: Value, mode: ShapeMode) -> Result<Self, Value> {
        match value {
            Value::Atom(tag) if tag == SUCCESS_TAG => Ok(Self::Success),
            Value::Atom(tag) if tag == FAILURE_TAG => Ok(Self::Failure),
            Value::Tuple(items) if is_tagged(&items) => {
                let arity = items.len();
                if arity != 2 && mode == ShapeMode::Strict {
                    return Err(Value::Tuple(items));
                }
                let mut items = items.into_iter();
                let success = matches!(items.next(), Some(Value::Atom(tag)) if tag == SUCCESS_TAG);
                let payload = match arity {
                    1 => None,
                    2 => items.next(),
                    _ => Some(Value::Tuple(items.collect())),
                };
                Ok(match (success, payload) {
                    (true, Some(value)) => Self::SuccessWith(value),
                    (true, None) => Self::Success,
                    (false, Some(reason)) => Self::FailureWith(reason),
                    (false, None) => Self::Failure,
                })
            },
            other => Err(other),
        }
    }

    /// Converts back into the tagged dynamic representation.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Success => Value::atom(SUCCESS_TAG),
            Self::SuccessWith(value) => Value::Tuple(vec![Value::atom(SUCCESS_TAG), value.clone()]),
            Self::Failure => Value::atom(FAILURE_TAG),
            Self::FailureWith(reason) => Value::Tuple(vec![Value::atom(FAILURE_TAG), reason.clone()]),
        }
    }
}

fn is_tagged(items: &[Value]) -> bool {
    matches!(items.first(), Some(Value::Atom(tag)) if tag == SUCCESS_TAG || tag == FAILURE_TAG)
}

/// Validates a dynamic value; see [`Outcome::from_value`].
///
/// # Errors
///
/// Returns [`OutcomeError::InvalidOutcomeShape`] when `value` is not an outcome.
#[inline]
pub fn validate(value: Value, mode: ShapeMode) -> Result<Outcome<Value, Value>, OutcomeError> {
    Outcome::from_value(value, mode)
}
