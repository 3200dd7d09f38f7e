use core::fmt::{self, Display};

use crate::types::{ShapeMode, Value};

/// Programmer errors raised by the outcome algebra.
///
/// These never travel through the outcome channel: they are returned as the
/// `Err` side of a `Result` so the caller has to deal with them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeError {
    /// A dynamic value is not an outcome for the requested mode.
    InvalidOutcomeShape { mode: ShapeMode, found: String },
    /// A callback handed to a strict combinator returned a non-outcome.
    InvalidCallbackReturn { combinator: &'static str, found: String },
}

impl OutcomeError {
    pub(crate) fn invalid_shape(mode: ShapeMode, found: &Value) -> Self {
        Self::InvalidOutcomeShape { mode, found: found.to_string() }
    }

    pub(crate) fn invalid_return(combinator: &'static str, found: &Value) -> Self {
        Self::InvalidCallbackReturn { combinator, found: found.to_string() }
    }
}

impl Display for OutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOutcomeShape { mode, found } => {
                write!(f, "expected an outcome ({:?} mode), found {}", mode, found)
            },
            Self::InvalidCallbackReturn { combinator, found } => {
                write!(f, "callback passed to `{}` must return an outcome, found {}", combinator, found)
            },
        }
    }
}

impl std::error::Error for OutcomeError {}
