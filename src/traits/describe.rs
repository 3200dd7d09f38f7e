//! Declared-field description of typed values.
//!
//! Implement [`Describe`] for a type to make it shrinkable: the shrinker only
//! ever sees the [`Value`] it returns.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{Describe, Shrinker, Value};
//!
//! struct User {
//!     id: u64,
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Describe for User {
//!     fn describe(&self) -> Value {
//!         Value::record("User", [
//!             ("id", Value::from(self.id)),
//!             ("name", Value::from(self.name.as_str())),
//!             ("age", Value::from(self.age)),
//!         ])
//!     }
//! }
//!
//! let user = User { id: 1, name: "Alice".into(), age: 30 };
//! let shrunk = Shrinker::default().shrink(&user.describe());
//! assert_eq!(shrunk.to_string(), r#"User{id: 1, name: "Alice"}"#);
//! ```
use crate::shrink::Shrinker;
use crate::types::{Outcome, Raised, Reason, Value, WrappedFailure};

/// Produces the diagnostic [`Value`] of a typed value.
pub trait Describe {
    fn describe(&self) -> Value;

    /// The shrunk description used for log details.
    ///
    /// Annotated failures override this so that their terminal payload and
    /// frame metadata are shrunk before the chain is rendered.
    fn shrunk(&self, shrinker: &Shrinker) -> Value {
        shrinker.shrink(&self.describe())
    }

    /// Whether this value stands for a caught panic or error object.
    fn is_raised(&self) -> bool {
        false
    }
}

impl Describe for Value {
    #[inline]
    fn describe(&self) -> Value {
        self.clone()
    }

    fn is_raised(&self) -> bool {
        matches!(self, Value::Exception { .. })
    }
}

impl Describe for Reason {
    #[inline]
    fn describe(&self) -> Value {
        self.to_value()
    }

    #[inline]
    fn shrunk(&self, shrinker: &Shrinker) -> Value {
        shrinker.shrink_reason(self)
    }

    #[inline]
    fn is_raised(&self) -> bool {
        Reason::is_raised(self)
    }
}

impl Describe for Raised {
    #[inline]
    fn describe(&self) -> Value {
        self.to_value()
    }

    #[inline]
    fn is_raised(&self) -> bool {
        true
    }
}

impl Describe for WrappedFailure {
    fn describe(&self) -> Value {
        Value::Str(self.render_message())
    }

    fn shrunk(&self, shrinker: &Shrinker) -> Value {
        Value::Str(self.render_shrunk(shrinker))
    }

    fn is_raised(&self) -> bool {
        matches!(self.terminal(), Reason::Raised(_))
    }
}

impl Describe for str {
    #[inline]
    fn describe(&self) -> Value {
        Value::Str(self.into())
    }
}

impl Describe for String {
    #[inline]
    fn describe(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl Describe for () {
    #[inline]
    fn describe(&self) -> Value {
        Value::Null
    }
}

macro_rules! describe_via_from {
    ($($ty:ty),*) => {
        $(
            impl Describe for $ty {
                #[inline]
                fn describe(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

describe_via_from!(bool, i8, i16, i32, i64, u8, u16, u32, u64, usize, f64);

impl<T: Describe + ?Sized> Describe for &T {
    #[inline]
    fn describe(&self) -> Value {
        (**self).describe()
    }

    #[inline]
    fn shrunk(&self, shrinker: &Shrinker) -> Value {
        (**self).shrunk(shrinker)
    }

    #[inline]
    fn is_raised(&self) -> bool {
        (**self).is_raised()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    #[inline]
    fn describe(&self) -> Value {
        (**self).describe()
    }

    #[inline]
    fn shrunk(&self, shrinker: &Shrinker) -> Value {
        (**self).shrunk(shrinker)
    }

    #[inline]
    fn is_raised(&self) -> bool {
        (**self).is_raised()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe(&self) -> Value {
        self.as_ref().map_or(Value::Null, Describe::describe)
    }

    fn shrunk(&self, shrinker: &Shrinker) -> Value {
        self.as_ref().map_or(Value::Null, |value| value.shrunk(shrinker))
    }
}

impl<T: Describe> Describe for [T] {
    fn describe(&self) -> Value {
        Value::List(self.iter().map(Describe::describe).collect())
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe(&self) -> Value {
        self.as_slice().describe()
    }
}

/// Outcomes describe as their tagged dynamic form.
impl<T: Describe, E: Describe> Describe for Outcome<T, E> {
    fn describe(&self) -> Value {
        let dynamic: Outcome<Value, Value> = match self {
            Outcome::Success => Outcome::Success,
            Outcome::SuccessWith(value) => Outcome::SuccessWith(value.describe()),
            Outcome::Failure => Outcome::Failure,
            Outcome::FailureWith(reason) => Outcome::FailureWith(reason.describe()),
        };
        dynamic.to_value()
    }

    fn is_raised(&self) -> bool {
        self.reason().is_some_and(Describe::is_raised)
    }
}
