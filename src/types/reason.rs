//! Failure payloads understood by the diagnostic layer.
use core::any::Any;
use core::fmt::{self, Display};

use crate::types::value::{collect_fields, short_type_name, Fields};
use crate::types::{ContextFrame, Value, WrappedFailure};

/// Reason stored in a failed outcome once it enters the diagnostic layer.
///
/// Plain [`Message`](Reason::Message)s are considered safe to show to users;
/// every other terminal shape is opaque and is replaced by a correlation code
/// in [`user_message`](crate::facade::Diagnostics::user_message).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Reason {
    /// A bare failure carried no reason.
    #[default]
    Unspecified,
    /// Plain, user-presentable text.
    Message(String),
    /// Enum-like symbolic reason such as `db_timeout`.
    Tag(String),
    /// A caught panic or error object.
    Raised(Raised),
    /// Arbitrary data.
    Data(Value),
    /// A failure annotated with one or more context frames.
    Wrapped(Box<WrappedFailure>),
}

impl Reason {
    #[inline]
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    #[inline]
    pub fn data(value: impl Into<Value>) -> Self {
        Self::Data(value.into())
    }

    /// Wraps an error object.
    #[inline]
    pub fn raised<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::Raised(Raised::from_error(error))
    }

    #[inline]
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Self::Wrapped(_))
    }

    /// Returns the chain if this reason is annotated.
    #[inline]
    pub fn as_wrapped(&self) -> Option<&WrappedFailure> {
        match self {
            Self::Wrapped(chain) => Some(chain.as_ref()),
            _ => None,
        }
    }

    /// Returns the innermost, non-annotated reason.
    pub fn terminal(&self) -> &Reason {
        match self {
            Self::Wrapped(chain) => chain.terminal(),
            other => other,
        }
    }

    /// Returns `true` when the terminal reason is a caught panic or error object.
    pub fn is_raised(&self) -> bool {
        matches!(self.terminal(), Self::Raised(_))
    }

    /// Splits the reason into its frames (outermost first) and terminal reason.
    pub fn into_parts(self) -> (Vec<ContextFrame>, Reason) {
        match self {
            Self::Wrapped(chain) => chain.into_parts(),
            terminal => (Vec::new(), terminal),
        }
    }

    /// The reason's own derived message.
    ///
    /// For an annotated reason this is the full rendered chain.
    pub fn derived_message(&self) -> String {
        match self {
            Self::Unspecified => "unspecified failure".into(),
            Self::Message(text) | Self::Tag(text) => text.clone(),
            Self::Raised(raised) => raised.message.clone(),
            Self::Data(value) => value.to_text(),
            Self::Wrapped(chain) => chain.render_message(),
        }
    }

    /// Converts a terminal reason into a [`Value`] for shrinking.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Unspecified => Value::Null,
            Self::Message(text) => Value::Str(text.clone()),
            Self::Tag(tag) => Value::Atom(tag.clone()),
            Self::Raised(raised) => raised.to_value(),
            Self::Data(value) => value.clone(),
            Self::Wrapped(chain) => Value::Str(chain.render_message()),
        }
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.derived_message())
    }
}

impl std::error::Error for Reason {}

impl From<&str> for Reason {
    #[inline]
    fn from(text: &str) -> Self {
        Self::Message(text.into())
    }
}

impl From<String> for Reason {
    #[inline]
    fn from(text: String) -> Self {
        Self::Message(text)
    }
}

impl From<Raised> for Reason {
    #[inline]
    fn from(raised: Raised) -> Self {
        Self::Raised(raised)
    }
}

impl From<WrappedFailure> for Reason {
    #[inline]
    fn from(chain: WrappedFailure) -> Self {
        Self::Wrapped(Box::new(chain))
    }
}

/// Strings become messages and atoms become tags; anything else is data.
impl From<Value> for Reason {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Unspecified,
            Value::Str(text) => Self::Message(text),
            Value::Atom(tag) => Self::Tag(tag),
            Value::Exception { type_name, message, fields } => {
                Self::Raised(Raised { type_name, message, fields })
            },
            other => Self::Data(other),
        }
    }
}

impl From<Option<Reason>> for Reason {
    #[inline]
    fn from(reason: Option<Reason>) -> Self {
        reason.unwrap_or_default()
    }
}

/// A caught panic or an error object turned into data.
#[derive(Debug, Clone, PartialEq)]
pub struct Raised {
    type_name: String,
    message: String,
    fields: Fields,
}

impl Raised {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { type_name: type_name.into(), message: message.into(), fields: Fields::new() }
    }

    /// Describes an error object; the discriminator is its type name.
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::new(short_type_name(core::any::type_name::<E>()), error.to_string())
    }

    /// Describes a panic payload caught by [`std::panic::catch_unwind`].
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(text) => *text,
            Err(payload) => match payload.downcast::<&'static str>() {
                Ok(text) => (*text).to_owned(),
                Err(_) => "panic with a non-string payload".to_owned(),
            },
        };
        Self::new("panic", message)
    }

    /// Adds a declared field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.extend(collect_fields([(key, value)]));
        self
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn to_value(&self) -> Value {
        Value::Exception {
            type_name: self.type_name.clone(),
            message: self.message.clone(),
            fields: self.fields.clone(),
        }
    }
}

impl Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}
