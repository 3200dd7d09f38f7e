//! Dynamic value model used for diagnostics.
//!
//! [`Value`] is the owned, acyclic tree that the shrinker reduces and the
//! facade renders. Typed data enters it through the
//! [`Describe`](crate::traits::Describe) trait or the `From` conversions below.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::Value;
//!
//! let user = Value::record("User", [("id", Value::from(1)), ("name", Value::from("Alice"))]);
//! assert_eq!(user.to_string(), r#"User{id: 1, name: "Alice"}"#);
//! ```
use core::fmt::{self, Display, Write};

/// Ordered field list shared by maps, records and exception values.
pub type Fields = Vec<(String, Value)>;

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Enum-like symbolic constant, rendered as `:name`.
    Atom(String),
    List(Vec<Value>),
    /// Fixed-arity tuple, always rendered as literal text.
    Tuple(Vec<Value>),
    Map(Fields),
    /// A record with a type discriminator.
    Struct { type_name: String, fields: Fields },
    /// An error-like value: discriminator, derived message, extra fields.
    Exception { type_name: String, message: String, fields: Fields },
    Function(FunctionRef),
    /// Marker for list elements dropped by the shrinker.
    Omitted(usize),
}

/// Reference to a callable, as far as it can be named.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FunctionRef {
    pub owner: Option<String>,
    pub name: Option<String>,
    pub arity: usize,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl FunctionRef {
    /// A named function `owner.name/arity`.
    pub fn named(owner: impl Into<String>, name: impl Into<String>, arity: usize) -> Self {
        Self { owner: Some(owner.into()), name: Some(name.into()), arity, ..Self::default() }
    }

    /// An anonymous function defined at `file:line`.
    pub fn anonymous(arity: usize, file: impl Into<String>, line: u32) -> Self {
        Self { arity, file: Some(file.into()), line: Some(line), ..Self::default() }
    }
}

impl Display for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.owner, &self.name) {
            (Some(owner), Some(name)) => write!(f, "&{}.{}/{}", owner, name, self.arity),
            (None, Some(name)) => write!(f, "&{}/{}", name, self.arity),
            _ => {
                f.write_str("#Function<")?;
                match (&self.file, self.line) {
                    (Some(file), Some(line)) => write!(f, "{}:{}", file, line)?,
                    (Some(file), None) => f.write_str(file)?,
                    _ => f.write_str("anonymous")?,
                }
                write!(f, "/{}>", self.arity)
            },
        }
    }
}

impl Value {
    /// Creates an atom value.
    #[inline]
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    /// Creates a tuple value.
    #[inline]
    pub fn tuple<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Creates a list value.
    #[inline]
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Creates a map value, preserving the given entry order.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Map(collect_fields(entries))
    }

    /// Creates a record value with a type discriminator.
    pub fn record<I, K, V>(type_name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Struct { type_name: type_name.into(), fields: collect_fields(fields) }
    }

    /// Creates an exception-like value.
    pub fn exception<I, K, V>(type_name: impl Into<String>, message: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Exception {
            type_name: type_name.into(),
            message: message.into(),
            fields: collect_fields(fields),
        }
    }

    /// Describes an error object as an exception-like value.
    pub fn from_error<E>(error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Self::Exception {
            type_name: short_type_name(core::any::type_name::<E>()),
            message: error.to_string(),
            fields: Fields::new(),
        }
    }

    /// Converts any serializable value into an opaque property tree.
    ///
    /// Types that cannot be serialized become [`Value::Null`].
    #[cfg(feature = "serde")]
    pub fn from_serialize<T>(value: &T) -> Self
    where
        T: serde::Serialize + ?Sized,
    {
        serde_json::to_value(value).map(Self::from).unwrap_or(Self::Null)
    }

    /// Returns `true` for scalar values (including atoms and strings).
    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::Str(_) | Self::Atom(_)
        )
    }

    /// Looks up a field of a map, record or exception value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let fields = match self {
            Self::Map(fields) | Self::Struct { fields, .. } | Self::Exception { fields, .. } => fields,
            _ => return None,
        };
        fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Renders the value as text, leaving top-level strings unquoted.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

pub(crate) fn collect_fields<I, K, V>(entries: I) -> Fields
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Strips module paths from a type name while keeping generic arguments readable.
/// Strips module paths from every path in a type name, so
/// `(alloc::string::String, &core::num::ParseIntError)` becomes
/// `(String, &ParseIntError)`.
pub(crate) fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut start = 0;
    for (idx, ch) in full.char_indices() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            continue;
        }
        out.push_str(last_segment(&full[start..idx]));
        out.push(ch);
        start = idx + ch.len_utf8();
    }
    out.push_str(last_segment(&full[start..]));
    out
}

fn last_segment(path: &str) -> &str {
    match path.rfind("::") {
        Some(0) | None => path,
        Some(idx) => &path[idx + 2..],
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[(String, Value)]) -> fmt::Result {
    f.write_char('{')?;
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {}", key, value)?;
    }
    f.write_char('}')
}

fn write_items(f: &mut fmt::Formatter<'_>, open: char, items: &[Value], close: char) -> fmt::Result {
    f.write_char(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_char(close)
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("nil"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{:?}", x),
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Atom(a) => write!(f, ":{}", a),
            Self::List(items) => write_items(f, '[', items, ']'),
            Self::Tuple(items) => write_items(f, '{', items, '}'),
            Self::Map(fields) => write_fields(f, fields),
            Self::Struct { type_name, fields } => {
                f.write_str(type_name)?;
                write_fields(f, fields)
            },
            Self::Exception { type_name, message, fields } => {
                write!(f, "{}({:?})", type_name, message)?;
                if !fields.is_empty() {
                    write_fields(f, fields)?;
                }
                Ok(())
            },
            Self::Function(func) => write!(f, "{}", func),
            Self::Omitted(count) => write!(f, "...({} more)", count),
        }
    }
}

macro_rules! value_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(v: $ty) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map(Self::Int).unwrap_or(Self::Float(v as f64))
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        i64::try_from(v).map(Self::Int).unwrap_or(Self::Float(v as f64))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<()> for Value {
    #[inline]
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<FunctionRef> for Value {
    #[inline]
    fn from(v: FunctionRef) -> Self {
        Self::Function(v)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(Self::Null)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(v: Vec<V>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match v {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Self::Str(s),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Json::Object(entries) => {
                Self::Map(entries.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            },
        }
    }
}

/// Discriminator key used when records are serialized as maps.
#[cfg(feature = "serde")]
pub const TYPE_KEY: &str = "__type__";

#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Str(s) | Self::Atom(s) => serializer.serialize_str(s),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            },
            Self::Map(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            },
            Self::Struct { type_name, fields } => {
                let mut map = serializer.serialize_map(Some(fields.len() + 1))?;
                map.serialize_entry(TYPE_KEY, type_name)?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            },
            Self::Exception { type_name, message, fields } => {
                let mut map = serializer.serialize_map(Some(fields.len() + 2))?;
                map.serialize_entry(TYPE_KEY, type_name)?;
                map.serialize_entry("message", message)?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            },
            Self::Tuple(_) | Self::Function(_) | Self::Omitted(_) => {
                serializer.collect_str(self)
            },
        }
    }
}
