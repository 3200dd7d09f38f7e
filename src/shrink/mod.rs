//! Recursive reduction of values to their diagnostically useful subset.
//!
//! The [`Shrinker`] keeps identifying fields (`id`, `name`, `*_id`, `*Id`,
//! `*ID`) and anything that still holds nested structure after shrinking,
//! caps long lists, and renders tuples and functions as literal text. Empty
//! list elements are dropped and counted; a list whose elements are all empty
//! collapses into a single [`Value::Omitted`] count, which the enclosing
//! record then drops. The result is used both for human messages and for
//! structured log details.
//!
//! Shrinking is idempotent: shrinking a shrunk value returns it unchanged.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{Shrinker, Value};
//!
//! let user = Value::map([
//!     ("id", Value::from(1)),
//!     ("name", Value::from("Alice")),
//!     ("age", Value::from(30)),
//! ]);
//! let shrunk = Shrinker::default().shrink(&user);
//! assert_eq!(shrunk.to_string(), r#"{id: 1, name: "Alice"}"#);
//! ```
use std::collections::HashSet;

use crate::types::{Fields, Metadata, Reason, Value};

/// Default number of list elements kept by the shrinker.
pub const DEFAULT_LIST_LIMIT: usize = 5;

/// Tunables of the [`Shrinker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShrinkConfig {
    /// Maximum number of elements kept from a list; the rest are counted in a
    /// trailing [`Value::Omitted`] marker.
    pub list_limit: usize,
}

impl Default for ShrinkConfig {
    fn default() -> Self {
        Self { list_limit: DEFAULT_LIST_LIMIT }
    }
}

impl ShrinkConfig {
    #[inline]
    pub fn with_list_limit(mut self, list_limit: usize) -> Self {
        self.list_limit = list_limit;
        self
    }
}

/// Reduces [`Value`]s to compact projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shrinker {
    config: ShrinkConfig,
}

impl Shrinker {
    #[inline]
    pub fn new(config: ShrinkConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &ShrinkConfig {
        &self.config
    }

    /// Shrinks `value`, depth first.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::{ShrinkConfig, Shrinker, Value};
    ///
    /// let shrinker = Shrinker::new(ShrinkConfig::default().with_list_limit(2));
    /// let ids = Value::list([1, 2, 3, 4]);
    /// assert_eq!(shrinker.shrink(&ids).to_string(), "[1, 2, ...(2 more)]");
    ///
    /// let empties = Value::List(vec![Value::Map(Vec::new()); 3]);
    /// assert_eq!(shrinker.shrink(&empties), Value::Omitted(3));
    /// ```
    pub fn shrink(&self, value: &Value) -> Value {
        match value {
            Value::Null
            | Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Str(_)
            | Value::Atom(_)
            | Value::Omitted(_) => value.clone(),
            Value::Tuple(_) | Value::Function(_) => Value::Str(value.to_string()),
            Value::Exception { type_name, message, fields } => Value::Exception {
                type_name: type_name.clone(),
                message: message.clone(),
                fields: fields
                    .iter()
                    .filter(|(key, _)| key != "message")
                    .map(|(key, value)| (key.clone(), self.shrink(value)))
                    .collect(),
            },
            Value::Struct { type_name, fields } => Value::Struct {
                type_name: type_name.clone(),
                fields: self.shrink_fields(fields),
            },
            Value::Map(fields) => Value::Map(self.shrink_fields(fields)),
            Value::List(items) => match keyword_fields(items) {
                Some(fields) => Value::Map(self.shrink_fields(&fields)),
                None => self.shrink_list(items),
            },
        }
    }

    fn shrink_fields(&self, fields: &[(String, Value)]) -> Fields {
        let mut kept: Fields = fields
            .iter()
            .filter_map(|(key, value)| {
                let shrunk = self.shrink(value);
                (is_identifying(key) || is_nested(&shrunk)).then(|| (key.clone(), shrunk))
            })
            .collect();
        kept.sort_by(|(a, _), (b, _)| field_rank(a).cmp(&field_rank(b)).then_with(|| a.cmp(b)));
        kept
    }

    fn shrink_list(&self, items: &[Value]) -> Value {
        let (items, already_omitted) = match items.split_last() {
            Some((Value::Omitted(count), rest)) => (rest, *count),
            _ => (items, 0),
        };
        if items.is_empty() {
            return match already_omitted {
                0 => Value::List(Vec::new()),
                count => Value::List(vec![Value::Omitted(count)]),
            };
        }

        let total = items.len();
        let mut kept: Vec<Value> = items
            .iter()
            .map(|item| self.shrink(item))
            .filter(|shrunk| !is_uninteresting(shrunk))
            .collect();
        kept.truncate(self.config.list_limit);
        if kept.is_empty() {
            return Value::Omitted(total + already_omitted);
        }

        let omitted = total - kept.len() + already_omitted;
        if omitted > 0 {
            kept.push(Value::Omitted(omitted));
        }
        Value::List(kept)
    }

    /// Shrinks every metadata value, keeping all keys in order.
    pub fn shrink_metadata(&self, metadata: &Metadata) -> Metadata {
        metadata.iter().map(|(key, value)| (key, self.shrink(value))).collect()
    }

    /// Shrinks a failure reason.
    ///
    /// An annotated reason stays a rendered chain, but its terminal payload
    /// and the metadata of every frame are shrunk before rendering.
    pub fn shrink_reason(&self, reason: &Reason) -> Value {
        match reason {
            Reason::Wrapped(chain) => Value::Str(chain.render_shrunk(self)),
            other => self.shrink(&other.to_value()),
        }
    }
}

/// Whether `key` names an identifying field.
pub fn is_identifying(key: &str) -> bool {
    field_rank(key) < 3
}

fn field_rank(key: &str) -> u8 {
    match key {
        "id" => 0,
        "name" => 1,
        _ if key.ends_with("_id") || key.ends_with("Id") || key.ends_with("ID") => 2,
        _ => 3,
    }
}

/// Whether a shrunk value still carries nested structure worth keeping.
fn is_nested(value: &Value) -> bool {
    match value {
        Value::List(items) => !items.is_empty(),
        Value::Map(fields) | Value::Struct { fields, .. } => !fields.is_empty(),
        Value::Exception { .. } => true,
        _ => false,
    }
}

fn is_uninteresting(value: &Value) -> bool {
    match value {
        Value::Omitted(_) => true,
        Value::List(items) => items.is_empty(),
        Value::Map(fields) | Value::Struct { fields, .. } => fields.is_empty(),
        _ => false,
    }
}

/// Converts a keyword list (2-tuples keyed by unique atoms or strings) into map fields.
fn keyword_fields(items: &[Value]) -> Option<Fields> {
    if items.is_empty() {
        return None;
    }
    let mut seen = HashSet::with_capacity(items.len());
    items
        .iter()
        .map(|item| match item {
            Value::Tuple(pair) => match pair.as_slice() {
                [Value::Atom(key) | Value::Str(key), value] if seen.insert(key.as_str()) => {
                    Some((key.clone(), value.clone()))
                },
                _ => None,
            },
            _ => None,
        })
        .collect()
}
