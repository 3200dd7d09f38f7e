//! Wire encodings for shrunk projections.
use crate::types::Value;

/// Turns a shrunk projection into its wire form.
///
/// Encoding cannot fail from the caller's point of view; implementations fall
/// back to a textual rendering instead.
pub trait Serializer {
    fn encode(&self, value: &Value) -> String;
}

impl<S: Serializer + ?Sized> Serializer for &S {
    #[inline]
    fn encode(&self, value: &Value) -> String {
        (**self).encode(value)
    }
}

/// Encodes with the value's `Display` rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplaySerializer;

impl Serializer for DisplaySerializer {
    #[inline]
    fn encode(&self, value: &Value) -> String {
        value.to_string()
    }
}

/// Encodes as compact JSON.
///
/// Records become objects carrying their discriminator under
/// [`TYPE_KEY`](crate::types::TYPE_KEY).
///
/// # Examples
///
/// ```
/// use outcome_rail::facade::{JsonSerializer, Serializer};
/// use outcome_rail::Value;
///
/// let user = Value::record("User", [("id", 1)]);
/// assert_eq!(JsonSerializer.encode(&user), r#"{"__type__":"User","id":1}"#);
/// ```
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

#[cfg(feature = "serde")]
impl Serializer for JsonSerializer {
    fn encode(&self, value: &Value) -> String {
        serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
    }
}
