//! Ergonomic macros for building metadata and annotating failures.
//!
//! - [`macro@crate::meta`] builds a [`Metadata`](crate::Metadata) map from
//!   `key => value` pairs, keeping their order.
//! - [`macro@crate::label`] defers formatting a label until a failure is
//!   actually annotated.
//! - [`macro@crate::annotate`] annotates an outcome with a label and inline
//!   metadata in one expression.
//! - [`macro@crate::function_ref`] describes a callable for diagnostics.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{annotate, label, Outcome};
//!
//! let order_id = 981;
//! let failed: Outcome<(), &str> = Outcome::FailureWith("card declined");
//! let wrapped = annotate!(failed, label!("charging order {}", order_id), "attempt" => 2);
//!
//! let chain = wrapped.reason().and_then(|r| r.as_wrapped()).unwrap();
//! assert_eq!(chain.frame().label(), Some("charging order 981"));
//! assert_eq!(chain.frame().metadata().len(), 1);
//! ```

/// Builds a [`Metadata`](crate::Metadata) map from `key => value` pairs.
///
/// Values may be anything convertible into a [`Value`](crate::Value).
///
/// # Examples
///
/// ```
/// use outcome_rail::{meta, Value};
///
/// let m = meta!{ "user_id" => 123, "region" => "eu", "retry" => true };
/// assert_eq!(m.len(), 3);
/// assert_eq!(m.get("region"), Some(&Value::from("eu")));
/// assert!(meta!{}.is_empty());
/// ```
#[macro_export]
macro_rules! meta {
    () => {
        $crate::Metadata::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut metadata = $crate::Metadata::new();
        $(metadata.insert($key, $value);)+
        metadata
    }};
}

/// Creates a lazily formatted label.
///
/// Accepts the same arguments as `format!`; nothing is formatted unless the
/// annotated outcome is a failure.
///
/// # Examples
///
/// ```
/// use outcome_rail::{annotate, label, Outcome};
///
/// let ok: Outcome<u8, &str> = Outcome::SuccessWith(1);
/// assert_eq!(annotate(ok, label!("user {}", 42)), Outcome::SuccessWith(1));
/// ```
#[macro_export]
macro_rules! label {
    ($($arg:tt)*) => {
        $crate::LazyAnnotation::new(move || format!($($arg)*))
    };
}

/// Annotates an outcome with an optional label and inline metadata.
///
/// # Syntax
///
/// - `annotate!(outcome)`: frame with neither label nor metadata
/// - `annotate!(outcome, label)`: any [`IntoAnnotation`](crate::IntoAnnotation)
/// - `annotate!(outcome, label, "key" => value, ...)`: label plus metadata
///
/// The label and metadata are only evaluated for failures. The frame records
/// the location of the macro invocation.
///
/// # Examples
///
/// ```
/// use outcome_rail::{annotate, unwrap_chain, Outcome, Value};
///
/// let failed: Outcome<(), &str> = Outcome::FailureWith("db_timeout");
/// let wrapped = annotate!(failed, "fetching user", "user_id" => 123);
///
/// let (frames, _) = unwrap_chain(wrapped.into_reason().unwrap());
/// assert_eq!(frames[0].metadata().get("user_id"), Some(&Value::Int(123)));
/// ```
#[macro_export]
macro_rules! annotate {
    ($outcome:expr $(,)?) => {
        $crate::annotate($outcome, ())
    };
    ($outcome:expr, $label:expr $(,)?) => {
        $crate::annotate($outcome, $label)
    };
    ($outcome:expr, $label:expr, $($key:expr => $value:expr),+ $(,)?) => {
        $crate::annotate(
            $outcome,
            $crate::LazyAnnotation::new(|| {
                $crate::IntoAnnotation::into_annotation($label)$(.metadata($key, $value))+
            }),
        )
    };
}

/// Describes a callable as a [`FunctionRef`](crate::FunctionRef).
///
/// - `function_ref!(owner, name, arity)`: a named function, rendered `&owner.name/arity`
/// - `function_ref!(arity)`: an anonymous function defined at the invocation site
///
/// # Examples
///
/// ```
/// use outcome_rail::{function_ref, Value};
///
/// let named = Value::from(function_ref!("Billing.Invoice", "send", 2));
/// assert_eq!(named.to_string(), "&Billing.Invoice.send/2");
///
/// let anonymous = function_ref!(1);
/// assert!(anonymous.to_string().starts_with("#Function<"));
/// ```
#[macro_export]
macro_rules! function_ref {
    ($owner:expr, $name:expr, $arity:expr $(,)?) => {
        $crate::FunctionRef::named($owner, $name, $arity)
    };
    ($arity:expr $(,)?) => {
        $crate::FunctionRef::anonymous($arity, file!(), line!())
    };
}
