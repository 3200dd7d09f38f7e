//! Label and metadata carried into a new context frame.
//!
//! [`Annotation`] is the eager form; [`LazyAnnotation`] defers building the
//! label and metadata until a failure is actually annotated, so the success
//! path never runs the closure.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{annotate, meta, LazyAnnotation, Outcome, Reason};
//!
//! let ok: Outcome<u32, Reason> = Outcome::SuccessWith(7);
//! let still_ok = annotate(ok, LazyAnnotation::new(|| -> &'static str { panic!("never evaluated") }));
//! assert_eq!(still_ok, Outcome::SuccessWith(7));
//!
//! let failed: Outcome<u32, &str> = Outcome::FailureWith("db_timeout");
//! let wrapped = annotate(failed, ("fetching user", meta!{ "user_id" => 123 }));
//! assert!(wrapped.is_failure());
//! ```
use crate::traits::IntoAnnotation;
use crate::types::{Metadata, Value};

/// The label and metadata of a context frame that has not been built yet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Annotation {
    pub(crate) label: Option<String>,
    pub(crate) metadata: Metadata,
}

impl Annotation {
    /// An annotation with neither label nor metadata.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// An annotation with only a label.
    #[inline]
    pub fn label(label: impl Into<String>) -> Self {
        Self { label: Some(label.into()), metadata: Metadata::new() }
    }

    /// Adds one metadata entry.
    #[inline]
    pub fn metadata<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.metadata.insert(key, value);
        self
    }

    /// Replaces the metadata map.
    #[inline]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    #[inline]
    pub fn into_parts(self) -> (Option<String>, Metadata) {
        (self.label, self.metadata)
    }
}

/// An annotation produced on demand.
#[repr(transparent)]
pub struct LazyAnnotation<F> {
    generator: F,
}

impl<F> LazyAnnotation<F> {
    /// Wraps a closure that builds the annotation.
    #[inline]
    pub fn new(generator: F) -> Self {
        Self { generator }
    }
}

impl<F, A> IntoAnnotation for LazyAnnotation<F>
where
    F: FnOnce() -> A,
    A: IntoAnnotation,
{
    #[inline]
    fn into_annotation(self) -> Annotation {
        (self.generator)().into_annotation()
    }
}
