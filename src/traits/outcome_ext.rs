//! Extension trait for annotating outcomes and results in method position.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{meta, OutcomeExt, Reason};
//!
//! fn load(path: &str) -> Result<String, std::io::Error> {
//!     std::fs::read_to_string(path)
//! }
//!
//! let loaded = load("/definitely/not/here.toml")
//!     .map_err(|e| Reason::raised(&e))
//!     .annotate_with("loading configuration", meta!{ "attempt" => 1 });
//! assert!(loaded.is_failure());
//! ```
use crate::context::annotate;
use crate::traits::IntoAnnotation;
use crate::types::{Annotated, LazyAnnotation, Metadata, Outcome, Reason};

/// Adds context frames to failures without leaving method-chaining style.
///
/// All methods record the location of their caller as the frame's call site.
pub trait OutcomeExt<T> {
    /// Annotates a failure with a label, metadata, or both.
    fn annotate<A: IntoAnnotation>(self, annotation: A) -> Annotated<T>;

    /// Annotates a failure with a label and metadata.
    fn annotate_with<L: Into<String>>(self, label: L, metadata: Metadata) -> Annotated<T>;

    /// Annotates a failure with an annotation built only when needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use outcome_rail::{Outcome, OutcomeExt};
    ///
    /// let user_id = 42;
    /// let failed: Outcome<(), &str> = Outcome::FailureWith("not found");
    /// let wrapped = failed.annotate_lazy(|| format!("loading user {}", user_id));
    /// let chain = wrapped.reason().and_then(|r| r.as_wrapped()).unwrap();
    /// assert_eq!(chain.frame().label(), Some("loading user 42"));
    /// ```
    fn annotate_lazy<F, A>(self, generator: F) -> Annotated<T>
    where
        F: FnOnce() -> A,
        A: IntoAnnotation;
}

impl<T, E: Into<Reason>> OutcomeExt<T> for Outcome<T, E> {
    #[inline]
    #[track_caller]
    fn annotate<A: IntoAnnotation>(self, annotation: A) -> Annotated<T> {
        annotate(self, annotation)
    }

    #[inline]
    #[track_caller]
    fn annotate_with<L: Into<String>>(self, label: L, metadata: Metadata) -> Annotated<T> {
        annotate(self, (label, metadata))
    }

    #[inline]
    #[track_caller]
    fn annotate_lazy<F, A>(self, generator: F) -> Annotated<T>
    where
        F: FnOnce() -> A,
        A: IntoAnnotation,
    {
        annotate(self, LazyAnnotation::new(generator))
    }
}

impl<T, E: Into<Reason>> OutcomeExt<T> for Result<T, E> {
    #[inline]
    #[track_caller]
    fn annotate<A: IntoAnnotation>(self, annotation: A) -> Annotated<T> {
        annotate(Outcome::from(self), annotation)
    }

    #[inline]
    #[track_caller]
    fn annotate_with<L: Into<String>>(self, label: L, metadata: Metadata) -> Annotated<T> {
        annotate(Outcome::from(self), (label, metadata))
    }

    #[inline]
    #[track_caller]
    fn annotate_lazy<F, A>(self, generator: F) -> Annotated<T>
    where
        F: FnOnce() -> A,
        A: IntoAnnotation,
    {
        annotate(Outcome::from(self), LazyAnnotation::new(generator))
    }
}
