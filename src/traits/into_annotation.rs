//! Trait for converting types into a frame annotation.
//!
//! [`annotate`](crate::annotate) and the [`OutcomeExt`](crate::OutcomeExt)
//! methods accept anything implementing [`IntoAnnotation`], so a label, a
//! metadata map, both, or neither can be passed without extra wrapping.
//!
//! # Implementations
//!
//! - `&'static str`, `String`, `Cow<'static, str>`: label only
//! - [`Metadata`]: metadata only
//! - `(label, Metadata)`: both
//! - `()`: neither
//! - [`Annotation`] and [`LazyAnnotation`](crate::LazyAnnotation)
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{meta, IntoAnnotation};
//!
//! let a = "loading profile".into_annotation();
//! let b = meta!{ "user_id" => 7 }.into_annotation();
//! let c = ("loading profile", meta!{ "user_id" => 7 }).into_annotation();
//!
//! assert_eq!(a.into_parts().0.as_deref(), Some("loading profile"));
//! assert_eq!(b.into_parts().0, None);
//! assert_eq!(c.into_parts().1.len(), 1);
//! ```
use std::borrow::Cow;

use crate::types::{Annotation, Metadata};

/// Converts a type into an [`Annotation`] for a new context frame.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used to annotate a failure",
    label = "this type does not implement `IntoAnnotation`",
    note = "pass a label, a `Metadata` map (see `meta!`), a `(label, Metadata)` pair, or an `Annotation`"
)]
pub trait IntoAnnotation {
    fn into_annotation(self) -> Annotation;
}

impl IntoAnnotation for &'static str {
    #[inline]
    fn into_annotation(self) -> Annotation {
        Annotation::label(self)
    }
}

impl IntoAnnotation for String {
    #[inline]
    fn into_annotation(self) -> Annotation {
        Annotation::label(self)
    }
}

impl IntoAnnotation for Cow<'static, str> {
    #[inline]
    fn into_annotation(self) -> Annotation {
        Annotation::label(self.into_owned())
    }
}

impl IntoAnnotation for Metadata {
    #[inline]
    fn into_annotation(self) -> Annotation {
        Annotation::new().with_metadata(self)
    }
}

impl<L: Into<String>> IntoAnnotation for (L, Metadata) {
    #[inline]
    fn into_annotation(self) -> Annotation {
        Annotation::label(self.0).with_metadata(self.1)
    }
}

impl IntoAnnotation for () {
    #[inline]
    fn into_annotation(self) -> Annotation {
        Annotation::new()
    }
}

impl IntoAnnotation for Annotation {
    #[inline]
    fn into_annotation(self) -> Annotation {
        self
    }
}
