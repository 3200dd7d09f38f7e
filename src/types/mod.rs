//! Outcome, reason and diagnostic data types.
//!
//! # Examples
//!
//! ```
//! use outcome_rail::{annotate, meta, Outcome, Reason};
//!
//! let failed: Outcome<u64, &str> = Outcome::FailureWith("db_timeout");
//! let wrapped = annotate(failed, ("fetching user", meta!{ "user_id" => 123 }));
//!
//! let (frames, terminal) = wrapped.into_reason().unwrap().into_parts();
//! assert_eq!(frames[0].label(), Some("fetching user"));
//! assert_eq!(terminal, Reason::message("db_timeout"));
//! ```
pub mod annotation;
pub mod context_frame;
pub mod error;
pub mod metadata;
pub mod outcome;
pub mod reason;
pub mod value;
pub mod wrapped;

pub use annotation::*;
pub use context_frame::*;
pub use error::*;
pub use metadata::*;
pub use outcome::*;
pub use reason::*;
pub use value::*;
pub use wrapped::*;

/// Outcome whose failures carry a diagnostic [`Reason`].
pub type Annotated<T> = Outcome<T, Reason>;
