//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use outcome_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`annotate!`], [`label!`], [`meta!`]
//! - **Functions**: [`annotate`], [`chain`], [`recover`], [`run`], [`log`], [`user_message`]
//! - **Types**: [`Outcome`], [`Reason`], [`Metadata`], [`Value`], [`Annotated`]
//! - **Traits**: [`OutcomeExt`], [`IntoOutcome`], [`Describe`]
//!
//! # Examples
//!
//! ```
//! use outcome_rail::prelude::*;
//!
//! fn parse_port(raw: &str) -> Annotated<u16> {
//!     raw.parse::<u16>()
//!         .map_err(|e| Reason::raised(&e))
//!         .annotate_with("parsing port", meta!{ "raw" => raw })
//! }
//!
//! assert_eq!(parse_port("8080"), Outcome::SuccessWith(8080));
//! assert!(parse_port("eighty").reason().is_some_and(Reason::is_wrapped));
//! ```

// Macros
pub use crate::{annotate, label, meta};

// Functions
pub use crate::combinators::{chain, recover, run};
pub use crate::facade::{log, user_message, LogMode};

// Core types
pub use crate::types::{Annotated, Metadata, Outcome, Reason, Value};

// Traits
pub use crate::traits::{Describe, IntoOutcome, OutcomeExt};
