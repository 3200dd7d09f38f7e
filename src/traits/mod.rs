//! Core traits connecting user types to the outcome algebra.
//!
//! - [`Describe`]: declared-field description used by the shrinker
//! - [`IntoAnnotation`]: conversion of labels and metadata into frame annotations
//! - [`IntoOutcome`]: coercion of callback returns into outcomes
//! - [`OutcomeExt`]: method-position annotation for `Outcome` and `Result`
//!
//! # Examples
//!
//! ```
//! use outcome_rail::traits::{IntoOutcome, OutcomeExt};
//! use outcome_rail::Outcome;
//!
//! let parsed: Outcome<u16, String> = "8080".parse::<u16>().map_err(|e| e.to_string()).into_outcome();
//! assert_eq!(parsed.annotate("parsing port"), Outcome::SuccessWith(8080));
//! ```

pub mod describe;
pub mod into_annotation;
pub mod into_outcome;
pub mod outcome_ext;

pub use describe::Describe;
pub use into_annotation::IntoAnnotation;
pub use into_outcome::IntoOutcome;
pub use outcome_ext::OutcomeExt;
