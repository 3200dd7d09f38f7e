pub mod callsite;
pub mod facade;
pub mod macros;
pub mod types;
