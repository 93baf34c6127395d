//! Builder API for ergonomic calculator construction.
//!
//! This module provides a fluent builder and the `expression!` macro for
//! creating calculators and expressions with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::CalculatorBuilder;
