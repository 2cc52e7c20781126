//! Validated value types shared across the HealthBook item-type catalog.
//!
//! Field constraints (non-blank text, bounded fractions, positive
//! measurements) live here as newtypes whose constructors validate, so an
//! invalid value can never be observed after construction. The [`check`]
//! module holds the underlying stateless checks for callers that validate
//! plain values rather than constructing a newtype.
//!
//! This crate has no XML or clinical knowledge; it is the bottom of the
//! dependency stack.

pub mod check;
pub mod numeric;
pub mod text;

pub use numeric::{PositiveMeasurement, UnitFraction};
pub use text::NonBlankText;

/// Errors raised when a value violates a field constraint.
///
/// Each variant names the offending field so callers can surface the
/// failure without re-deriving context.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The value was empty or contained only whitespace.
    #[error("{0} must contain at least one non-whitespace character")]
    Blank(&'static str),

    /// A numeric value fell outside its permitted range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A value that must be strictly positive was zero or negative.
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    /// An integer exceeded its permitted maximum.
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: u32,
        max: u32,
    },

    /// A collection that requires at least one entry was empty.
    #[error("{0} must contain at least one entry")]
    EmptyCollection(&'static str),
}

/// Type alias for Results that can fail with a [`ValidationError`].
pub type ValidationResult<T> = Result<T, ValidationError>;
