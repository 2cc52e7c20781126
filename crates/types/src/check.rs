//! Stateless field-constraint checks.
//!
//! Every record type and serializer validates through these functions
//! rather than reimplementing presence/range logic inline. All checks are
//! pure; the `field` argument is the field name reported in the resulting
//! [`ValidationError`].

use crate::{ValidationError, ValidationResult};

/// Validates that `value` contains at least one non-whitespace character.
///
/// # Errors
///
/// Returns [`ValidationError::Blank`] naming `field` if the string is
/// empty or whitespace-only.
pub fn not_blank(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank(field));
    }
    Ok(())
}

/// Validates that `value` lies within `[min, max]` inclusive.
///
/// NaN never satisfies the comparison and is rejected.
///
/// # Errors
///
/// Returns [`ValidationError::OutOfRange`] naming `field` if the value is
/// outside the range.
pub fn in_range_f64(field: &'static str, value: f64, min: f64, max: f64) -> ValidationResult<()> {
    if !(value >= min && value <= max) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Validates that `value` is strictly greater than zero.
///
/// NaN never satisfies the comparison and is rejected.
///
/// # Errors
///
/// Returns [`ValidationError::NotPositive`] naming `field` if the value is
/// zero, negative, or NaN.
pub fn positive_f64(field: &'static str, value: f64) -> ValidationResult<()> {
    if !(value > 0.0) {
        return Err(ValidationError::NotPositive { field, value });
    }
    Ok(())
}

/// Validates that `value` does not exceed `max`.
///
/// # Errors
///
/// Returns [`ValidationError::TooLarge`] naming `field` if the value is
/// greater than `max`.
pub fn at_most_u32(field: &'static str, value: u32, max: u32) -> ValidationResult<()> {
    if value > max {
        return Err(ValidationError::TooLarge { field, value, max });
    }
    Ok(())
}

/// Validates that a collection holds at least one entry.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyCollection`] naming `field` if the
/// slice is empty.
pub fn non_empty_slice<T>(field: &'static str, values: &[T]) -> ValidationResult<()> {
    if values.is_empty() {
        return Err(ValidationError::EmptyCollection(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_blank_accepts_text_with_content() {
        assert!(not_blank("name", "systolic").is_ok());
        assert!(not_blank("name", "  padded  ").is_ok());
    }

    #[test]
    fn test_not_blank_rejects_empty_and_whitespace() {
        assert!(matches!(
            not_blank("name", ""),
            Err(ValidationError::Blank("name"))
        ));
        assert!(matches!(
            not_blank("name", "   \t\n"),
            Err(ValidationError::Blank("name"))
        ));
    }

    #[test]
    fn test_in_range_f64_accepts_boundaries() {
        assert!(in_range_f64("fraction", 0.0, 0.0, 1.0).is_ok());
        assert!(in_range_f64("fraction", 1.0, 0.0, 1.0).is_ok());
        assert!(in_range_f64("fraction", 0.5, 0.0, 1.0).is_ok());
    }

    #[test]
    fn test_in_range_f64_rejects_outside_and_nan() {
        assert!(in_range_f64("fraction", -0.01, 0.0, 1.0).is_err());
        assert!(in_range_f64("fraction", 1.01, 0.0, 1.0).is_err());
        assert!(in_range_f64("fraction", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_positive_f64_accepts_positive_values() {
        assert!(positive_f64("value", 0.001).is_ok());
        assert!(positive_f64("value", 180.5).is_ok());
    }

    #[test]
    fn test_positive_f64_rejects_zero_negative_and_nan() {
        assert!(positive_f64("value", 0.0).is_err());
        assert!(positive_f64("value", -1.0).is_err());
        assert!(positive_f64("value", f64::NAN).is_err());
    }

    #[test]
    fn test_at_most_u32_accepts_boundary() {
        assert!(at_most_u32("h", 23, 23).is_ok());
        assert!(at_most_u32("h", 0, 23).is_ok());
    }

    #[test]
    fn test_at_most_u32_rejects_above_maximum() {
        let err = at_most_u32("h", 24, 23);
        assert!(matches!(
            err,
            Err(ValidationError::TooLarge {
                field: "h",
                value: 24,
                max: 23
            })
        ));
    }

    #[test]
    fn test_non_empty_slice_accepts_populated() {
        assert!(non_empty_slice("dow", &[1, 2]).is_ok());
    }

    #[test]
    fn test_non_empty_slice_rejects_empty() {
        let empty: &[u32] = &[];
        assert!(matches!(
            non_empty_slice("dow", empty),
            Err(ValidationError::EmptyCollection("dow"))
        ));
    }
}
