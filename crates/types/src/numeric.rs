//! Range-validated numeric types.
//!
//! Wire scalars with range constraints are carried as newtypes so the
//! constraint is enforced once, at construction, rather than at every use
//! site. Both types serialize as plain numbers; deserialisation
//! revalidates.

use crate::{check, ValidationError};

/// A fraction constrained to `[0.0, 1.0]` inclusive.
///
/// Used for proportions such as an oxygen-saturation reading (0.97 =
/// 97%). Both boundaries are representable values.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct UnitFraction(f64);

impl UnitFraction {
    /// Creates a new `UnitFraction`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfRange`] if `value` is outside
    /// `[0.0, 1.0]` or is NaN.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        check::in_range_f64("fraction", value, 0.0, 1.0)?;
        Ok(Self(value))
    }

    /// Returns the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for UnitFraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for UnitFraction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for UnitFraction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        UnitFraction::new(value).map_err(serde::de::Error::custom)
    }
}

/// A measurement value constrained to be strictly greater than zero.
///
/// Used for physical quantities where zero or negative readings are
/// meaningless (height in metres, weight in kilograms, a VO2 max).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PositiveMeasurement(f64);

impl PositiveMeasurement {
    /// Creates a new `PositiveMeasurement`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotPositive`] if `value` is zero,
    /// negative, or NaN.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        check::positive_f64("measurement", value)?;
        Ok(Self(value))
    }

    /// Returns the inner value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for PositiveMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for PositiveMeasurement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for PositiveMeasurement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        PositiveMeasurement::new(value).map_err(serde::de::Error::custom)
    }
}
