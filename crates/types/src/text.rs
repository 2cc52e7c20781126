//! Validated text types.

use crate::{check, ValidationError};

/// A string type that guarantees non-blank content.
///
/// This type wraps a `String` and ensures it contains at least one
/// non-whitespace character. The input is trimmed of leading and trailing
/// whitespace during construction, because wire text frequently arrives
/// pretty-printed with surrounding indentation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonBlankText(String);

impl NonBlankText {
    /// Creates a new `NonBlankText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the
    /// trimmed result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Blank`] if the input is empty or
    /// contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = input.as_ref().trim();
        check::not_blank("text", trimmed)?;
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonBlankText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonBlankText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonBlankText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonBlankText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonBlankText::new(&s).map_err(serde::de::Error::custom)
    }
}
