//! Emotional state records.

use chrono::NaiveDateTime;
use healthbook_xml::{required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

/// A five-point relative rating, from very low to very high.
///
/// Travels as the integers 1 through 5; anything else on the wire is
/// rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelativeRating {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RelativeRating {
    /// The wire value of this rating, 1 through 5.
    pub fn to_wire(self) -> u32 {
        match self {
            RelativeRating::VeryLow => 1,
            RelativeRating::Low => 2,
            RelativeRating::Moderate => 3,
            RelativeRating::High => 4,
            RelativeRating::VeryHigh => 5,
        }
    }

    /// Parses a wire value; `None` for anything outside 1-5.
    pub fn from_wire(value: u32) -> Option<Self> {
        match value {
            1 => Some(RelativeRating::VeryLow),
            2 => Some(RelativeRating::Low),
            3 => Some(RelativeRating::Moderate),
            4 => Some(RelativeRating::High),
            5 => Some(RelativeRating::VeryHigh),
            _ => None,
        }
    }
}

impl serde::Serialize for RelativeRating {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.to_wire())
    }
}

impl<'de> serde::Deserialize<'de> for RelativeRating {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u32::deserialize(deserializer)?;
        RelativeRating::from_wire(value).ok_or_else(|| {
            serde::de::Error::custom(format!("rating out of range 1-5: {value}"))
        })
    }
}

/// A self-reported emotional state.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct EmotionalState {
    /// When the state was recorded. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// Mood, very low to very high.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<RelativeRating>,

    /// Stress, very low to very high.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress: Option<RelativeRating>,

    /// Overall wellbeing, very low to very high.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wellbeing: Option<RelativeRating>,
}

impl EmotionalState {
    /// Creates a state recorded at the given moment.
    pub fn new(when: NaiveDateTime) -> Self {
        Self {
            when: Some(when),
            ..Self::default()
        }
    }
}

fn read_optional_rating(
    node: &XmlNode,
    name: &'static str,
) -> Result<Option<RelativeRating>, ParseError> {
    match node.optional_u32(name)? {
        Some(raw) => match RelativeRating::from_wire(raw) {
            Some(rating) => Ok(Some(rating)),
            None => Err(node.malformed(name, "integer between 1 and 5", &raw.to_string())),
        },
        None => Ok(None),
    }
}

impl XmlItem for EmotionalState {
    const ELEMENT: &'static str = "emotion";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: Some(node.require_datetime("when")?),
            mood: read_optional_rating(node, "mood")?,
            stress: read_optional_rating(node, "stress")?,
            wellbeing: read_optional_rating(node, "wellbeing")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        writer.start(name)?;
        writer.datetime_element("when", when)?;
        writer.opt_u32_element("mood", self.mood.map(RelativeRating::to_wire))?;
        writer.opt_u32_element("stress", self.stress.map(RelativeRating::to_wire))?;
        writer.opt_u32_element("wellbeing", self.wellbeing.map(RelativeRating::to_wire))?;
        writer.end()
    }
}
