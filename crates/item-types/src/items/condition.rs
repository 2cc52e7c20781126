//! Medical condition records.

use chrono::NaiveDate;
use healthbook_xml::{required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;

/// Clinical status of a condition.
///
/// Unrecognised wire values are preserved rather than rejected, so a
/// record written by a newer producer survives a round trip intact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConditionStatus {
    /// The condition is current.
    Active,
    /// Symptoms have abated but the condition is not considered gone.
    InRemission,
    /// The condition has been resolved.
    Resolved,
    /// The condition is no longer current, reason unspecified.
    Inactive,
    /// A status outside the known set, carrying the original text.
    Other(String),
}

impl ConditionStatus {
    /// The wire spelling of this status.
    pub fn to_wire(&self) -> &str {
        match self {
            ConditionStatus::Active => "active",
            ConditionStatus::InRemission => "in-remission",
            ConditionStatus::Resolved => "resolved",
            ConditionStatus::Inactive => "inactive",
            ConditionStatus::Other(text) => text,
        }
    }

    /// Parses a wire spelling, falling back to [`Self::Other`] for
    /// anything unrecognised.
    pub fn from_wire(text: &str) -> Self {
        match text.to_ascii_lowercase().as_str() {
            "active" => ConditionStatus::Active,
            "in-remission" => ConditionStatus::InRemission,
            "resolved" => ConditionStatus::Resolved,
            "inactive" => ConditionStatus::Inactive,
            _ => {
                tracing::debug!(status = text, "unrecognised condition status, preserving text");
                ConditionStatus::Other(text.to_string())
            }
        }
    }
}

impl serde::Serialize for ConditionStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_wire())
    }
}

impl<'de> serde::Deserialize<'de> for ConditionStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(ConditionStatus::from_wire(&text))
    }
}

/// A diagnosed or self-reported medical condition.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Condition {
    /// What the condition is. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CodableValue>,

    /// Its clinical status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConditionStatus>,

    /// When it began.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset_date: Option<NaiveDate>,

    /// When it ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_date: Option<NaiveDate>,

    /// Why it ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

impl Condition {
    /// Creates a condition from its name.
    pub fn new(name: CodableValue) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }
}

impl XmlItem for Condition {
    const ELEMENT: &'static str = "condition";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            name: Some(node.require_item("name")?),
            status: node
                .optional_text("status")
                .map(|text| ConditionStatus::from_wire(&text)),
            onset_date: node.optional_date("onset-date")?,
            stop_date: node.optional_date("stop-date")?,
            stop_reason: node.optional_text("stop-reason"),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let condition = required(Self::ELEMENT, "name", &self.name)?;
        writer.start(name)?;
        condition.write_xml("name", writer)?;
        writer.opt_text_element("status", self.status.as_ref().map(|s| s.to_wire()))?;
        writer.opt_date_element("onset-date", self.onset_date.as_ref())?;
        writer.opt_date_element("stop-date", self.stop_date.as_ref())?;
        writer.opt_text_element("stop-reason", self.stop_reason.as_deref())?;
        writer.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolved_condition_with_dates() {
        let xml = "<condition>\
                   <name><text>Asthma</text></name>\
                   <status>resolved</status>\
                   <onset-date>2001-04-12</onset-date>\
                   <stop-date>2019-09-30</stop-date>\
                   <stop-reason>Outgrown in adulthood</stop-reason>\
                   </condition>";
        let condition = Condition::from_xml_str(xml).expect("valid condition");

        assert_eq!(condition.status, Some(ConditionStatus::Resolved));
        assert_eq!(
            condition.onset_date.map(|d| d.to_string()),
            Some("2001-04-12".to_string())
        );
        assert_eq!(condition.stop_reason.as_deref(), Some("Outgrown in adulthood"));
    }

    #[test]
    fn preserves_unknown_status_through_a_round_trip() {
        let xml = "<condition><name><text>Migraine</text></name>\
                   <status>recurrent</status></condition>";
        let condition = Condition::from_xml_str(xml).expect("valid condition");

        assert_eq!(
            condition.status,
            Some(ConditionStatus::Other("recurrent".to_string()))
        );

        let rendered = condition.to_xml().expect("complete condition");
        assert!(rendered.contains("<status>recurrent</status>"));
    }

    #[test]
    fn status_wire_spellings_round_trip() {
        for status in [
            ConditionStatus::Active,
            ConditionStatus::InRemission,
            ConditionStatus::Resolved,
            ConditionStatus::Inactive,
        ] {
            assert_eq!(ConditionStatus::from_wire(status.to_wire()), status);
        }
        assert_eq!(ConditionStatus::from_wire("ACTIVE"), ConditionStatus::Active);
    }

    #[test]
    fn renders_minimal_condition_without_optional_elements() {
        let condition = Condition::new(CodableValue::new("Hay fever").expect("non-blank name"));
        let xml = condition.to_xml().expect("complete condition");

        assert_eq!(
            xml,
            "<condition><name><text>Hay fever</text></name></condition>"
        );
        assert_eq!(Condition::from_xml_str(&xml).expect("parses back"), condition);
    }

    #[test]
    fn malformed_onset_date_is_a_parse_fault() {
        let xml = "<condition><name><text>Asthma</text></name>\
                   <onset-date>sometime in 2001</onset-date></condition>";
        match Condition::from_xml_str(xml) {
            Err(ParseError::Malformed { element, expected, .. }) => {
                assert_eq!(element, "onset-date");
                assert_eq!(expected, "date");
            }
            other => panic!("expected a malformed fault, got {other:?}"),
        }
    }
}
