//! Health goal records.

use chrono::NaiveDateTime;
use healthbook_xml::{required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;

/// A goal the person is working towards, losing weight or walking
/// daily for example.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HealthGoal {
    /// What the goal is. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CodableValue>,

    /// Free-text detail about the goal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When work on the goal starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDateTime>,

    /// When the goal should be reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,
}

impl HealthGoal {
    /// Creates a goal from its name.
    pub fn new(name: CodableValue) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }
}

impl XmlItem for HealthGoal {
    const ELEMENT: &'static str = "health-goal";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            name: Some(node.require_item("name")?),
            description: node.optional_text("description"),
            start_date: node.optional_datetime("start-date")?,
            end_date: node.optional_datetime("end-date")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let goal = required(Self::ELEMENT, "name", &self.name)?;
        writer.start(name)?;
        goal.write_xml("name", writer)?;
        writer.opt_text_element("description", self.description.as_deref())?;
        writer.opt_datetime_element("start-date", self.start_date.as_ref())?;
        writer.opt_datetime_element("end-date", self.end_date.as_ref())?;
        writer.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_goal_with_date_window() {
        let mut goal = HealthGoal::new(CodableValue::new("Walk daily").expect("non-blank name"));
        goal.description = Some("At least thirty minutes".to_string());
        goal.start_date = Some("2024-01-01T00:00:00".parse().expect("valid datetime"));
        goal.end_date = Some("2024-06-30T23:59:59".parse().expect("valid datetime"));

        let xml = goal.to_xml().expect("complete goal");
        assert!(xml.contains("<start-date>2024-01-01T00:00:00</start-date>"));
        assert!(xml.contains("<end-date>2024-06-30T23:59:59</end-date>"));
        assert_eq!(HealthGoal::from_xml_str(&xml).expect("parses back"), goal);
    }

    #[test]
    fn renders_minimal_goal_without_optional_elements() {
        let goal = HealthGoal::new(CodableValue::new("Stop smoking").expect("non-blank name"));
        let xml = goal.to_xml().expect("complete goal");

        assert_eq!(
            xml,
            "<health-goal><name><text>Stop smoking</text></name></health-goal>"
        );
    }

    #[test]
    fn unset_name_faults_at_write() {
        match HealthGoal::default().to_xml() {
            Err(WriteError::UnsetField { record, field }) => {
                assert_eq!(record, "health-goal");
                assert_eq!(field, "name");
            }
            other => panic!("expected an unset-field fault, got {other:?}"),
        }
    }
}
