//! Exercise session records.

use chrono::NaiveDateTime;
use healthbook_types::{NonBlankText, PositiveMeasurement};
use healthbook_xml::{repeated, required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;
use crate::common::measurement::{read_optional_positive, StructuredMeasurement};

/// One named measurement within a session, a distance or a calorie
/// count for example.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExerciseDetail {
    /// What was measured. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NonBlankText>,

    /// The measurement itself. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<StructuredMeasurement>,
}

impl ExerciseDetail {
    /// Creates a detail from its name and measurement.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is blank.
    pub fn new(
        name: impl AsRef<str>,
        value: StructuredMeasurement,
    ) -> Result<Self, healthbook_types::ValidationError> {
        Ok(Self {
            name: Some(NonBlankText::new(name)?),
            value: Some(value),
        })
    }
}

impl XmlItem for ExerciseDetail {
    const ELEMENT: &'static str = "detail";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            name: Some(node.require_nonblank("name")?),
            value: Some(node.require_item("value")?),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let detail_name = required(Self::ELEMENT, "name", &self.name)?;
        let value = required(Self::ELEMENT, "value", &self.value)?;
        writer.start(name)?;
        writer.text_element("name", detail_name.as_str())?;
        value.write_xml("value", writer)?;
        writer.end()
    }
}

/// One exercise session.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Exercise {
    /// When the session started. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// The kind of activity, running or swimming for example.
    /// Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<CodableValue>,

    /// A free-text title for the session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// How long the session lasted, in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<PositiveMeasurement>,

    /// Named measurements taken during the session, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detail: Vec<ExerciseDetail>,
}

impl Exercise {
    /// Creates a session from its mandatory fields.
    pub fn new(when: NaiveDateTime, activity: CodableValue) -> Self {
        Self {
            when: Some(when),
            activity: Some(activity),
            ..Self::default()
        }
    }
}

impl XmlItem for Exercise {
    const ELEMENT: &'static str = "exercise";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: Some(node.require_datetime("when")?),
            activity: Some(node.require_item("activity")?),
            title: node.optional_text("title"),
            duration: read_optional_positive(node, "duration")?,
            detail: node.repeated_items("detail")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        let activity = required(Self::ELEMENT, "activity", &self.activity)?;
        writer.start(name)?;
        writer.datetime_element("when", when)?;
        activity.write_xml("activity", writer)?;
        writer.opt_text_element("title", self.title.as_deref())?;
        writer.opt_f64_element("duration", self.duration.map(|m| m.value()))?;
        repeated(writer, "detail", &self.detail)?;
        writer.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_session_with_details() {
        let when = "2024-05-11T18:15:00".parse().expect("valid datetime");
        let mut session =
            Exercise::new(when, CodableValue::new("Running").expect("non-blank activity"));
        session.title = Some("Evening tempo run".to_string());
        session.duration = Some(PositiveMeasurement::new(40.0).expect("positive duration"));
        session.detail = vec![ExerciseDetail::new(
            "distance",
            StructuredMeasurement::new(6.0, CodableValue::new("kilometres").expect("non-blank")),
        )
        .expect("non-blank detail name")];

        let xml = session.to_xml().expect("complete session");
        assert!(xml.contains("<duration>40</duration>"));
        assert!(xml.contains("<detail><name>distance</name>"));
        assert_eq!(Exercise::from_xml_str(&xml).expect("parses back"), session);
    }

    #[test]
    fn renders_minimal_session_without_optional_elements() {
        let when = "2024-05-11T18:15:00".parse().expect("valid datetime");
        let session = Exercise::new(when, CodableValue::new("Swimming").expect("non-blank"));
        let xml = session.to_xml().expect("complete session");

        assert!(!xml.contains("title"));
        assert!(!xml.contains("duration"));
        assert!(!xml.contains("detail"));
    }

    #[test]
    fn zero_duration_is_a_parse_fault() {
        let xml = "<exercise><when>2024-05-11T18:15:00</when>\
                   <activity><text>Running</text></activity>\
                   <duration>0</duration></exercise>";
        match Exercise::from_xml_str(xml) {
            Err(ParseError::Constraint { element, .. }) => assert_eq!(element, "duration"),
            other => panic!("expected a constraint fault, got {other:?}"),
        }
    }

    #[test]
    fn detail_without_measurement_faults_at_write() {
        let half = ExerciseDetail {
            name: Some(NonBlankText::new("distance").expect("non-blank")),
            value: None,
        };
        let mut writer = healthbook_xml::XmlWriter::new();
        match half.write_xml("detail", &mut writer) {
            Err(WriteError::UnsetField { record, field }) => {
                assert_eq!(record, "detail");
                assert_eq!(field, "value");
            }
            other => panic!("expected an unset-field fault, got {other:?}"),
        }
    }
}
