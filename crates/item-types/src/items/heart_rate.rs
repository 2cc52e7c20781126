//! Heart rate records.

use chrono::NaiveDateTime;
use healthbook_xml::{opt_item, required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;
use crate::display::{display_strings, DisplayStrings};

/// One heart rate reading in beats per minute.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HeartRate {
    /// When the reading was taken. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// Beats per minute. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,

    /// How the reading was taken, a chest strap for example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_method: Option<CodableValue>,

    /// Circumstances around the reading, resting or after exercise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_conditions: Option<CodableValue>,
}

impl HeartRate {
    /// Creates a reading from its mandatory fields.
    pub fn new(when: NaiveDateTime, value: u32) -> Self {
        Self {
            when: Some(when),
            value: Some(value),
            ..Self::default()
        }
    }

    /// Renders the reading as "62 bpm". Empty while the value is
    /// unset.
    pub fn summary(&self, strings: &DisplayStrings) -> String {
        match self.value {
            Some(value) => strings.format_beats_per_minute(value),
            None => String::new(),
        }
    }
}

impl XmlItem for HeartRate {
    const ELEMENT: &'static str = "heart-rate";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: Some(node.require_datetime("when")?),
            value: Some(node.require_u32("value")?),
            measurement_method: node.optional_item("measurement-method")?,
            measurement_conditions: node.optional_item("measurement-conditions")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        let value = required(Self::ELEMENT, "value", &self.value)?;
        writer.start(name)?;
        writer.datetime_element("when", when)?;
        writer.u32_element("value", *value)?;
        opt_item(writer, "measurement-method", &self.measurement_method)?;
        opt_item(writer, "measurement-conditions", &self.measurement_conditions)?;
        writer.end()
    }
}

impl std::fmt::Display for HeartRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary(&display_strings()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_resting_reading() {
        let when = "2024-02-03T07:00:00".parse().expect("valid datetime");
        let mut reading = HeartRate::new(when, 58);
        reading.measurement_conditions = Some(CodableValue::new("Resting").expect("non-blank"));

        let xml = reading.to_xml().expect("complete reading");
        assert!(xml.contains("<value>58</value>"));
        assert!(xml.contains("<measurement-conditions><text>Resting</text>"));
        assert_eq!(HeartRate::from_xml_str(&xml).expect("parses back"), reading);
    }

    #[test]
    fn renders_minimal_reading_without_optional_elements() {
        let when = "2024-02-03T07:00:00".parse().expect("valid datetime");
        let xml = HeartRate::new(when, 62).to_xml().expect("complete reading");

        assert_eq!(
            xml,
            "<heart-rate><when>2024-02-03T07:00:00</when><value>62</value></heart-rate>"
        );
    }

    #[test]
    fn non_numeric_value_is_a_parse_fault() {
        let xml = "<heart-rate><when>2024-02-03T07:00:00</when><value>fast</value></heart-rate>";
        match HeartRate::from_xml_str(xml) {
            Err(ParseError::Malformed { element, text, .. }) => {
                assert_eq!(element, "value");
                assert_eq!(text, "fast");
            }
            other => panic!("expected a malformed fault, got {other:?}"),
        }
    }

    #[test]
    fn summarises_in_beats_per_minute() {
        let when = "2024-02-03T07:00:00".parse().expect("valid datetime");
        let reading = HeartRate::new(when, 62);
        assert_eq!(reading.summary(&DisplayStrings::default()), "62 bpm");
    }
}
