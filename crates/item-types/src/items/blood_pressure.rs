//! Blood pressure records.

use chrono::NaiveDateTime;
use healthbook_xml::{required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::display::{display_strings, DisplayStrings};

/// One blood pressure reading in millimetres of mercury.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BloodPressure {
    /// When the reading was taken. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// Systolic pressure. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub systolic: Option<u32>,

    /// Diastolic pressure. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diastolic: Option<u32>,

    /// Pulse at the time of the reading, beats per minute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulse: Option<u32>,

    /// Whether an irregular heartbeat was noticed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub irregular_heartbeat: Option<bool>,
}

impl BloodPressure {
    /// Creates a reading from its mandatory fields.
    pub fn new(when: NaiveDateTime, systolic: u32, diastolic: u32) -> Self {
        Self {
            when: Some(when),
            systolic: Some(systolic),
            diastolic: Some(diastolic),
            ..Self::default()
        }
    }

    /// Renders the reading in the usual "120/80" form. Empty while
    /// either pressure is unset.
    pub fn summary(&self, strings: &DisplayStrings) -> String {
        match (self.systolic, self.diastolic) {
            (Some(systolic), Some(diastolic)) => {
                strings.format_blood_pressure(systolic, diastolic)
            }
            _ => String::new(),
        }
    }
}

impl XmlItem for BloodPressure {
    const ELEMENT: &'static str = "blood-pressure";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: Some(node.require_datetime("when")?),
            systolic: Some(node.require_u32("systolic")?),
            diastolic: Some(node.require_u32("diastolic")?),
            pulse: node.optional_u32("pulse")?,
            irregular_heartbeat: node.optional_bool("irregular-heartbeat")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        let systolic = required(Self::ELEMENT, "systolic", &self.systolic)?;
        let diastolic = required(Self::ELEMENT, "diastolic", &self.diastolic)?;
        writer.start(name)?;
        writer.datetime_element("when", when)?;
        writer.u32_element("systolic", *systolic)?;
        writer.u32_element("diastolic", *diastolic)?;
        writer.opt_u32_element("pulse", self.pulse)?;
        writer.opt_bool_element("irregular-heartbeat", self.irregular_heartbeat)?;
        writer.end()
    }
}

impl std::fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary(&display_strings()))
    }
}
