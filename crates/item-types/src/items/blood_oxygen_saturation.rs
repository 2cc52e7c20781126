//! Blood oxygen saturation (SpO2) records.

use chrono::NaiveDateTime;
use healthbook_types::UnitFraction;
use healthbook_xml::{opt_item, required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;
use crate::display::{display_strings, DisplayStrings};

/// One oxygen saturation reading, stored as a unit fraction.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BloodOxygenSaturation {
    /// When the reading was taken. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// The saturation, 0.0 to 1.0. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<UnitFraction>,

    /// How the reading was taken, pulse oximetry for example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_method: Option<CodableValue>,

    /// Circumstances qualifying the reading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_flags: Option<CodableValue>,
}

impl BloodOxygenSaturation {
    /// Creates a reading from its mandatory fields.
    pub fn new(when: NaiveDateTime, value: UnitFraction) -> Self {
        Self {
            when: Some(when),
            value: Some(value),
            ..Self::default()
        }
    }

    /// Renders the reading as a percentage, "97%" for a value of
    /// 0.97. Empty while the value is unset.
    pub fn summary(&self, strings: &DisplayStrings) -> String {
        match self.value {
            Some(value) => strings.format_percent(value.value()),
            None => String::new(),
        }
    }
}

impl XmlItem for BloodOxygenSaturation {
    const ELEMENT: &'static str = "blood-oxygen-saturation";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        let raw = node.require_f64("value")?;
        let value = UnitFraction::new(raw).map_err(|source| node.constraint("value", source))?;
        Ok(Self {
            when: Some(node.require_datetime("when")?),
            value: Some(value),
            measurement_method: node.optional_item("measurement-method")?,
            measurement_flags: node.optional_item("measurement-flags")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        let value = required(Self::ELEMENT, "value", &self.value)?;
        writer.start(name)?;
        writer.datetime_element("when", when)?;
        writer.f64_element("value", value.value())?;
        opt_item(writer, "measurement-method", &self.measurement_method)?;
        opt_item(writer, "measurement-flags", &self.measurement_flags)?;
        writer.end()
    }
}

impl std::fmt::Display for BloodOxygenSaturation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary(&display_strings()))
    }
}
