//! Height records.

use chrono::NaiveDateTime;
use healthbook_types::PositiveMeasurement;
use healthbook_xml::{required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::measurement::read_required_positive;
use crate::display::{display_strings, DisplayStrings};

/// One height measurement in metres.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Height {
    /// When the measurement was taken. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// The height in metres. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<PositiveMeasurement>,
}

impl Height {
    /// Creates a measurement from its mandatory fields.
    pub fn new(when: NaiveDateTime, value: PositiveMeasurement) -> Self {
        Self {
            when: Some(when),
            value: Some(value),
        }
    }

    /// Renders the measurement as "1.8 m". Empty while the value is
    /// unset.
    pub fn summary(&self, strings: &DisplayStrings) -> String {
        match self.value {
            Some(value) => strings.format_metres(value.value()),
            None => String::new(),
        }
    }
}

impl XmlItem for Height {
    const ELEMENT: &'static str = "height";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: Some(node.require_datetime("when")?),
            value: Some(read_required_positive(node, "value")?),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        let value = required(Self::ELEMENT, "value", &self.value)?;
        writer.start(name)?;
        writer.datetime_element("when", when)?;
        writer.f64_element("value", value.value())?;
        writer.end()
    }
}

impl std::fmt::Display for Height {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary(&display_strings()))
    }
}
