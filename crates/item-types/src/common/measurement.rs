//! Measurement values with and without structured units.

use healthbook_types::{NonBlankText, PositiveMeasurement, ValidationError};
use healthbook_xml::{repeated, required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;

/// A numeric value paired with coded units.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StructuredMeasurement {
    /// The numeric value. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// The units the value is expressed in. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<CodableValue>,
}

impl StructuredMeasurement {
    /// Creates a measurement from its value and units.
    pub fn new(value: f64, units: CodableValue) -> Self {
        Self {
            value: Some(value),
            units: Some(units),
        }
    }
}

impl XmlItem for StructuredMeasurement {
    const ELEMENT: &'static str = "structured";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            value: Some(node.require_f64("value")?),
            units: Some(node.require_item("units")?),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let value = required(Self::ELEMENT, "value", &self.value)?;
        let units = required(Self::ELEMENT, "units", &self.units)?;
        writer.start(name)?;
        writer.f64_element("value", *value)?;
        units.write_xml("units", writer)?;
        writer.end()
    }
}

/// A measurement as displayed, with optional structured backing
/// values.
///
/// The display text stands alone ("6 km in 40 minutes"); each
/// structured entry restates part of it in machine-readable form.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneralMeasurement {
    /// The measurement as the user saw it. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<NonBlankText>,

    /// Structured restatements, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub structured: Vec<StructuredMeasurement>,
}

impl GeneralMeasurement {
    /// Creates a measurement from its display text alone.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the text is blank.
    pub fn new(display: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self {
            display: Some(NonBlankText::new(display)?),
            structured: Vec::new(),
        })
    }
}

impl XmlItem for GeneralMeasurement {
    const ELEMENT: &'static str = "measurement";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            display: Some(node.require_nonblank("display")?),
            structured: node.repeated_items("structured")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let display = required(Self::ELEMENT, "display", &self.display)?;
        writer.start(name)?;
        writer.text_element("display", display.as_str())?;
        repeated(writer, "structured", &self.structured)?;
        writer.end()
    }
}

impl std::fmt::Display for GeneralMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.display {
            Some(display) => write!(f, "{display}"),
            None => Ok(()),
        }
    }
}

/// Reads a required child element as a strictly-positive measurement.
///
/// # Errors
///
/// Returns a parse fault when the child is missing, not numeric, or
/// not positive.
pub fn read_required_positive(
    node: &XmlNode,
    name: &'static str,
) -> Result<PositiveMeasurement, ParseError> {
    let raw = node.require_f64(name)?;
    PositiveMeasurement::new(raw).map_err(|source| node.constraint(name, source))
}

/// Reads an optional child element as a strictly-positive measurement.
///
/// Absence is `Ok(None)`; a present but non-positive value is a fault.
pub fn read_optional_positive(
    node: &XmlNode,
    name: &'static str,
) -> Result<Option<PositiveMeasurement>, ParseError> {
    match node.optional_f64(name)? {
        Some(raw) => PositiveMeasurement::new(raw)
            .map(Some)
            .map_err(|source| node.constraint(name, source)),
        None => Ok(None),
    }
}
