//! Laboratory test result records.
//!
//! A lab report arrives as a tree: the report names the ordering
//! organization and holds one or more groups (a panel such as a full
//! blood count), each group holds individual results and may nest
//! sub-groups to any depth, and each result carries its measured
//! value together with reference ranges and interpretation flags.

use chrono::NaiveDateTime;
use healthbook_xml::{
    opt_item, repeated, required, required_slice, ParseError, WriteError, XmlItem, XmlNode,
    XmlWriter,
};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;
use crate::common::measurement::GeneralMeasurement;
use crate::items::organization::Organization;

/// Completion status of a result or group.
///
/// Unrecognised wire values are preserved rather than rejected, so a
/// report written by a newer producer survives a round trip intact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LabStatus {
    /// Not yet available.
    Pending,
    /// Some but not all results are in.
    Partial,
    /// All results are in.
    Complete,
    /// Reissued with corrections.
    Corrected,
    /// The test was abandoned.
    Canceled,
    /// A status outside the known set, carrying the original text.
    Other(String),
}

impl LabStatus {
    /// The wire spelling of this status.
    pub fn to_wire(&self) -> &str {
        match self {
            LabStatus::Pending => "pending",
            LabStatus::Partial => "partial",
            LabStatus::Complete => "complete",
            LabStatus::Corrected => "corrected",
            LabStatus::Canceled => "canceled",
            LabStatus::Other(text) => text,
        }
    }

    /// Parses a wire spelling, falling back to [`Self::Other`] for
    /// anything unrecognised.
    pub fn from_wire(text: &str) -> Self {
        match text.to_ascii_lowercase().as_str() {
            "pending" => LabStatus::Pending,
            "partial" => LabStatus::Partial,
            "complete" => LabStatus::Complete,
            "corrected" => LabStatus::Corrected,
            "canceled" => LabStatus::Canceled,
            _ => {
                tracing::debug!(status = text, "unrecognised lab status, preserving text");
                LabStatus::Other(text.to_string())
            }
        }
    }
}

impl serde::Serialize for LabStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.to_wire())
    }
}

impl<'de> serde::Deserialize<'de> for LabStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(LabStatus::from_wire(&text))
    }
}

fn read_optional_status(node: &XmlNode) -> Option<LabStatus> {
    node.optional_text("status")
        .map(|text| LabStatus::from_wire(&text))
}

/// A reference range for a measured value.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TestResultRange {
    /// What kind of range this is, a normal range for example.
    /// Mandatory.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub range_type: Option<CodableValue>,

    /// The range as displayed, "4.0 - 11.0" for example. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<CodableValue>,

    /// Numeric lower bound, when one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    /// Numeric upper bound, when one applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

impl TestResultRange {
    /// Creates a range from its kind and display text.
    pub fn new(range_type: CodableValue, text: CodableValue) -> Self {
        Self {
            range_type: Some(range_type),
            text: Some(text),
            minimum: None,
            maximum: None,
        }
    }
}

impl XmlItem for TestResultRange {
    const ELEMENT: &'static str = "range";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            range_type: Some(node.require_item("type")?),
            text: Some(node.require_item("text")?),
            minimum: node.optional_f64("minimum")?,
            maximum: node.optional_f64("maximum")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let range_type = required(Self::ELEMENT, "type", &self.range_type)?;
        let text = required(Self::ELEMENT, "text", &self.text)?;
        writer.start(name)?;
        range_type.write_xml("type", writer)?;
        text.write_xml("text", writer)?;
        writer.opt_f64_element("minimum", self.minimum)?;
        writer.opt_f64_element("maximum", self.maximum)?;
        writer.end()
    }
}

/// The measured value of one result.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LabTestResultValue {
    /// The measurement itself. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement: Option<GeneralMeasurement>,

    /// Reference ranges the value was judged against, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub range: Vec<TestResultRange>,

    /// Interpretation flags, "high" or "out of range" for example.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flag: Vec<CodableValue>,
}

impl LabTestResultValue {
    /// Creates a value from its measurement.
    pub fn new(measurement: GeneralMeasurement) -> Self {
        Self {
            measurement: Some(measurement),
            ..Self::default()
        }
    }
}

impl XmlItem for LabTestResultValue {
    const ELEMENT: &'static str = "value";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            measurement: Some(node.require_item("measurement")?),
            range: node.repeated_items("range")?,
            flag: node.repeated_items("flag")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let measurement = required(Self::ELEMENT, "measurement", &self.measurement)?;
        writer.start(name)?;
        measurement.write_xml("measurement", writer)?;
        repeated(writer, "range", &self.range)?;
        repeated(writer, "flag", &self.flag)?;
        writer.end()
    }
}

/// One individual result within a group. Every field is optional; a
/// pending result may carry nothing but a name and status.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LabTestResultDetails {
    /// When the sample was taken or the result issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// The test's name as reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The substance tested, blood or urine for example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substance: Option<CodableValue>,

    /// How the sample was collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_method: Option<CodableValue>,

    /// The measured value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<LabTestResultValue>,

    /// Completion status of this result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LabStatus>,

    /// Free-text notes from the laboratory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl XmlItem for LabTestResultDetails {
    const ELEMENT: &'static str = "result";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: node.optional_datetime("when")?,
            name: node.optional_text("name"),
            substance: node.optional_item("substance")?,
            collection_method: node.optional_item("collection-method")?,
            value: node.optional_item("value")?,
            status: read_optional_status(node),
            note: node.optional_text("note"),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        writer.start(name)?;
        writer.opt_datetime_element("when", self.when.as_ref())?;
        writer.opt_text_element("name", self.name.as_deref())?;
        opt_item(writer, "substance", &self.substance)?;
        opt_item(writer, "collection-method", &self.collection_method)?;
        opt_item(writer, "value", &self.value)?;
        writer.opt_text_element("status", self.status.as_ref().map(|s| s.to_wire()))?;
        writer.opt_text_element("note", self.note.as_deref())?;
        writer.end()
    }
}

/// A named group of results, a panel, possibly with nested sub-groups.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LabTestResultGroup {
    /// The panel's name. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<CodableValue>,

    /// The laboratory that produced this group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laboratory: Option<Organization>,

    /// Completion status of the group as a whole.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LabStatus>,

    /// Nested panels, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_group: Vec<LabTestResultGroup>,

    /// The group's own results, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub result: Vec<LabTestResultDetails>,
}

impl LabTestResultGroup {
    /// Creates a group from its name.
    pub fn new(group_name: CodableValue) -> Self {
        Self {
            group_name: Some(group_name),
            ..Self::default()
        }
    }
}

impl XmlItem for LabTestResultGroup {
    const ELEMENT: &'static str = "lab-group";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            group_name: Some(node.require_item("group-name")?),
            laboratory: node.optional_item("laboratory")?,
            status: read_optional_status(node),
            sub_group: node.repeated_items("sub-group")?,
            result: node.repeated_items("result")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let group_name = required(Self::ELEMENT, "group-name", &self.group_name)?;
        writer.start(name)?;
        group_name.write_xml("group-name", writer)?;
        opt_item(writer, "laboratory", &self.laboratory)?;
        writer.opt_text_element("status", self.status.as_ref().map(|s| s.to_wire()))?;
        repeated(writer, "sub-group", &self.sub_group)?;
        repeated(writer, "result", &self.result)?;
        writer.end()
    }
}

/// A full laboratory report.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct LabTestResults {
    /// When the report was issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// The organization that ordered the tests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_by: Option<Organization>,

    /// The report's panels, in order. At least one is mandatory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lab_group: Vec<LabTestResultGroup>,
}

impl LabTestResults {
    /// Creates a report from its panels.
    pub fn new(lab_group: Vec<LabTestResultGroup>) -> Self {
        Self {
            when: None,
            ordered_by: None,
            lab_group,
        }
    }
}

impl XmlItem for LabTestResults {
    const ELEMENT: &'static str = "lab-test-results";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: node.optional_datetime("when")?,
            ordered_by: node.optional_item("ordered-by")?,
            lab_group: node.repeated_items("lab-group")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        required_slice(Self::ELEMENT, "lab-group", &self.lab_group)?;
        writer.start(name)?;
        writer.opt_datetime_element("when", self.when.as_ref())?;
        opt_item(writer, "ordered-by", &self.ordered_by)?;
        repeated(writer, "lab-group", &self.lab_group)?;
        writer.end()
    }
}
