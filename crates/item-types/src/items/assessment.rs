//! Health assessment records.

use chrono::NaiveDateTime;
use healthbook_types::{NonBlankText, ValidationError};
use healthbook_xml::{
    opt_item, repeated, required, required_slice, ParseError, WriteError, XmlItem, XmlNode,
    XmlWriter,
};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;

/// One question-and-answer pair within an assessment.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AssessmentField {
    /// What was assessed. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CodableValue>,

    /// The outcome. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<CodableValue>,

    /// The group the field belongs to within the assessment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<CodableValue>,
}

impl AssessmentField {
    /// Creates a field from its mandatory name and value.
    pub fn new(name: CodableValue, value: CodableValue) -> Self {
        Self {
            name: Some(name),
            value: Some(value),
            group: None,
        }
    }
}

impl XmlItem for AssessmentField {
    const ELEMENT: &'static str = "assessment-field";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            name: Some(node.require_item("name")?),
            value: Some(node.require_item("value")?),
            group: node.optional_item("group")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let field_name = required(Self::ELEMENT, "name", &self.name)?;
        let value = required(Self::ELEMENT, "value", &self.value)?;
        writer.start(name)?;
        field_name.write_xml("name", writer)?;
        value.write_xml("value", writer)?;
        opt_item(writer, "group", &self.group)?;
        writer.end()
    }
}

/// The outcome of a health assessment, as a set of named results.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Assessment {
    /// When the assessment was taken. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// The assessment's title. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NonBlankText>,

    /// The kind of assessment. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CodableValue>,

    /// The individual results, in order. At least one is mandatory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub result: Vec<AssessmentField>,
}

impl Assessment {
    /// Creates an assessment from its mandatory fields.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name is blank.
    pub fn new(
        when: NaiveDateTime,
        name: impl AsRef<str>,
        category: CodableValue,
        result: Vec<AssessmentField>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            when: Some(when),
            name: Some(NonBlankText::new(name)?),
            category: Some(category),
            result,
        })
    }
}

impl XmlItem for Assessment {
    const ELEMENT: &'static str = "assessment";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: Some(node.require_datetime("when")?),
            name: Some(node.require_nonblank("name")?),
            category: Some(node.require_item("category")?),
            result: node.repeated_items("result")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        let title = required(Self::ELEMENT, "name", &self.name)?;
        let category = required(Self::ELEMENT, "category", &self.category)?;
        required_slice(Self::ELEMENT, "result", &self.result)?;

        writer.start(name)?;
        writer.datetime_element("when", when)?;
        writer.text_element("name", title.as_str())?;
        category.write_xml("category", writer)?;
        repeated(writer, "result", &self.result)?;
        writer.end()
    }
}
