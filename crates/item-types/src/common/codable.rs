//! Vocabulary-coded values.
//!
//! Clinical concepts carry both a display text and zero or more codes
//! drawn from named vocabularies. [`CodableValue`] is the pairing of
//! the two; [`CodedValue`] is one code within it.

use healthbook_types::{NonBlankText, ValidationError};
use healthbook_xml::{repeated, required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

/// A single code drawn from a named clinical vocabulary.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CodedValue {
    /// The code itself. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<NonBlankText>,

    /// The code-system family the vocabulary belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// The name of the vocabulary the code comes from. Mandatory.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub code_type: Option<NonBlankText>,

    /// The vocabulary version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl CodedValue {
    /// Creates a coded value from the code and its vocabulary name.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when either argument is blank.
    pub fn new(value: impl AsRef<str>, code_type: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self {
            value: Some(NonBlankText::new(value)?),
            family: None,
            code_type: Some(NonBlankText::new(code_type)?),
            version: None,
        })
    }
}

impl XmlItem for CodedValue {
    const ELEMENT: &'static str = "code";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            value: Some(node.require_nonblank("value")?),
            family: node.optional_text("family"),
            code_type: Some(node.require_nonblank("type")?),
            version: node.optional_text("version"),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let value = required(Self::ELEMENT, "value", &self.value)?;
        let code_type = required(Self::ELEMENT, "type", &self.code_type)?;
        writer.start(name)?;
        writer.text_element("value", value.as_str())?;
        writer.opt_text_element("family", self.family.as_deref())?;
        writer.text_element("type", code_type.as_str())?;
        writer.opt_text_element("version", self.version.as_deref())?;
        writer.end()
    }
}

/// A display text backed by zero or more vocabulary codes.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CodableValue {
    /// Human-readable text for the concept. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<NonBlankText>,

    /// Codes backing the text, in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code: Vec<CodedValue>,
}

impl CodableValue {
    /// Creates a codable value from its display text alone.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the text is blank.
    pub fn new(text: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self {
            text: Some(NonBlankText::new(text)?),
            code: Vec::new(),
        })
    }

    /// Appends a vocabulary code, builder style.
    #[must_use]
    pub fn with_code(mut self, code: CodedValue) -> Self {
        self.code.push(code);
        self
    }
}

impl XmlItem for CodableValue {
    const ELEMENT: &'static str = "codable-value";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            text: Some(node.require_nonblank("text")?),
            code: node.repeated_items("code")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let text = required(Self::ELEMENT, "text", &self.text)?;
        writer.start(name)?;
        writer.text_element("text", text.as_str())?;
        repeated(writer, "code", &self.code)?;
        writer.end()
    }
}

impl std::fmt::Display for CodableValue {
    /// Shows the display text; nothing when the text is unset.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.text {
            Some(text) => write!(f, "{text}"),
            None => Ok(()),
        }
    }
}
