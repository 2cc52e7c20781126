//! Healthcare organization records.

use healthbook_types::{NonBlankText, ValidationError};
use healthbook_xml::{opt_item, required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;
use crate::common::contact::ContactInfo;

/// A clinic, hospital, laboratory or other healthcare body.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Organization {
    /// The organization's name. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<NonBlankText>,

    /// How to reach it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactInfo>,

    /// What kind of body it is, a laboratory for example.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<CodableValue>,

    /// Its website.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Organization {
    /// Creates an organization from its name.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name is blank.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: Some(NonBlankText::new(name)?),
            ..Self::default()
        })
    }
}

impl XmlItem for Organization {
    const ELEMENT: &'static str = "organization";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            name: Some(node.require_nonblank("name")?),
            contact: node.optional_item("contact")?,
            organization_type: node.optional_item("type")?,
            website: node.optional_text("website"),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let org_name = required(Self::ELEMENT, "name", &self.name)?;
        writer.start(name)?;
        writer.text_element("name", org_name.as_str())?;
        opt_item(writer, "contact", &self.contact)?;
        opt_item(writer, "type", &self.organization_type)?;
        writer.opt_text_element("website", self.website.as_deref())?;
        writer.end()
    }
}
