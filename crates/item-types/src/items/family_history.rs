//! Family medical history records.
//!
//! A condition can stand alone as its own record, where its element is
//! `family-history-condition`, or sit inside a [`FamilyHistory`]
//! record, where the same content is written under the shorter
//! `condition` name. Callers pick the name at serialisation time; the
//! content is identical either way.

use chrono::NaiveDate;
use healthbook_xml::{
    opt_item, repeated, required, required_slice, ParseError, WriteError, XmlItem, XmlNode,
    XmlWriter,
};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;

/// A condition observed in a family member.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FamilyHistoryCondition {
    /// What the condition is. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CodableValue>,

    /// When it began in the relative.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset_date: Option<NaiveDate>,

    /// Its status in the relative, fatal for example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CodableValue>,
}

impl FamilyHistoryCondition {
    /// Creates a condition from its name.
    pub fn new(name: CodableValue) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }
}

impl XmlItem for FamilyHistoryCondition {
    const ELEMENT: &'static str = "family-history-condition";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            name: Some(node.require_item("name")?),
            onset_date: node.optional_date("onset-date")?,
            status: node.optional_item("status")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let condition = required(Self::ELEMENT, "name", &self.name)?;
        writer.start(name)?;
        condition.write_xml("name", writer)?;
        writer.opt_date_element("onset-date", self.onset_date.as_ref())?;
        opt_item(writer, "status", &self.status)?;
        writer.end()
    }
}

/// The family member a history entry concerns.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FamilyHistoryRelative {
    /// How the relative is related, mother or uncle for example.
    /// Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<CodableValue>,

    /// The relative's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_name: Option<String>,

    /// When the relative was born.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,

    /// When the relative died.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_death: Option<NaiveDate>,
}

impl FamilyHistoryRelative {
    /// Creates a relative from the relationship alone.
    pub fn new(relationship: CodableValue) -> Self {
        Self {
            relationship: Some(relationship),
            ..Self::default()
        }
    }
}

impl XmlItem for FamilyHistoryRelative {
    const ELEMENT: &'static str = "relative";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            relationship: Some(node.require_item("relationship")?),
            relative_name: node.optional_text("relative-name"),
            date_of_birth: node.optional_date("date-of-birth")?,
            date_of_death: node.optional_date("date-of-death")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let relationship = required(Self::ELEMENT, "relationship", &self.relationship)?;
        writer.start(name)?;
        relationship.write_xml("relationship", writer)?;
        writer.opt_text_element("relative-name", self.relative_name.as_deref())?;
        writer.opt_date_element("date-of-birth", self.date_of_birth.as_ref())?;
        writer.opt_date_element("date-of-death", self.date_of_death.as_ref())?;
        writer.end()
    }
}

/// Conditions observed in one family member.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FamilyHistory {
    /// The conditions, in order. At least one is mandatory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub condition: Vec<FamilyHistoryCondition>,

    /// The family member the conditions were observed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative: Option<FamilyHistoryRelative>,
}

impl FamilyHistory {
    /// Creates a history from its conditions.
    pub fn new(condition: Vec<FamilyHistoryCondition>) -> Self {
        Self {
            condition,
            relative: None,
        }
    }
}

impl XmlItem for FamilyHistory {
    const ELEMENT: &'static str = "family-history";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            condition: node.repeated_items("condition")?,
            relative: node.optional_item("relative")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        required_slice(Self::ELEMENT, "condition", &self.condition)?;
        writer.start(name)?;
        repeated(writer, "condition", &self.condition)?;
        opt_item(writer, "relative", &self.relative)?;
        writer.end()
    }
}
