//! Recurring alert records.

use chrono::Weekday;
use healthbook_xml::{
    repeated, required_slice, ParseError, WriteError, XmlItem, XmlNode, XmlWriter,
};
use serde::{Deserialize, Serialize};

use crate::common::temporal::{weekday_from_wire, weekday_to_wire, TimeOfDay};

/// A reminder that fires on chosen weekdays at chosen times.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Alert {
    /// Days of the week the alert fires on. At least one is mandatory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dow: Vec<Weekday>,

    /// Times of day the alert fires at. At least one is mandatory.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time: Vec<TimeOfDay>,

    /// What the alert is for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Alert {
    /// Creates an alert from its schedule.
    pub fn new(dow: Vec<Weekday>, time: Vec<TimeOfDay>) -> Self {
        Self {
            dow,
            time,
            description: None,
        }
    }
}

impl XmlItem for Alert {
    const ELEMENT: &'static str = "alert";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        let mut dow = Vec::new();
        for child in node.children("dow") {
            let raw: u32 = child
                .text()
                .parse()
                .map_err(|_| node.malformed("dow", "unsigned integer", child.text()))?;
            let day = weekday_from_wire(raw)
                .ok_or_else(|| node.malformed("dow", "integer between 1 and 7", child.text()))?;
            dow.push(day);
        }
        Ok(Self {
            dow,
            time: node.repeated_items("time")?,
            description: node.optional_text("description"),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let dow = required_slice(Self::ELEMENT, "dow", &self.dow)?;
        required_slice(Self::ELEMENT, "time", &self.time)?;

        writer.start(name)?;
        for day in dow {
            writer.u32_element("dow", weekday_to_wire(*day))?;
        }
        repeated(writer, "time", &self.time)?;
        writer.opt_text_element("description", self.description.as_deref())?;
        writer.end()
    }
}
