//! Immunization records.

use chrono::NaiveDateTime;
use healthbook_xml::{opt_item, required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;

/// One administration of a vaccine.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Immunization {
    /// The vaccine given. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CodableValue>,

    /// When it was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administration_date: Option<NaiveDateTime>,

    /// The manufacturer's lot number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,

    /// How it was given, intramuscular for example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<CodableValue>,

    /// Which dose in a course this was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,

    /// Any adverse reaction observed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adverse_event: Option<String>,
}

impl Immunization {
    /// Creates an immunization from the vaccine name.
    pub fn new(name: CodableValue) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }
}

impl XmlItem for Immunization {
    const ELEMENT: &'static str = "immunization";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            name: Some(node.require_item("name")?),
            administration_date: node.optional_datetime("administration-date")?,
            lot: node.optional_text("lot"),
            route: node.optional_item("route")?,
            sequence: node.optional_u32("sequence")?,
            adverse_event: node.optional_text("adverse-event"),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let vaccine = required(Self::ELEMENT, "name", &self.name)?;
        writer.start(name)?;
        vaccine.write_xml("name", writer)?;
        writer.opt_datetime_element("administration-date", self.administration_date.as_ref())?;
        writer.opt_text_element("lot", self.lot.as_deref())?;
        opt_item(writer, "route", &self.route)?;
        writer.opt_u32_element("sequence", self.sequence)?;
        writer.opt_text_element("adverse-event", self.adverse_event.as_deref())?;
        writer.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_second_dose_with_lot() {
        let mut dose =
            Immunization::new(CodableValue::new("Influenza vaccine").expect("non-blank name"));
        dose.administration_date = Some("2023-10-12T11:20:00".parse().expect("valid datetime"));
        dose.lot = Some("FLU23-0042".to_string());
        dose.route = Some(CodableValue::new("Intramuscular").expect("non-blank route"));
        dose.sequence = Some(2);

        let xml = dose.to_xml().expect("complete immunization");
        assert!(xml.contains("<lot>FLU23-0042</lot>"));
        assert!(xml.contains("<sequence>2</sequence>"));
        assert_eq!(Immunization::from_xml_str(&xml).expect("parses back"), dose);
    }

    #[test]
    fn renders_minimal_immunization_without_optional_elements() {
        let dose = Immunization::new(CodableValue::new("MMR vaccine").expect("non-blank name"));
        let xml = dose.to_xml().expect("complete immunization");

        assert_eq!(
            xml,
            "<immunization><name><text>MMR vaccine</text></name></immunization>"
        );
    }

    #[test]
    fn missing_name_is_a_parse_fault() {
        let xml = "<immunization><lot>FLU23-0042</lot></immunization>";
        match Immunization::from_xml_str(xml) {
            Err(ParseError::MissingElement { parent, element }) => {
                assert_eq!(parent, "immunization");
                assert_eq!(element, "name");
            }
            other => panic!("expected a missing-element fault, got {other:?}"),
        }
    }
}
