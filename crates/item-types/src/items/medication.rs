//! Medication records.

use healthbook_xml::{opt_item, required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;
use crate::common::measurement::GeneralMeasurement;

/// A medication the person takes or has taken.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Medication {
    /// The medication's name. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CodableValue>,

    /// Its generic equivalent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generic_name: Option<CodableValue>,

    /// The amount taken each time, "1 tablet" for example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose: Option<GeneralMeasurement>,

    /// The preparation's strength, "500 mg" for example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<GeneralMeasurement>,

    /// How often it is taken, "twice daily" for example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<GeneralMeasurement>,

    /// How it is taken, by mouth for example.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<CodableValue>,
}

impl Medication {
    /// Creates a medication from its name.
    pub fn new(name: CodableValue) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }
}

impl XmlItem for Medication {
    const ELEMENT: &'static str = "medication";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            name: Some(node.require_item("name")?),
            generic_name: node.optional_item("generic-name")?,
            dose: node.optional_item("dose")?,
            strength: node.optional_item("strength")?,
            frequency: node.optional_item("frequency")?,
            route: node.optional_item("route")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let medication = required(Self::ELEMENT, "name", &self.name)?;
        writer.start(name)?;
        medication.write_xml("name", writer)?;
        opt_item(writer, "generic-name", &self.generic_name)?;
        opt_item(writer, "dose", &self.dose)?;
        opt_item(writer, "strength", &self.strength)?;
        opt_item(writer, "frequency", &self.frequency)?;
        opt_item(writer, "route", &self.route)?;
        writer.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_prescription() {
        let mut medication =
            Medication::new(CodableValue::new("Amoxicillin").expect("non-blank name"));
        medication.dose = Some(GeneralMeasurement::new("1 capsule").expect("non-blank dose"));
        medication.strength = Some(GeneralMeasurement::new("500 mg").expect("non-blank strength"));
        medication.frequency =
            Some(GeneralMeasurement::new("three times daily").expect("non-blank frequency"));
        medication.route = Some(CodableValue::new("By mouth").expect("non-blank route"));

        let xml = medication.to_xml().expect("complete medication");
        assert!(xml.contains("<strength><display>500 mg</display></strength>"));
        assert!(xml.contains("<route><text>By mouth</text></route>"));
        assert_eq!(Medication::from_xml_str(&xml).expect("parses back"), medication);
    }

    #[test]
    fn renders_minimal_medication_without_optional_elements() {
        let medication = Medication::new(CodableValue::new("Aspirin").expect("non-blank name"));
        let xml = medication.to_xml().expect("complete medication");

        assert_eq!(xml, "<medication><name><text>Aspirin</text></name></medication>");
    }

    #[test]
    fn unset_name_faults_at_write() {
        match Medication::default().to_xml() {
            Err(WriteError::UnsetField { record, field }) => {
                assert_eq!(record, "medication");
                assert_eq!(field, "name");
            }
            other => panic!("expected an unset-field fault, got {other:?}"),
        }
    }
}
