//! Daily dietary intake records.

use chrono::NaiveDate;
use healthbook_types::PositiveMeasurement;
use healthbook_xml::{required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::measurement::read_optional_positive;

/// Nutrient totals for one calendar day.
///
/// Nutrient masses are in grams except sodium and cholesterol, which
/// are in milligrams.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DietaryIntakeDaily {
    /// The day the totals cover. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDate>,

    /// Energy intake in kilocalories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,

    /// Total fat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fat: Option<PositiveMeasurement>,

    /// Saturated fat.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<PositiveMeasurement>,

    /// Protein.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<PositiveMeasurement>,

    /// Total carbohydrates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates: Option<PositiveMeasurement>,

    /// Dietary fibre.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<PositiveMeasurement>,

    /// Sodium.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<PositiveMeasurement>,

    /// Cholesterol.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<PositiveMeasurement>,
}

impl DietaryIntakeDaily {
    /// Creates a record for the given day.
    pub fn new(when: NaiveDate) -> Self {
        Self {
            when: Some(when),
            ..Self::default()
        }
    }
}

impl XmlItem for DietaryIntakeDaily {
    const ELEMENT: &'static str = "dietary-intake-daily";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: Some(node.require_date("when")?),
            calories: node.optional_u32("calories")?,
            total_fat: read_optional_positive(node, "total-fat")?,
            saturated_fat: read_optional_positive(node, "saturated-fat")?,
            protein: read_optional_positive(node, "protein")?,
            carbohydrates: read_optional_positive(node, "carbohydrates")?,
            fiber: read_optional_positive(node, "fiber")?,
            sodium: read_optional_positive(node, "sodium")?,
            cholesterol: read_optional_positive(node, "cholesterol")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        writer.start(name)?;
        writer.date_element("when", when)?;
        writer.opt_u32_element("calories", self.calories)?;
        writer.opt_f64_element("total-fat", self.total_fat.map(|m| m.value()))?;
        writer.opt_f64_element("saturated-fat", self.saturated_fat.map(|m| m.value()))?;
        writer.opt_f64_element("protein", self.protein.map(|m| m.value()))?;
        writer.opt_f64_element("carbohydrates", self.carbohydrates.map(|m| m.value()))?;
        writer.opt_f64_element("fiber", self.fiber.map(|m| m.value()))?;
        writer.opt_f64_element("sodium", self.sodium.map(|m| m.value()))?;
        writer.opt_f64_element("cholesterol", self.cholesterol.map(|m| m.value()))?;
        writer.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grams(value: f64) -> PositiveMeasurement {
        PositiveMeasurement::new(value).expect("positive value")
    }

    #[test]
    fn round_trips_a_full_day() {
        let when = "2024-04-02".parse().expect("valid date");
        let mut day = DietaryIntakeDaily::new(when);
        day.calories = Some(2150);
        day.total_fat = Some(grams(70.5));
        day.protein = Some(grams(95.0));
        day.sodium = Some(grams(2300.0));

        let xml = day.to_xml().expect("complete record");
        assert!(xml.starts_with("<dietary-intake-daily><when>2024-04-02</when>"));
        assert!(xml.contains("<calories>2150</calories>"));
        assert!(xml.contains("<total-fat>70.5</total-fat>"));
        assert_eq!(DietaryIntakeDaily::from_xml_str(&xml).expect("parses back"), day);
    }

    #[test]
    fn day_with_no_nutrients_round_trips() {
        let when = "2024-04-02".parse().expect("valid date");
        let day = DietaryIntakeDaily::new(when);
        let xml = day.to_xml().expect("complete record");

        assert_eq!(
            xml,
            "<dietary-intake-daily><when>2024-04-02</when></dietary-intake-daily>"
        );
        assert_eq!(DietaryIntakeDaily::from_xml_str(&xml).expect("parses back"), day);
    }

    #[test]
    fn negative_nutrient_is_a_parse_fault() {
        let xml = "<dietary-intake-daily><when>2024-04-02</when>\
                   <protein>-12</protein></dietary-intake-daily>";
        match DietaryIntakeDaily::from_xml_str(xml) {
            Err(ParseError::Constraint { element, .. }) => assert_eq!(element, "protein"),
            other => panic!("expected a constraint fault, got {other:?}"),
        }
    }

    #[test]
    fn datetime_in_when_is_a_parse_fault() {
        let xml = "<dietary-intake-daily><when>2024-04-02T08:00:00</when>\
                   </dietary-intake-daily>";
        match DietaryIntakeDaily::from_xml_str(xml) {
            Err(ParseError::Malformed { element, expected, .. }) => {
                assert_eq!(element, "when");
                assert_eq!(expected, "date");
            }
            other => panic!("expected a malformed fault, got {other:?}"),
        }
    }
}
