//! Allergic episode records.

use chrono::NaiveDateTime;
use healthbook_xml::{opt_item, required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;

/// One occurrence of an allergic reaction.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AllergicEpisode {
    /// When the episode happened. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// The allergen or allergy involved. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<CodableValue>,

    /// The reaction observed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction: Option<CodableValue>,

    /// The treatment given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment: Option<CodableValue>,
}

impl AllergicEpisode {
    /// Creates an episode from its mandatory fields.
    pub fn new(when: NaiveDateTime, name: CodableValue) -> Self {
        Self {
            when: Some(when),
            name: Some(name),
            ..Self::default()
        }
    }
}

impl XmlItem for AllergicEpisode {
    const ELEMENT: &'static str = "allergic-episode";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: Some(node.require_datetime("when")?),
            name: Some(node.require_item("name")?),
            reaction: node.optional_item("reaction")?,
            treatment: node.optional_item("treatment")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        let allergen = required(Self::ELEMENT, "name", &self.name)?;
        writer.start(name)?;
        writer.datetime_element("when", when)?;
        allergen.write_xml("name", writer)?;
        opt_item(writer, "reaction", &self.reaction)?;
        opt_item(writer, "treatment", &self.treatment)?;
        writer.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_episode_with_reaction_and_treatment() {
        let xml = "<allergic-episode>\
                   <when>2024-06-14T09:30:00</when>\
                   <name><text>Peanut</text></name>\
                   <reaction><text>Hives</text></reaction>\
                   <treatment><text>Antihistamine</text></treatment>\
                   </allergic-episode>";
        let episode = AllergicEpisode::from_xml_str(xml).expect("valid episode");

        assert_eq!(episode.name.as_ref().map(ToString::to_string), Some("Peanut".into()));
        assert_eq!(episode.reaction.as_ref().map(ToString::to_string), Some("Hives".into()));
        assert_eq!(
            episode.treatment.as_ref().map(ToString::to_string),
            Some("Antihistamine".into())
        );
    }

    #[test]
    fn round_trips_minimal_episode() {
        let when = "2024-06-14T09:30:00".parse().expect("valid datetime");
        let episode =
            AllergicEpisode::new(when, CodableValue::new("Peanut").expect("non-blank name"));

        let xml = episode.to_xml().expect("complete episode");
        assert_eq!(
            xml,
            "<allergic-episode><when>2024-06-14T09:30:00</when>\
             <name><text>Peanut</text></name></allergic-episode>"
        );
        assert!(!xml.contains("reaction"));
        assert!(!xml.contains("treatment"));

        assert_eq!(AllergicEpisode::from_xml_str(&xml).expect("parses back"), episode);
    }

    #[test]
    fn missing_name_is_a_parse_fault() {
        let xml = "<allergic-episode><when>2024-06-14T09:30:00</when></allergic-episode>";
        match AllergicEpisode::from_xml_str(xml) {
            Err(ParseError::MissingElement { parent, element }) => {
                assert_eq!(parent, "allergic-episode");
                assert_eq!(element, "name");
            }
            other => panic!("expected a missing-element fault, got {other:?}"),
        }
    }

    #[test]
    fn unset_when_faults_at_write() {
        let episode = AllergicEpisode {
            name: Some(CodableValue::new("Peanut").expect("non-blank name")),
            ..AllergicEpisode::default()
        };
        match episode.to_xml() {
            Err(WriteError::UnsetField { record, field }) => {
                assert_eq!(record, "allergic-episode");
                assert_eq!(field, "when");
            }
            other => panic!("expected an unset-field fault, got {other:?}"),
        }
    }
}
