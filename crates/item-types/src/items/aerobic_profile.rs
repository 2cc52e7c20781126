//! Aerobic fitness profile records.
//!
//! A profile captures point-in-time fitness numbers plus named groups
//! of heart-rate training zones. Zone and group names travel as XML
//! attributes rather than child elements.

use chrono::NaiveDateTime;
use healthbook_types::PositiveMeasurement;
use healthbook_xml::{repeated, required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

use crate::common::measurement::read_optional_positive;

/// One heart-rate training zone, bounded in beats per minute.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct HeartRateZone {
    /// The zone's label, carried as an attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Lower bound of the zone. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<u32>,

    /// Upper bound of the zone. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<u32>,
}

impl HeartRateZone {
    /// Creates a zone from its bounds.
    pub fn new(lower_bound: u32, upper_bound: u32) -> Self {
        Self {
            name: None,
            lower_bound: Some(lower_bound),
            upper_bound: Some(upper_bound),
        }
    }
}

impl XmlItem for HeartRateZone {
    const ELEMENT: &'static str = "zone";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            name: node.attribute("name").map(str::to_string),
            lower_bound: Some(node.require_u32("lower-bound")?),
            upper_bound: Some(node.require_u32("upper-bound")?),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let lower = required(Self::ELEMENT, "lower-bound", &self.lower_bound)?;
        let upper = required(Self::ELEMENT, "upper-bound", &self.upper_bound)?;

        match self.name.as_deref() {
            Some(label) => writer.start_with_attributes(name, &[("name", label)])?,
            None => writer.start(name)?,
        }
        writer.u32_element("lower-bound", *lower)?;
        writer.u32_element("upper-bound", *upper)?;
        writer.end()
    }
}

/// A named group of heart-rate zones.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HeartRateZoneGroup {
    /// The group's label, carried as an attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The zones in the group, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zone: Vec<HeartRateZone>,
}

impl XmlItem for HeartRateZoneGroup {
    const ELEMENT: &'static str = "zone-group";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            name: node.attribute("name").map(str::to_string),
            zone: node.repeated_items("zone")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        match self.name.as_deref() {
            Some(label) => writer.start_with_attributes(name, &[("name", label)])?,
            None => writer.start(name)?,
        }
        repeated(writer, "zone", &self.zone)?;
        writer.end()
    }
}

/// A snapshot of aerobic fitness.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AerobicProfile {
    /// When the profile was taken. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// Maximum heart rate, beats per minute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heartrate: Option<u32>,

    /// Resting heart rate, beats per minute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resting_heartrate: Option<u32>,

    /// Anaerobic threshold, beats per minute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anaerobic_threshold: Option<u32>,

    /// Maximal oxygen uptake, millilitres per kilogram per minute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vo2_max: Option<PositiveMeasurement>,

    /// Training zone groups, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zone_group: Vec<HeartRateZoneGroup>,
}

impl AerobicProfile {
    /// Creates a profile dated at the given moment.
    pub fn new(when: NaiveDateTime) -> Self {
        Self {
            when: Some(when),
            ..Self::default()
        }
    }
}

impl XmlItem for AerobicProfile {
    const ELEMENT: &'static str = "aerobic-profile";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: Some(node.require_datetime("when")?),
            max_heartrate: node.optional_u32("max-heartrate")?,
            resting_heartrate: node.optional_u32("resting-heartrate")?,
            anaerobic_threshold: node.optional_u32("anaerobic-threshold")?,
            vo2_max: read_optional_positive(node, "vo2-max")?,
            zone_group: node.repeated_items("zone-group")?,
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        writer.start(name)?;
        writer.datetime_element("when", when)?;
        writer.opt_u32_element("max-heartrate", self.max_heartrate)?;
        writer.opt_u32_element("resting-heartrate", self.resting_heartrate)?;
        writer.opt_u32_element("anaerobic-threshold", self.anaerobic_threshold)?;
        writer.opt_f64_element("vo2-max", self.vo2_max.map(|m| m.value()))?;
        repeated(writer, "zone-group", &self.zone_group)?;
        writer.end()
    }
}
