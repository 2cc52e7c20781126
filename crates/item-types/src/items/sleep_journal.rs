//! Morning sleep journal records.
//!
//! A journal entry is written on waking and describes the night just
//! past: when the person went to bed and woke, how long settling and
//! sleeping took, any awakenings during the night, and how awake they
//! felt on rising.

use chrono::NaiveDateTime;
use healthbook_xml::{
    opt_item, repeated, required, ParseError, WriteError, XmlItem, XmlNode, XmlWriter,
};
use serde::{Deserialize, Serialize};

use crate::common::codable::CodableValue;
use crate::common::temporal::TimeOfDay;

/// How awake the sleeper felt on rising.
///
/// Travels as the integers 1 through 3; anything else on the wire is
/// rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WakeState {
    /// Fully rested.
    WideAwake,
    /// Awake but not fully rested.
    Awake,
    /// Still sleepy.
    Sleepy,
}

impl WakeState {
    /// The wire value of this state, 1 through 3.
    pub fn to_wire(self) -> u32 {
        match self {
            WakeState::WideAwake => 1,
            WakeState::Awake => 2,
            WakeState::Sleepy => 3,
        }
    }

    /// Parses a wire value; `None` for anything outside 1-3.
    pub fn from_wire(value: u32) -> Option<Self> {
        match value {
            1 => Some(WakeState::WideAwake),
            2 => Some(WakeState::Awake),
            3 => Some(WakeState::Sleepy),
            _ => None,
        }
    }
}

impl serde::Serialize for WakeState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.to_wire())
    }
}

impl<'de> serde::Deserialize<'de> for WakeState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u32::deserialize(deserializer)?;
        WakeState::from_wire(value).ok_or_else(|| {
            serde::de::Error::custom(format!("wake state out of range 1-3: {value}"))
        })
    }
}

/// One awakening during the night.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Occurrence {
    /// When the awakening started. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<TimeOfDay>,

    /// How long it lasted, in minutes. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
}

impl Occurrence {
    /// Creates an awakening from its start and duration.
    pub fn new(when: TimeOfDay, minutes: u32) -> Self {
        Self {
            when: Some(when),
            minutes: Some(minutes),
        }
    }
}

impl XmlItem for Occurrence {
    const ELEMENT: &'static str = "awakening";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        Ok(Self {
            when: Some(node.require_item("when")?),
            minutes: Some(node.require_u32("minutes")?),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        let minutes = required(Self::ELEMENT, "minutes", &self.minutes)?;
        writer.start(name)?;
        when.write_xml("when", writer)?;
        writer.u32_element("minutes", *minutes)?;
        writer.end()
    }
}

/// A morning entry describing the previous night's sleep.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SleepJournalAm {
    /// The morning the entry was written. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<NaiveDateTime>,

    /// When the person went to bed. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bed_time: Option<TimeOfDay>,

    /// When the person woke. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_time: Option<TimeOfDay>,

    /// Minutes actually asleep. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_minutes: Option<u32>,

    /// Minutes taken to fall asleep. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settling_minutes: Option<u32>,

    /// Awakenings during the night, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub awakening: Vec<Occurrence>,

    /// A sleep aid taken before bed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medication: Option<CodableValue>,

    /// How awake the person felt on rising. Mandatory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wake_state: Option<WakeState>,
}

impl SleepJournalAm {
    /// Creates an entry from its mandatory fields.
    pub fn new(
        when: NaiveDateTime,
        bed_time: TimeOfDay,
        wake_time: TimeOfDay,
        sleep_minutes: u32,
        settling_minutes: u32,
        wake_state: WakeState,
    ) -> Self {
        Self {
            when: Some(when),
            bed_time: Some(bed_time),
            wake_time: Some(wake_time),
            sleep_minutes: Some(sleep_minutes),
            settling_minutes: Some(settling_minutes),
            awakening: Vec::new(),
            medication: None,
            wake_state: Some(wake_state),
        }
    }
}

impl XmlItem for SleepJournalAm {
    const ELEMENT: &'static str = "sleep-am";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        let raw_state = node.require_u32("wake-state")?;
        let wake_state = WakeState::from_wire(raw_state).ok_or_else(|| {
            node.malformed("wake-state", "integer between 1 and 3", &raw_state.to_string())
        })?;
        Ok(Self {
            when: Some(node.require_datetime("when")?),
            bed_time: Some(node.require_item("bed-time")?),
            wake_time: Some(node.require_item("wake-time")?),
            sleep_minutes: Some(node.require_u32("sleep-minutes")?),
            settling_minutes: Some(node.require_u32("settling-minutes")?),
            awakening: node.repeated_items("awakening")?,
            medication: node.optional_item("medication")?,
            wake_state: Some(wake_state),
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        let when = required(Self::ELEMENT, "when", &self.when)?;
        let bed_time = required(Self::ELEMENT, "bed-time", &self.bed_time)?;
        let wake_time = required(Self::ELEMENT, "wake-time", &self.wake_time)?;
        let sleep_minutes = required(Self::ELEMENT, "sleep-minutes", &self.sleep_minutes)?;
        let settling_minutes =
            required(Self::ELEMENT, "settling-minutes", &self.settling_minutes)?;
        let wake_state = required(Self::ELEMENT, "wake-state", &self.wake_state)?;

        writer.start(name)?;
        writer.datetime_element("when", when)?;
        bed_time.write_xml("bed-time", writer)?;
        wake_time.write_xml("wake-time", writer)?;
        writer.u32_element("sleep-minutes", *sleep_minutes)?;
        writer.u32_element("settling-minutes", *settling_minutes)?;
        repeated(writer, "awakening", &self.awakening)?;
        opt_item(writer, "medication", &self.medication)?;
        writer.u32_element("wake-state", wake_state.to_wire())?;
        writer.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::new(hour, minute).expect("valid time")
    }

    fn sample_entry() -> SleepJournalAm {
        let when = "2024-03-05T07:30:00".parse().expect("valid datetime");
        SleepJournalAm::new(when, time(23, 15), time(7, 0), 410, 25, WakeState::Awake)
    }

    #[test]
    fn round_trips_full_entry() {
        let mut entry = sample_entry();
        entry.awakening = vec![
            Occurrence::new(time(2, 10), 15),
            Occurrence::new(time(4, 45), 5),
        ];
        entry.medication = Some(CodableValue::new("Melatonin").expect("non-blank name"));

        let xml = entry.to_xml().expect("complete entry");
        assert!(xml.contains("<bed-time><h>23</h><m>15</m></bed-time>"));
        assert!(xml.contains("<awakening><when><h>2</h><m>10</m></when><minutes>15</minutes></awakening>"));
        assert!(xml.contains("<wake-state>2</wake-state>"));

        let back = SleepJournalAm::from_xml_str(&xml).expect("parses back");
        assert_eq!(back, entry);
        assert_eq!(back.awakening.len(), 2);
        assert_eq!(back.awakening[0].minutes, Some(15));
    }

    #[test]
    fn renders_entry_without_awakenings_or_medication() {
        let xml = sample_entry().to_xml().expect("complete entry");

        assert!(!xml.contains("awakening"));
        assert!(!xml.contains("medication"));
        assert!(xml.ends_with("<wake-state>2</wake-state></sleep-am>"));
    }

    #[test]
    fn wake_state_wire_values_round_trip() {
        for wire in 1..=3 {
            let state = WakeState::from_wire(wire).expect("wire value in range");
            assert_eq!(state.to_wire(), wire);
        }
        assert_eq!(WakeState::from_wire(0), None);
        assert_eq!(WakeState::from_wire(4), None);
    }

    #[test]
    fn out_of_range_wake_state_is_a_parse_fault() {
        let xml = "<sleep-am><when>2024-03-05T07:30:00</when>\
                   <bed-time><h>23</h><m>15</m></bed-time>\
                   <wake-time><h>7</h><m>0</m></wake-time>\
                   <sleep-minutes>410</sleep-minutes>\
                   <settling-minutes>25</settling-minutes>\
                   <wake-state>4</wake-state></sleep-am>";
        match SleepJournalAm::from_xml_str(xml) {
            Err(ParseError::Malformed { element, text, .. }) => {
                assert_eq!(element, "wake-state");
                assert_eq!(text, "4");
            }
            other => panic!("expected a malformed fault, got {other:?}"),
        }
    }

    #[test]
    fn unset_bed_time_faults_at_write() {
        let mut entry = sample_entry();
        entry.bed_time = None;
        match entry.to_xml() {
            Err(WriteError::UnsetField { record, field }) => {
                assert_eq!(record, "sleep-am");
                assert_eq!(field, "bed-time");
            }
            other => panic!("expected an unset-field fault, got {other:?}"),
        }
    }
}
