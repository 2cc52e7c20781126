//! Times of day and day-of-week wire codecs.
//!
//! The wire format counts days of the week from Sunday = 1 through
//! Saturday = 7, while [`chrono::Weekday`] counts from zero. The
//! functions here are the only place that offset is applied.

use chrono::Weekday;
use healthbook_types::{check, ValidationError};
use healthbook_xml::{ParseError, WriteError, XmlItem, XmlNode, XmlWriter};
use serde::{Deserialize, Serialize};

/// A clock time with optional second and millisecond precision.
///
/// Fields are validated on construction and cannot be set out of
/// range afterwards, so a `TimeOfDay` is always a real clock time.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    second: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    millisecond: Option<u32>,
}

impl TimeOfDay {
    /// Creates a time from hour and minute.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the hour exceeds 23 or the
    /// minute exceeds 59.
    pub fn new(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        Self::with_precision(hour, minute, None, None)
    }

    /// Creates a time carrying whatever precision the caller has.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when any component is out of
    /// range (hour 0-23, minute and second 0-59, millisecond 0-999).
    pub fn with_precision(
        hour: u32,
        minute: u32,
        second: Option<u32>,
        millisecond: Option<u32>,
    ) -> Result<Self, ValidationError> {
        check::at_most_u32("h", hour, 23)?;
        check::at_most_u32("m", minute, 59)?;
        if let Some(second) = second {
            check::at_most_u32("s", second, 59)?;
        }
        if let Some(millisecond) = millisecond {
            check::at_most_u32("f", millisecond, 999)?;
        }
        Ok(Self {
            hour,
            minute,
            second,
            millisecond,
        })
    }

    /// Hour of the day, 0-23.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Minute of the hour, 0-59.
    pub fn minute(&self) -> u32 {
        self.minute
    }

    /// Second of the minute, when recorded.
    pub fn second(&self) -> Option<u32> {
        self.second
    }

    /// Millisecond of the second, when recorded.
    pub fn millisecond(&self) -> Option<u32> {
        self.millisecond
    }
}

impl XmlItem for TimeOfDay {
    const ELEMENT: &'static str = "time";

    fn parse_xml(node: &XmlNode) -> Result<Self, ParseError> {
        let hour = node.require_u32("h")?;
        let minute = node.require_u32("m")?;
        let second = node.optional_u32("s")?;
        let millisecond = node.optional_u32("f")?;
        Self::with_precision(hour, minute, second, millisecond).map_err(|source| {
            let element = match &source {
                ValidationError::TooLarge { field, .. } => *field,
                _ => Self::ELEMENT,
            };
            node.constraint(element, source)
        })
    }

    fn write_xml(&self, name: &str, writer: &mut XmlWriter) -> Result<(), WriteError> {
        writer.start(name)?;
        writer.u32_element("h", self.hour)?;
        writer.u32_element("m", self.minute)?;
        writer.opt_u32_element("s", self.second)?;
        writer.opt_u32_element("f", self.millisecond)?;
        writer.end()
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Wire {
            hour: u32,
            minute: u32,
            second: Option<u32>,
            millisecond: Option<u32>,
        }

        let wire = Wire::deserialize(deserializer)?;
        TimeOfDay::with_precision(wire.hour, wire.minute, wire.second, wire.millisecond)
            .map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for TimeOfDay {
    /// Renders `hh:mm`, extending to seconds and milliseconds when
    /// they were recorded.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.second, self.millisecond) {
            (None, None) => write!(f, "{:02}:{:02}", self.hour, self.minute),
            (Some(second), None) => {
                write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, second)
            }
            (second, Some(millisecond)) => write!(
                f,
                "{:02}:{:02}:{:02}.{:03}",
                self.hour,
                self.minute,
                second.unwrap_or(0),
                millisecond
            ),
        }
    }
}

/// Converts a weekday to its 1-based wire value, Sunday = 1 through
/// Saturday = 7.
pub fn weekday_to_wire(day: Weekday) -> u32 {
    day.num_days_from_sunday() + 1
}

/// Converts a 1-based wire value back to a weekday.
///
/// Returns `None` for anything outside 1-7.
pub fn weekday_from_wire(value: u32) -> Option<Weekday> {
    match value {
        1 => Some(Weekday::Sun),
        2 => Some(Weekday::Mon),
        3 => Some(Weekday::Tue),
        4 => Some(Weekday::Wed),
        5 => Some(Weekday::Thu),
        6 => Some(Weekday::Fri),
        7 => Some(Weekday::Sat),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_time_with_full_precision() {
        let time = TimeOfDay::with_precision(7, 30, Some(15), Some(250)).expect("valid time");
        let xml = time.to_xml().expect("complete time");
        assert_eq!(xml, "<time><h>7</h><m>30</m><s>15</s><f>250</f></time>");

        let node = XmlNode::parse_str(&xml).expect("well-formed output");
        assert_eq!(TimeOfDay::parse_xml(&node).expect("parses back"), time);
    }

    #[test]
    fn omits_precision_that_was_never_recorded() {
        let time = TimeOfDay::new(23, 5).expect("valid time");
        let xml = time.to_xml().expect("complete time");
        assert_eq!(xml, "<time><h>23</h><m>5</m></time>");

        let node = XmlNode::parse_str(&xml).expect("well-formed output");
        let parsed = TimeOfDay::parse_xml(&node).expect("parses back");
        assert_eq!(parsed.second(), None);
        assert_eq!(parsed.millisecond(), None);
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(TimeOfDay::new(24, 0).is_err());
        assert!(TimeOfDay::new(0, 60).is_err());
        assert!(TimeOfDay::with_precision(0, 0, Some(60), None).is_err());
        assert!(TimeOfDay::with_precision(0, 0, None, Some(1000)).is_err());
        assert!(TimeOfDay::with_precision(23, 59, Some(59), Some(999)).is_ok());
    }

    #[test]
    fn parse_rejects_out_of_range_hour_as_constraint_fault() {
        let node = XmlNode::parse_str("<time><h>24</h><m>0</m></time>").expect("well-formed");
        match TimeOfDay::parse_xml(&node) {
            Err(ParseError::Constraint { element, .. }) => assert_eq!(element, "h"),
            other => panic!("expected a constraint fault, got {other:?}"),
        }
    }

    #[test]
    fn displays_at_the_recorded_precision() {
        let plain = TimeOfDay::new(7, 5).expect("valid time");
        assert_eq!(plain.to_string(), "07:05");

        let seconds = TimeOfDay::with_precision(7, 5, Some(9), None).expect("valid time");
        assert_eq!(seconds.to_string(), "07:05:09");

        let full = TimeOfDay::with_precision(7, 5, Some(9), Some(42)).expect("valid time");
        assert_eq!(full.to_string(), "07:05:09.042");
    }

    #[test]
    fn serde_revalidates_on_the_way_in() {
        let time = TimeOfDay::new(7, 30).expect("valid time");
        let json = serde_json::to_string(&time).expect("serialises");
        assert_eq!(json, r#"{"hour":7,"minute":30}"#);

        let back: TimeOfDay = serde_json::from_str(&json).expect("deserialises");
        assert_eq!(back, time);
        assert!(serde_json::from_str::<TimeOfDay>(r#"{"hour":24,"minute":0}"#).is_err());
    }

    #[test]
    fn weekday_wire_values_are_one_based_from_sunday() {
        assert_eq!(weekday_to_wire(Weekday::Sun), 1);
        assert_eq!(weekday_to_wire(Weekday::Wed), 4);
        assert_eq!(weekday_to_wire(Weekday::Sat), 7);

        for wire in 1..=7 {
            let day = weekday_from_wire(wire).expect("wire value in range");
            assert_eq!(weekday_to_wire(day), wire);
        }
        assert_eq!(weekday_from_wire(0), None);
        assert_eq!(weekday_from_wire(8), None);
    }
}
