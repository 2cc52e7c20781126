//! Typed health-record item types.
//!
//! Each record in this crate models one kind of health observation (a
//! weight reading, a sleep journal entry, a lab panel) as a plain Rust
//! struct that parses from an XML fragment and serialises back to one.
//!
//! Responsibilities:
//! - A catalogue of item-type records, each implementing
//!   [`healthbook_xml::XmlItem`] with its canonical element name.
//! - Shared building blocks (coded values, contact details,
//!   measurements, times of day) reused across records.
//! - Human-readable summaries driven by a swappable string table.
//!
//! Records keep mandatory fields as `Option` so a record can be built
//! up gradually; absence is only a fault at serialisation time. Range
//! and blank-ness constraints are enforced the moment a value enters a
//! record, never later.

pub mod common;
pub mod display;
pub mod items;

// Re-export the shared building blocks.
pub use common::codable::{CodableValue, CodedValue};
pub use common::contact::{Address, ContactInfo, EmailAddress, PhoneNumber};
pub use common::measurement::{GeneralMeasurement, StructuredMeasurement};
pub use common::temporal::{weekday_from_wire, weekday_to_wire, TimeOfDay};
pub use display::{display_strings, set_display_strings, DisplayStrings};

// Re-export the record catalogue flat, one name per item type.
pub use items::aerobic_profile::{AerobicProfile, HeartRateZone, HeartRateZoneGroup};
pub use items::alert::Alert;
pub use items::allergic_episode::AllergicEpisode;
pub use items::assessment::{Assessment, AssessmentField};
pub use items::blood_oxygen_saturation::BloodOxygenSaturation;
pub use items::blood_pressure::BloodPressure;
pub use items::condition::{Condition, ConditionStatus};
pub use items::dietary_intake::DietaryIntakeDaily;
pub use items::emotion::{EmotionalState, RelativeRating};
pub use items::exercise::{Exercise, ExerciseDetail};
pub use items::family_history::{FamilyHistory, FamilyHistoryCondition, FamilyHistoryRelative};
pub use items::health_goal::HealthGoal;
pub use items::heart_rate::HeartRate;
pub use items::height::Height;
pub use items::immunization::Immunization;
pub use items::lab_test_results::{
    LabStatus, LabTestResultDetails, LabTestResultGroup, LabTestResultValue, LabTestResults,
    TestResultRange,
};
pub use items::medication::Medication;
pub use items::organization::Organization;
pub use items::sleep_journal::{Occurrence, SleepJournalAm, WakeState};
pub use items::weight::Weight;

use healthbook_types::ValidationError;
use healthbook_xml::{ParseError, WriteError};

/// Errors returned when building, validating or serialising a record.
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    /// A record could not be built from its XML fragment.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A value violated one of the record's field constraints.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// A record could not be serialised to XML.
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Result alias for operations that can fail with an [`ItemError`].
pub type ItemResult<T> = Result<T, ItemError>;

#[cfg(test)]
mod tests {
    use super::*;
    use healthbook_types::PositiveMeasurement;
    use healthbook_xml::XmlItem;

    /// Parse, edit and re-serialise in one fallible flow, the way a
    /// host application would.
    fn reweigh(xml: &str, kilograms: f64) -> ItemResult<String> {
        let mut weight = Weight::from_xml_str(xml)?;
        weight.value = Some(PositiveMeasurement::new(kilograms)?);
        Ok(weight.to_xml()?)
    }

    #[test]
    fn item_error_wraps_all_three_fault_kinds() {
        let xml = "<weight><when>2024-01-01T08:00:00</when><value>72.5</value></weight>";

        let updated = reweigh(xml, 71.0).expect("valid edit should succeed");
        assert!(updated.contains("<value>71</value>"));

        match reweigh("<weight></weight>", 71.0).expect_err("missing when") {
            ItemError::Parse(_) => {}
            other => panic!("expected a parse fault, got {other:?}"),
        }

        match reweigh(xml, -4.0).expect_err("negative weight") {
            ItemError::Invalid(_) => {}
            other => panic!("expected a validation fault, got {other:?}"),
        }

        let blank = Weight::default();
        match blank.to_xml().expect_err("unset mandatory fields") {
            WriteError::UnsetField { record, .. } => assert_eq!(record, "weight"),
            other => panic!("expected an unset-field fault, got {other:?}"),
        }
    }
}
