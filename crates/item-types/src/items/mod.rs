//! The record catalogue, one module per item type.

pub mod aerobic_profile;
pub mod alert;
pub mod allergic_episode;
pub mod assessment;
pub mod blood_oxygen_saturation;
pub mod blood_pressure;
pub mod condition;
pub mod dietary_intake;
pub mod emotion;
pub mod exercise;
pub mod family_history;
pub mod health_goal;
pub mod heart_rate;
pub mod height;
pub mod immunization;
pub mod lab_test_results;
pub mod medication;
pub mod organization;
pub mod sleep_journal;
pub mod weight;
