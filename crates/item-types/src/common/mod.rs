//! Building blocks shared across item-type records.

pub mod codable;
pub mod contact;
pub mod measurement;
pub mod temporal;
