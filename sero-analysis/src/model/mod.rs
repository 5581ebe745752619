//! Estimate record data model.

pub mod fields;
pub mod types;
pub mod validate;

pub use types::{EstimateGrade, EstimateRecord, Isotype, IsotypeOperator};
pub use validate::validate_records;
