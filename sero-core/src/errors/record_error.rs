//! Malformed-record errors, raised before grouping begins.

use super::error_code::{self, SeroErrorCode};

/// Errors for records that cannot legally enter the selection pipeline.
///
/// Missing optional fields are ordinary missing data and never raise; these
/// variants cover the two fields without which a record cannot be grouped or
/// pooled at all.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Record {estimate_id} has no study identifier")]
    MissingStudyIdentifier { estimate_id: String },

    #[error("Record {estimate_id} has no denominator")]
    MissingDenominator { estimate_id: String },

    #[error("Record {estimate_id} has a non-positive denominator ({denominator})")]
    NonPositiveDenominator { estimate_id: String, denominator: f64 },
}

impl SeroErrorCode for RecordError {
    fn error_code(&self) -> &'static str {
        error_code::RECORD_ERROR
    }
}
