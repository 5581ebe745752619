//! Fail-fast record validation, run before grouping.

use sero_core::errors::RecordError;

use super::types::EstimateRecord;

/// Reject records that cannot legally enter the pipeline.
///
/// A record without a study identifier cannot be grouped; a record without a
/// positive denominator cannot anchor base-record choice or pooled
/// statistics. Every other field is ordinary missing data.
pub fn validate_records<'a, I>(records: I) -> Result<(), RecordError>
where
    I: IntoIterator<Item = &'a EstimateRecord>,
{
    for record in records {
        if record.study_identifier.trim().is_empty() {
            return Err(RecordError::MissingStudyIdentifier {
                estimate_id: record.estimate_id.clone(),
            });
        }
        match record.denominator {
            None => {
                return Err(RecordError::MissingDenominator {
                    estimate_id: record.estimate_id.clone(),
                });
            }
            Some(d) if d <= 0.0 => {
                return Err(RecordError::NonPositiveDenominator {
                    estimate_id: record.estimate_id.clone(),
                    denominator: d,
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}
