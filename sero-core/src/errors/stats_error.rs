//! Statistics errors.

use super::error_code::{self, SeroErrorCode};

/// Errors from derived-statistic computation during pooling.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// The (numerator, denominator) pair does not describe a proportion:
    /// denominator ≤ 0 or numerator outside `[0, denominator]`. Indicates a
    /// malformed upstream record, so it is surfaced rather than recovered.
    #[error("Invalid proportion: numerator {numerator} over denominator {denominator}")]
    InvalidProportion { numerator: f64, denominator: f64 },
}

impl SeroErrorCode for StatsError {
    fn error_code(&self) -> &'static str {
        error_code::STATS_ERROR
    }
}
