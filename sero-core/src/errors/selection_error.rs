//! Top-level pipeline error, aggregating subsystem errors via `From`.

use super::error_code::SeroErrorCode;
use super::{ConfigError, RecordError, StatsError};

/// Errors that can occur during a selection pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SeroErrorCode for SelectionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Record(e) => e.error_code(),
            Self::Stats(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
