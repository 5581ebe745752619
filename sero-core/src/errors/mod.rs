//! Error handling for seropool.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod record_error;
pub mod selection_error;
pub mod stats_error;

pub use config_error::ConfigError;
pub use error_code::SeroErrorCode;
pub use record_error::RecordError;
pub use selection_error::SelectionError;
pub use stats_error::StatsError;
