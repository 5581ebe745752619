//! Shared foundation for the seropool workspace.
//!
//! Holds everything the analysis crate needs but that is not itself
//! selection or pooling logic: error enums, configuration, and the
//! hash-collection aliases used across the workspace.

pub mod config;
pub mod errors;
pub mod types;

pub use config::{SelectionConfig, SeroConfig};
pub use errors::{ConfigError, RecordError, SelectionError, SeroErrorCode, StatsError};
