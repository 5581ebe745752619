//! Stable error codes for machine-readable error reporting.

/// Malformed input record.
pub const RECORD_ERROR: &str = "SERO_RECORD";
/// Invalid proportion passed to an interval computation.
pub const STATS_ERROR: &str = "SERO_STATS";
/// Configuration load or validation failure.
pub const CONFIG_ERROR: &str = "SERO_CONFIG";

/// Every subsystem error exposes a stable code, independent of the
/// human-readable `Display` text.
pub trait SeroErrorCode {
    fn error_code(&self) -> &'static str;
}
