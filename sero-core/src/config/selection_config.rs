//! Selection and pooling configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the estimate selection engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SelectionConfig {
    /// Fraction of a study group's records that must carry an adjusted
    /// prevalence before dynamic mode prefers the test-unadjusted criteria
    /// list. Default: 0.5.
    pub dynamic_adjusted_threshold: Option<f64>,
    /// Process study groups on the rayon thread pool. Default: true.
    pub parallel: Option<bool>,
}

impl SelectionConfig {
    /// Returns the effective dynamic-mode threshold, defaulting to 0.5.
    pub fn effective_dynamic_adjusted_threshold(&self) -> f64 {
        self.dynamic_adjusted_threshold.unwrap_or(0.5)
    }

    /// Returns whether study groups are processed in parallel, defaulting to true.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }
}
