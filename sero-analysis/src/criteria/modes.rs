//! Mode resolution: one concrete criteria list per study group.
//!
//! Resolving the mode up front keeps the cascade itself mode-agnostic; the
//! dynamic variant is the only data-dependent control flow in the engine.

use serde::{Deserialize, Serialize};

use sero_core::config::SelectionConfig;

use super::library::{CriteriaList, TEST_ADJUSTED_PREFERRING, TEST_UNADJUSTED_PREFERRING};
use crate::model::types::EstimateRecord;

/// Which criteria ordering governs selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrioritizationMode {
    /// Prefer test-adjusted records (dashboard canonical estimates).
    Dashboard,
    /// Prefer test-unadjusted records (analysis input).
    AnalysisStatic,
    /// Decide per study group from how many records carry an adjusted
    /// prevalence.
    AnalysisDynamic,
}

/// Resolve the criteria list for one study group.
///
/// Dynamic mode: when at least `dynamic_adjusted_threshold` of the group's
/// records have a non-missing adjusted prevalence, enough test information is
/// available to prefer unadjusted records and let downstream adjustment run;
/// otherwise fall back to preferring already-adjusted records.
pub fn resolve(
    mode: PrioritizationMode,
    group: &[&EstimateRecord],
    config: &SelectionConfig,
) -> &'static CriteriaList {
    match mode {
        PrioritizationMode::Dashboard => &TEST_ADJUSTED_PREFERRING,
        PrioritizationMode::AnalysisStatic => &TEST_UNADJUSTED_PREFERRING,
        PrioritizationMode::AnalysisDynamic => {
            let with_adjusted = group
                .iter()
                .filter(|r| r.adjusted_prevalence.is_some())
                .count();
            let fraction = with_adjusted as f64 / group.len().max(1) as f64;
            if fraction >= config.effective_dynamic_adjusted_threshold() {
                &TEST_UNADJUSTED_PREFERRING
            } else {
                &TEST_ADJUSTED_PREFERRING
            }
        }
    }
}
