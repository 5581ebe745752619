//! The pooling engine: collapse a surviving subset into one synthetic record.

use sero_core::errors::StatsError;

use super::jeffreys::jeffreys_interval;
use super::rules::POOLING_RULES;
use crate::model::types::EstimateRecord;

/// Two-sided coverage for recomputed confidence intervals.
const CI_LEVEL: f64 = 0.95;

/// Merge `subset` into a single record.
///
/// A one-record subset is returned unchanged, field for field. Otherwise the
/// member with the largest denominator becomes the base (ties keep the first
/// occurrence), every pooling rule rewrites its field on a clone of the base,
/// and the derived statistics (numerator, confidence intervals, the pooled
/// name suffix) are recomputed from the merged values.
pub fn pool(subset: &[&EstimateRecord]) -> Result<EstimateRecord, StatsError> {
    debug_assert!(!subset.is_empty(), "study groups are never empty");
    if subset.len() == 1 {
        return Ok(subset[0].clone());
    }

    let mut base = subset[0];
    for record in &subset[1..] {
        if record.denominator.unwrap_or(0.0) > base.denominator.unwrap_or(0.0) {
            base = record;
        }
    }

    let mut merged = base.clone();
    for rule in POOLING_RULES {
        rule.apply(&mut merged, subset);
        tracing::trace!(field = rule.field_name(), "applied pooling rule");
    }

    recompute_derived(&mut merged)?;
    Ok(merged)
}

/// Recompute numerator, name suffix, and confidence intervals on the merged
/// record.
fn recompute_derived(merged: &mut EstimateRecord) -> Result<(), StatsError> {
    if let Some(name) = merged.estimate_name.take() {
        merged.estimate_name = Some(format!("{name}_pooled"));
    }

    let denominator = match merged.denominator {
        Some(d) => d,
        None => return Ok(()),
    };

    match merged.prevalence {
        Some(prevalence) => {
            let numerator = (prevalence * denominator).round();
            merged.numerator = Some(numerator);
            let (low, high) = jeffreys_interval(numerator, denominator, CI_LEVEL)?;
            merged.ci_lower = Some(low);
            merged.ci_upper = Some(high);
        }
        None => {
            merged.numerator = None;
            merged.ci_lower = None;
            merged.ci_upper = None;
        }
    }

    match merged.adjusted_prevalence {
        Some(adjusted) => {
            let adjusted_numerator = (adjusted * denominator).round();
            let (low, high) = jeffreys_interval(adjusted_numerator, denominator, CI_LEVEL)?;
            merged.adjusted_ci_lower = Some(low);
            merged.adjusted_ci_upper = Some(high);
        }
        None => {
            merged.adjusted_ci_lower = None;
            merged.adjusted_ci_upper = None;
        }
    }

    Ok(())
}
