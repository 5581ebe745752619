//! Group orchestrator: partition by study, select, pool, reassemble.

use rayon::prelude::*;

use sero_core::config::SelectionConfig;
use sero_core::errors::SelectionError;
use sero_core::types::collections::{FxHashMap, FxHashSet};

use crate::criteria::{self, PrioritizationMode};
use crate::model::types::EstimateRecord;
use crate::model::validate::validate_records;
use crate::pooling;

/// A caller-supplied record predicate; all filters are ANDed together.
pub type RecordFilter = Box<dyn Fn(&EstimateRecord) -> bool + Send + Sync>;

/// The estimate selection pipeline.
///
/// Pure batch transform: validates, filters, partitions by study identifier,
/// narrows each partition through the mode's criteria cascade, and pools the
/// survivors into one record per study (or keeps the narrowed subset when
/// pooling is off). Inputs are never mutated, and partitions are independent,
/// so groups are processed on the rayon pool when configured.
pub struct SelectionPipeline {
    mode: PrioritizationMode,
    pool: bool,
    config: SelectionConfig,
}

impl SelectionPipeline {
    /// Create a pipeline with the given mode, pooling flag, and configuration.
    pub fn new(mode: PrioritizationMode, pool: bool, config: SelectionConfig) -> Self {
        Self { mode, pool, config }
    }

    /// Create a pooling pipeline with default configuration.
    pub fn with_defaults(mode: PrioritizationMode) -> Self {
        Self::new(mode, true, SelectionConfig::default())
    }

    /// Run selection over `records`.
    ///
    /// Returns one record per study group when pooling, else each group's
    /// narrowed subset. An empty (or fully filtered-out) input yields an
    /// empty output, not an error.
    pub fn run(
        &self,
        records: &[EstimateRecord],
        filters: &[RecordFilter],
    ) -> Result<Vec<EstimateRecord>, SelectionError> {
        let filtered = self.apply_filters(records, filters);
        if filtered.is_empty() {
            return Ok(Vec::new());
        }
        validate_records(filtered.iter().copied())?;

        let partitions = partition_by_study(&filtered);
        let group_count = partitions.len();

        let results: Result<Vec<Vec<EstimateRecord>>, SelectionError> =
            if self.config.effective_parallel() {
                partitions.par_iter().map(|group| self.process_group(group)).collect()
            } else {
                partitions.iter().map(|group| self.process_group(group)).collect()
            };

        let output: Vec<EstimateRecord> = results?.into_iter().flatten().collect();
        tracing::info!(
            groups = group_count,
            input_records = filtered.len(),
            output_records = output.len(),
            pooled = self.pool,
            "selection pipeline complete"
        );
        Ok(output)
    }

    /// Run selection, then union in the un-pooled records belonging to a
    /// named population subgroup.
    ///
    /// Callers that need both the canonical per-study estimate and a specific
    /// subgroup breakdown get the pooled output plus every filtered record
    /// whose `population_groups` contain `subgroup`, de-duplicated against
    /// the pooled result by `estimate_id`.
    pub fn run_with_subgroup(
        &self,
        records: &[EstimateRecord],
        filters: &[RecordFilter],
        subgroup: &str,
    ) -> Result<Vec<EstimateRecord>, SelectionError> {
        let mut output = self.run(records, filters)?;
        let mut seen: FxHashSet<String> =
            output.iter().map(|r| r.estimate_id.clone()).collect();

        for record in self.apply_filters(records, filters) {
            if record.population_groups.iter().any(|g| g == subgroup)
                && seen.insert(record.estimate_id.clone())
            {
                output.push(record.clone());
            }
        }
        Ok(output)
    }

    fn apply_filters<'a>(
        &self,
        records: &'a [EstimateRecord],
        filters: &[RecordFilter],
    ) -> Vec<&'a EstimateRecord> {
        records
            .iter()
            .filter(|r| filters.iter().all(|f| f(r)))
            .collect()
    }

    /// Resolve criteria, cascade, and optionally pool one study group.
    fn process_group(
        &self,
        group: &[&EstimateRecord],
    ) -> Result<Vec<EstimateRecord>, SelectionError> {
        let list = criteria::resolve(self.mode, group, &self.config);
        let survivors = criteria::select(group, list);
        if self.pool {
            Ok(vec![pooling::pool(&survivors)?])
        } else {
            Ok(survivors.into_iter().cloned().collect())
        }
    }
}

/// Partition records by study identifier, preserving first-seen group order
/// and input order within each group.
fn partition_by_study<'a>(records: &[&'a EstimateRecord]) -> Vec<Vec<&'a EstimateRecord>> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: FxHashMap<&str, Vec<&EstimateRecord>> = FxHashMap::default();
    for record in records {
        let key = record.study_identifier.as_str();
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(record);
    }
    order
        .iter()
        .map(|key| groups.remove(key).unwrap_or_default())
        .collect()
}
