//! The pooling rule table: per-field aggregation strategies as data.
//!
//! Each rule pairs an aggregation kind with a typed field handle. The table
//! drives the pooling engine; adding a field means adding a row here, not a
//! branch there. A rule whose field is missing on every subset member leaves
//! the base record's value untouched, so the engine runs unchanged against
//! partial projections of the full field set.

use std::collections::BTreeSet;

use crate::model::fields::{BoolField, DateField, NumericField, SetField, TextField};
use crate::model::types::EstimateRecord;

/// One per-field aggregation strategy.
#[derive(Debug, Clone, Copy)]
pub enum Aggregation {
    /// Arithmetic sum over non-missing values.
    Sum(NumericField),
    /// De-duplicated, order-insensitive union across all records.
    Union(SetField),
    /// Union of reported isotypes across all records.
    UnionIsotypes,
    /// Earliest non-missing date.
    Min(DateField),
    /// Latest non-missing date.
    Max(DateField),
    /// Arithmetic mean over non-missing values.
    Mean(NumericField),
    /// Logical AND with missing values treated as true.
    AllTrue(BoolField),
    /// The shared value if all non-missing values agree, else `default`.
    UniqueOrDefault { field: TextField, default: &'static str },
    /// The shared set if all non-empty sets agree, else `{default}`.
    UniqueSetOrDefault { field: SetField, default: &'static str },
    /// De-duplicated non-missing values joined with `separator`.
    Concat { field: TextField, separator: &'static str },
    /// Value taken from the base record, no recomputation.
    IdentityFromBase { field: &'static str },
    /// Σ(value·denominator) / Σ(denominator); missing when no record carries
    /// both the value and a denominator.
    WeightedAverage(NumericField),
}

impl Aggregation {
    /// The record field this rule writes.
    pub fn field_name(&self) -> &'static str {
        match *self {
            Aggregation::Sum(field)
            | Aggregation::Mean(field)
            | Aggregation::WeightedAverage(field) => field.name(),
            Aggregation::Union(field) | Aggregation::UniqueSetOrDefault { field, .. } => {
                field.name()
            }
            Aggregation::UnionIsotypes => "isotypes_reported",
            Aggregation::Min(field) | Aggregation::Max(field) => field.name(),
            Aggregation::AllTrue(field) => field.name(),
            Aggregation::UniqueOrDefault { field, .. } | Aggregation::Concat { field, .. } => {
                field.name()
            }
            Aggregation::IdentityFromBase { field } => field,
        }
    }
}

/// The full catalog applied by the pooling engine.
pub const POOLING_RULES: &[Aggregation] = &[
    Aggregation::Sum(NumericField::Denominator),
    Aggregation::Union(SetField::States),
    Aggregation::Union(SetField::Cities),
    Aggregation::Union(SetField::AntibodyTargets),
    Aggregation::UnionIsotypes,
    Aggregation::Min(DateField::SamplingStartDate),
    Aggregation::Max(DateField::SamplingEndDate),
    Aggregation::Mean(NumericField::Sensitivity),
    Aggregation::Mean(NumericField::Specificity),
    Aggregation::AllTrue(BoolField::Included),
    Aggregation::AllTrue(BoolField::IsPopulationAdjusted),
    Aggregation::AllTrue(BoolField::IsTestAdjusted),
    Aggregation::UniqueOrDefault { field: TextField::AgeBand, default: "Multiple groups" },
    Aggregation::UniqueOrDefault { field: TextField::Sex, default: "All" },
    Aggregation::UniqueOrDefault { field: TextField::SpecimenType, default: "Multiple Types" },
    Aggregation::UniqueOrDefault { field: TextField::TestType, default: "Multiple Types" },
    Aggregation::UniqueSetOrDefault {
        field: SetField::PopulationGroups,
        default: "Multiple populations",
    },
    Aggregation::Concat { field: TextField::TestName, separator: "; " },
    Aggregation::Concat { field: TextField::SourceName, separator: "; " },
    Aggregation::IdentityFromBase { field: "estimate_grade" },
    Aggregation::IdentityFromBase { field: "overall_risk_of_bias" },
    Aggregation::IdentityFromBase { field: "publication_date" },
    Aggregation::WeightedAverage(NumericField::Prevalence),
    Aggregation::WeightedAverage(NumericField::AdjustedPrevalence),
];

impl Aggregation {
    /// Apply this rule to `merged`, reading the surviving `subset`.
    ///
    /// `merged` starts as a clone of the base record, so leaving a field
    /// untouched means keeping the base value.
    pub fn apply(&self, merged: &mut EstimateRecord, subset: &[&EstimateRecord]) {
        match *self {
            Aggregation::Sum(field) => {
                let values: Vec<f64> = subset.iter().filter_map(|r| field.get(r)).collect();
                if !values.is_empty() {
                    field.set(merged, Some(values.iter().sum()));
                }
            }
            Aggregation::Union(field) => {
                let union: BTreeSet<String> = subset
                    .iter()
                    .flat_map(|r| field.get(r).iter().cloned())
                    .collect();
                if !union.is_empty() {
                    field.set(merged, union);
                }
            }
            Aggregation::UnionIsotypes => {
                merged.isotypes_reported = subset
                    .iter()
                    .flat_map(|r| r.isotypes_reported.iter().copied())
                    .collect();
            }
            Aggregation::Min(field) => {
                if let Some(min) = subset.iter().filter_map(|r| field.get(r)).min() {
                    field.set(merged, Some(min));
                }
            }
            Aggregation::Max(field) => {
                if let Some(max) = subset.iter().filter_map(|r| field.get(r)).max() {
                    field.set(merged, Some(max));
                }
            }
            Aggregation::Mean(field) => {
                let values: Vec<f64> = subset.iter().filter_map(|r| field.get(r)).collect();
                if !values.is_empty() {
                    field.set(merged, Some(values.iter().sum::<f64>() / values.len() as f64));
                }
            }
            Aggregation::AllTrue(field) => {
                if subset.iter().any(|r| field.get(r).is_some()) {
                    let all = subset.iter().all(|r| field.get(r).unwrap_or(true));
                    field.set(merged, Some(all));
                }
            }
            Aggregation::UniqueOrDefault { field, default } => {
                let mut values = subset.iter().filter_map(|r| field.get(r));
                if let Some(first) = values.next() {
                    let value = if values.all(|v| v == first) {
                        first.to_string()
                    } else {
                        default.to_string()
                    };
                    field.set(merged, Some(value));
                }
            }
            Aggregation::UniqueSetOrDefault { field, default } => {
                let mut sets = subset.iter().map(|r| field.get(r)).filter(|s| !s.is_empty());
                if let Some(first) = sets.next() {
                    let value = if sets.all(|s| s == first) {
                        first.clone()
                    } else {
                        BTreeSet::from([default.to_string()])
                    };
                    field.set(merged, value);
                }
            }
            Aggregation::Concat { field, separator } => {
                let mut seen: Vec<&str> = Vec::new();
                for record in subset {
                    if let Some(value) = field.get(record) {
                        if !seen.contains(&value) {
                            seen.push(value);
                        }
                    }
                }
                if !seen.is_empty() {
                    field.set(merged, Some(seen.join(separator)));
                }
            }
            Aggregation::IdentityFromBase { .. } => {
                // merged is a clone of the base record already.
            }
            Aggregation::WeightedAverage(field) => {
                let mut weighted_sum = 0.0;
                let mut weight = 0.0;
                for record in subset {
                    if let (Some(value), Some(denominator)) = (field.get(record), record.denominator)
                    {
                        weighted_sum += value * denominator;
                        weight += denominator;
                    }
                }
                if weight > 0.0 {
                    field.set(merged, Some(weighted_sum / weight));
                } else {
                    field.set(merged, None);
                }
            }
        }
    }
}
