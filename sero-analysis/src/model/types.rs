//! Core record and enum types for the selection engine.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Geographic scope of an estimate, broadest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateGrade {
    National,
    Regional,
    Local,
    Sublocal,
}

/// Antibody isotype reported by an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Isotype {
    #[serde(rename = "IgG")]
    IgG,
    #[serde(rename = "IgM")]
    IgM,
    #[serde(rename = "IgA")]
    IgA,
    #[serde(rename = "Total Antibody")]
    TotalAntibody,
}

/// How multiple reported isotypes combine into one positivity definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IsotypeOperator {
    And,
    Or,
}

/// One seroprevalence estimate extracted from a published study.
///
/// Records are immutable inputs to the engine; pooling builds a new record
/// from a clone of the base record rather than mutating any input. All
/// optional fields model ordinary missing data; only `study_identifier` and
/// `denominator` are required (see `validate`). Unknown upstream columns are
/// carried through untouched in `extra` so the engine can run against partial
/// projections of the full field set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateRecord {
    /// Unique record identifier, used for de-duplication against pooled output.
    pub estimate_id: String,
    /// Grouping key: all records sharing this value form one study group.
    pub study_identifier: String,
    pub estimate_name: Option<String>,

    /// Sample size. Required and positive.
    pub denominator: Option<f64>,
    /// Seropositive count. Recomputed from prevalence when pooling.
    pub numerator: Option<f64>,
    /// Seroprevalence as a proportion in [0, 1].
    pub prevalence: Option<f64>,
    /// Test-performance-adjusted prevalence, when upstream adjustment ran.
    pub adjusted_prevalence: Option<f64>,
    pub sensitivity: Option<f64>,
    pub specificity: Option<f64>,
    pub ci_lower: Option<f64>,
    pub ci_upper: Option<f64>,
    pub adjusted_ci_lower: Option<f64>,
    pub adjusted_ci_upper: Option<f64>,

    pub dashboard_primary_estimate: Option<bool>,
    pub academic_primary_estimate: Option<bool>,
    pub is_population_adjusted: Option<bool>,
    pub is_test_adjusted: Option<bool>,
    pub included: Option<bool>,

    /// "All" marks the sex aggregate; missing reads as unstratified.
    pub sex: Option<String>,
    /// "All" marks the all-ages aggregate; missing reads as unstratified.
    pub age_band: Option<String>,
    pub estimate_grade: Option<EstimateGrade>,
    pub test_type: Option<String>,
    pub test_name: Option<String>,
    pub specimen_type: Option<String>,
    pub overall_risk_of_bias: Option<String>,
    pub source_name: Option<String>,
    pub isotype_combination_operator: Option<IsotypeOperator>,

    pub isotypes_reported: BTreeSet<Isotype>,
    pub states: BTreeSet<String>,
    pub cities: BTreeSet<String>,
    pub population_groups: BTreeSet<String>,
    pub antibody_targets: BTreeSet<String>,

    pub sampling_start_date: Option<NaiveDate>,
    pub sampling_end_date: Option<NaiveDate>,
    pub publication_date: Option<NaiveDate>,

    /// Upstream columns the engine does not interpret, passed through as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EstimateRecord {
    /// Population-adjustment flag; missing reads as not adjusted.
    pub fn population_adjusted(&self) -> bool {
        self.is_population_adjusted.unwrap_or(false)
    }

    /// Test-adjustment flag; missing reads as not adjusted.
    pub fn test_adjusted(&self) -> bool {
        self.is_test_adjusted.unwrap_or(false)
    }
}
