//! The criterion library: named, ordered preference predicates as data.
//!
//! A criterion is an ordered list of levels, most preferred first; a level is
//! a pure predicate over a single record. The two mode lists below are
//! authored explicitly rather than derived from a shared dictionary, so
//! reordering or adding a criterion never touches the cascade algorithm.

use crate::model::types::{EstimateGrade, EstimateRecord, Isotype, IsotypeOperator};

/// A single preference predicate. Pure: reads one record, inspects no others.
pub type Level = fn(&EstimateRecord) -> bool;

/// A named, ordered list of preference levels, most preferred first.
pub struct Criterion {
    pub name: &'static str,
    pub levels: &'static [Level],
}

/// An ordered list of criteria, applied first to last by the cascade.
pub struct CriteriaList {
    pub name: &'static str,
    pub criteria: &'static [Criterion],
}

// -- primary-estimate flags --

fn dashboard_primary(r: &EstimateRecord) -> bool {
    r.dashboard_primary_estimate.unwrap_or(false)
}

fn academic_primary(r: &EstimateRecord) -> bool {
    r.academic_primary_estimate.unwrap_or(false)
}

// -- adjustment combinations (missing flags read as not adjusted) --

fn pop_and_test_adjusted(r: &EstimateRecord) -> bool {
    r.population_adjusted() && r.test_adjusted()
}

fn test_adjusted_only(r: &EstimateRecord) -> bool {
    !r.population_adjusted() && r.test_adjusted()
}

fn pop_adjusted_only(r: &EstimateRecord) -> bool {
    r.population_adjusted() && !r.test_adjusted()
}

fn unadjusted(r: &EstimateRecord) -> bool {
    !r.population_adjusted() && !r.test_adjusted()
}

// -- estimate grade --

fn grade_national(r: &EstimateRecord) -> bool {
    r.estimate_grade == Some(EstimateGrade::National)
}

fn grade_regional(r: &EstimateRecord) -> bool {
    r.estimate_grade == Some(EstimateGrade::Regional)
}

fn grade_local(r: &EstimateRecord) -> bool {
    r.estimate_grade == Some(EstimateGrade::Local)
}

fn grade_sublocal(r: &EstimateRecord) -> bool {
    r.estimate_grade == Some(EstimateGrade::Sublocal)
}

// -- demographic aggregates (missing reads as unstratified) --

fn age_aggregate(r: &EstimateRecord) -> bool {
    r.age_band.as_deref().map_or(true, |a| a == "All")
}

fn sex_aggregate(r: &EstimateRecord) -> bool {
    r.sex.as_deref().map_or(true, |s| s == "All")
}

// -- isotype preference --

fn isotype_total_antibody(r: &EstimateRecord) -> bool {
    r.isotypes_reported.contains(&Isotype::TotalAntibody)
}

fn isotype_combined(r: &EstimateRecord, anchor: Isotype, op: IsotypeOperator) -> bool {
    r.isotypes_reported.contains(&anchor)
        && r.isotypes_reported.len() > 1
        && r.isotype_combination_operator == Some(op)
}

fn isotype_igg_or_others(r: &EstimateRecord) -> bool {
    isotype_combined(r, Isotype::IgG, IsotypeOperator::Or)
}

fn isotype_igg_and_others(r: &EstimateRecord) -> bool {
    isotype_combined(r, Isotype::IgG, IsotypeOperator::And)
}

fn isotype_igg_alone(r: &EstimateRecord) -> bool {
    r.isotypes_reported.len() == 1 && r.isotypes_reported.contains(&Isotype::IgG)
}

fn isotype_igm_or_others(r: &EstimateRecord) -> bool {
    isotype_combined(r, Isotype::IgM, IsotypeOperator::Or)
}

fn isotype_igm_and_others(r: &EstimateRecord) -> bool {
    isotype_combined(r, Isotype::IgM, IsotypeOperator::And)
}

fn isotype_igm_alone(r: &EstimateRecord) -> bool {
    r.isotypes_reported.len() == 1 && r.isotypes_reported.contains(&Isotype::IgM)
}

// -- test and specimen type --

fn test_neutralization(r: &EstimateRecord) -> bool {
    r.test_type.as_deref().is_some_and(|t| t.contains("Neutralization"))
}

fn test_clia(r: &EstimateRecord) -> bool {
    r.test_type.as_deref().is_some_and(|t| t.contains("CLIA"))
}

fn test_elisa(r: &EstimateRecord) -> bool {
    r.test_type.as_deref().is_some_and(|t| t.contains("ELISA"))
}

fn specimen_not_dried_blood(r: &EstimateRecord) -> bool {
    r.specimen_type.as_deref().map_or(true, |s| s != "Dried Blood")
}

// -- shared criterion tails --

const GRADE_LEVELS: &[Level] = &[grade_national, grade_regional, grade_local, grade_sublocal];

const ISOTYPE_LEVELS: &[Level] = &[
    isotype_total_antibody,
    isotype_igg_or_others,
    isotype_igg_and_others,
    isotype_igg_alone,
    isotype_igm_or_others,
    isotype_igm_and_others,
    isotype_igm_alone,
];

const TEST_TYPE_LEVELS: &[Level] = &[test_neutralization, test_clia, test_elisa];

/// Criteria for dashboard-facing canonical estimates: prefer records whose
/// prevalence already folds in test performance.
pub static TEST_ADJUSTED_PREFERRING: CriteriaList = CriteriaList {
    name: "test_adjusted_preferring",
    criteria: &[
        Criterion { name: "primary_estimate", levels: &[dashboard_primary] },
        Criterion {
            name: "adjustment_level",
            levels: &[pop_and_test_adjusted, test_adjusted_only, pop_adjusted_only, unadjusted],
        },
        Criterion { name: "estimate_grade", levels: GRADE_LEVELS },
        Criterion { name: "age_band", levels: &[age_aggregate] },
        Criterion { name: "sex", levels: &[sex_aggregate] },
        Criterion { name: "isotype", levels: ISOTYPE_LEVELS },
        Criterion { name: "test_type", levels: TEST_TYPE_LEVELS },
        Criterion { name: "specimen_type", levels: &[specimen_not_dried_blood] },
    ],
};

/// Criteria for analysis use: prefer test-unadjusted records so downstream
/// adjustment can run from raw values.
pub static TEST_UNADJUSTED_PREFERRING: CriteriaList = CriteriaList {
    name: "test_unadjusted_preferring",
    criteria: &[
        Criterion { name: "primary_estimate", levels: &[academic_primary] },
        Criterion {
            name: "adjustment_level",
            levels: &[pop_adjusted_only, unadjusted, pop_and_test_adjusted, test_adjusted_only],
        },
        Criterion { name: "estimate_grade", levels: GRADE_LEVELS },
        Criterion { name: "age_band", levels: &[age_aggregate] },
        Criterion { name: "sex", levels: &[sex_aggregate] },
        Criterion { name: "isotype", levels: ISOTYPE_LEVELS },
        Criterion { name: "test_type", levels: TEST_TYPE_LEVELS },
        Criterion { name: "specimen_type", levels: &[specimen_not_dried_blood] },
    ],
};
