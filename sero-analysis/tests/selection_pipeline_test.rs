//! End-to-end tests for the selection pipeline.

use std::collections::BTreeSet;

use sero_analysis::pipeline::{RecordFilter, SelectionPipeline};
use sero_analysis::{EstimateGrade, EstimateRecord, Isotype, IsotypeOperator, PrioritizationMode};
use sero_core::config::SelectionConfig;

/// Install a subscriber once so `RUST_LOG=sero_analysis=debug` shows the
/// cascade decisions while debugging a failing test.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn make_record(estimate_id: &str, study: &str, denominator: f64, prevalence: f64) -> EstimateRecord {
    EstimateRecord {
        estimate_id: estimate_id.to_string(),
        study_identifier: study.to_string(),
        estimate_name: Some(format!("{study} {estimate_id}")),
        denominator: Some(denominator),
        prevalence: Some(prevalence),
        ..Default::default()
    }
}

#[test]
fn primary_estimate_wins_its_study() {
    init_tracing();
    let mut records: Vec<EstimateRecord> = (0..5)
        .map(|i| make_record(&format!("e{i}"), "Study 1", 100.0 + i as f64, 0.1))
        .collect();
    records[2].dashboard_primary_estimate = Some(true);
    // A competitor that would win every later criterion.
    records[4].estimate_grade = Some(EstimateGrade::National);
    records[4].is_population_adjusted = Some(true);
    records[4].is_test_adjusted = Some(true);

    let pipeline = SelectionPipeline::with_defaults(PrioritizationMode::Dashboard);
    let output = pipeline.run(&records, &[]).unwrap();
    assert_eq!(output.len(), 1);
    assert_eq!(output[0].estimate_id, "e2");
    // Selected outright, not pooled: name untouched.
    assert_eq!(output[0].estimate_name.as_deref(), Some("Study 1 e2"));
}

#[test]
fn analysis_mode_prefers_population_adjusted_unadjusted_test() {
    let flag_combos = [
        (Some(true), None),
        (None, None),
        (Some(true), Some(true)),
        (None, Some(true)),
    ];
    let records: Vec<EstimateRecord> = flag_combos
        .iter()
        .enumerate()
        .map(|(i, (pop, test))| EstimateRecord {
            is_population_adjusted: *pop,
            is_test_adjusted: *test,
            ..make_record(&format!("e{i}"), "Study 1", 100.0, 0.1)
        })
        .collect();

    let pipeline = SelectionPipeline::with_defaults(PrioritizationMode::AnalysisStatic);
    let output = pipeline.run(&records, &[]).unwrap();
    assert_eq!(output.len(), 1);
    assert_eq!(output[0].estimate_id, "e0");
}

#[test]
fn tied_records_pool_into_weighted_synthesis() {
    let a = make_record("a", "Study 2", 100.0, 0.1);
    let b = make_record("b", "Study 2", 200.0, 0.4);

    let pipeline = SelectionPipeline::with_defaults(PrioritizationMode::Dashboard);
    let output = pipeline.run(&[a, b], &[]).unwrap();
    assert_eq!(output.len(), 1);

    let pooled = &output[0];
    assert_eq!(pooled.denominator, Some(300.0));
    let prevalence = pooled.prevalence.unwrap();
    assert!((prevalence - 0.3).abs() < 1e-12);
    assert_eq!(pooled.numerator, Some(90.0));
    assert!(pooled.estimate_name.as_deref().unwrap().ends_with("_pooled"));
    let (low, high) = (pooled.ci_lower.unwrap(), pooled.ci_upper.unwrap());
    assert!(0.0 < low && low < prevalence && prevalence < high && high < 1.0);
}

#[test]
fn combined_isotype_report_preferred_over_igg_alone() {
    let mut alone = make_record("alone", "Study 3", 150.0, 0.2);
    alone.isotypes_reported = BTreeSet::from([Isotype::IgG]);
    let mut combined = make_record("combined", "Study 3", 150.0, 0.2);
    combined.isotypes_reported = BTreeSet::from([Isotype::IgG, Isotype::IgM]);
    combined.isotype_combination_operator = Some(IsotypeOperator::Or);

    let pipeline = SelectionPipeline::with_defaults(PrioritizationMode::Dashboard);
    let output = pipeline.run(&[alone, combined], &[]).unwrap();
    assert_eq!(output.len(), 1);
    assert_eq!(output[0].estimate_id, "combined");
}

#[test]
fn one_output_record_per_study() {
    let mut records = Vec::new();
    for study in ["Study 1", "Study 2", "Study 3"] {
        for i in 0..4 {
            records.push(make_record(&format!("{study}-e{i}"), study, 50.0 * (i + 1) as f64, 0.05));
        }
    }

    let pipeline = SelectionPipeline::with_defaults(PrioritizationMode::Dashboard);
    let output = pipeline.run(&records, &[]).unwrap();

    let studies_out: BTreeSet<&str> =
        output.iter().map(|r| r.study_identifier.as_str()).collect();
    assert_eq!(output.len(), 3);
    assert_eq!(studies_out.len(), 3);
}

#[test]
fn pooling_disabled_keeps_the_narrowed_subset() {
    let a = make_record("a", "Study 2", 100.0, 0.1);
    let b = make_record("b", "Study 2", 200.0, 0.4);
    let mut c = make_record("c", "Study 2", 300.0, 0.2);
    c.sex = Some("Male".to_string()); // loses the sex-aggregate tie-break

    let pipeline = SelectionPipeline::new(
        PrioritizationMode::Dashboard,
        false,
        SelectionConfig::default(),
    );
    let output = pipeline.run(&[a, b, c], &[]).unwrap();
    let ids: BTreeSet<&str> = output.iter().map(|r| r.estimate_id.as_str()).collect();
    assert_eq!(ids, BTreeSet::from(["a", "b"]));
}

#[test]
fn dynamic_mode_switches_lists_per_study() {
    init_tracing();
    // Study A: both records carry an adjusted prevalence → unadjusted-preferring
    // list applies, so the population-only record wins.
    let mut a1 = make_record("a1", "Study A", 100.0, 0.1);
    a1.adjusted_prevalence = Some(0.12);
    a1.is_population_adjusted = Some(true);
    let mut a2 = make_record("a2", "Study A", 100.0, 0.1);
    a2.adjusted_prevalence = Some(0.11);
    a2.is_test_adjusted = Some(true);

    // Study B: no adjusted prevalence anywhere → adjusted-preferring list
    // applies, so the test-adjusted record wins.
    let mut b1 = make_record("b1", "Study B", 100.0, 0.1);
    b1.is_population_adjusted = Some(true);
    let mut b2 = make_record("b2", "Study B", 100.0, 0.1);
    b2.is_test_adjusted = Some(true);

    let pipeline = SelectionPipeline::with_defaults(PrioritizationMode::AnalysisDynamic);
    let output = pipeline.run(&[a1, a2, b1, b2], &[]).unwrap();

    let winner = |study: &str| {
        output
            .iter()
            .find(|r| r.study_identifier == study)
            .map(|r| r.estimate_id.as_str())
            .unwrap()
    };
    assert_eq!(winner("Study A"), "a1");
    assert_eq!(winner("Study B"), "b2");
}

#[test]
fn subgroup_run_deduplicates_by_estimate_id() {
    let mut a = make_record("a", "Study 1", 100.0, 0.1);
    a.population_groups = BTreeSet::from(["Blood donors".to_string()]);
    let mut b = make_record("b", "Study 1", 200.0, 0.2);
    b.population_groups = BTreeSet::from(["Health care workers".to_string()]);
    let mut c = make_record("c", "Study 2", 300.0, 0.3);
    c.population_groups = BTreeSet::from(["Health care workers".to_string()]);
    let records = vec![a, b, c];

    let pipeline = SelectionPipeline::with_defaults(PrioritizationMode::Dashboard);
    let output = pipeline.run(&records, &[]).unwrap();
    assert_eq!(output.len(), 2);

    // Study 1 pools onto base "b" and Study 2's only record is "c"; both
    // subgroup members are already present by id, so nothing is re-added.
    let with_subgroup = pipeline
        .run_with_subgroup(&records, &[], "Health care workers")
        .unwrap();
    let ids: Vec<&str> = with_subgroup.iter().map(|r| r.estimate_id.as_str()).collect();
    assert_eq!(ids.iter().filter(|id| **id == "b").count(), 1);
    assert_eq!(ids.iter().filter(|id| **id == "c").count(), 1);
    assert_eq!(with_subgroup.len(), 2);
}

#[test]
fn subgroup_records_survive_alongside_other_winners() {
    // The subgroup record loses selection (sex-stratified), so it appears a
    // second time through the subgroup union, un-pooled.
    let a = make_record("a", "Study 1", 500.0, 0.1);
    let mut b = make_record("b", "Study 1", 200.0, 0.2);
    b.sex = Some("Female".to_string());
    b.population_groups = BTreeSet::from(["Health care workers".to_string()]);

    let pipeline = SelectionPipeline::with_defaults(PrioritizationMode::Dashboard);
    let output = pipeline
        .run_with_subgroup(&[a, b], &[], "Health care workers")
        .unwrap();

    let ids: BTreeSet<&str> = output.iter().map(|r| r.estimate_id.as_str()).collect();
    assert_eq!(ids, BTreeSet::from(["a", "b"]));
    let subgroup_record = output.iter().find(|r| r.estimate_id == "b").unwrap();
    // Un-pooled: name untouched.
    assert_eq!(subgroup_record.estimate_name.as_deref(), Some("Study 1 b"));
}

#[test]
fn filtered_out_collection_is_not_an_error() {
    let records = vec![make_record("a", "Study 1", 100.0, 0.1)];
    let filters: Vec<RecordFilter> = vec![Box::new(|_| false)];
    let pipeline = SelectionPipeline::with_defaults(PrioritizationMode::Dashboard);
    let output = pipeline.run(&records, &filters).unwrap();
    assert!(output.is_empty());
}

#[test]
fn inputs_are_never_mutated() {
    let records = vec![
        make_record("a", "Study 1", 100.0, 0.1),
        make_record("b", "Study 1", 200.0, 0.4),
    ];
    let snapshot = records.clone();
    let pipeline = SelectionPipeline::with_defaults(PrioritizationMode::Dashboard);
    let _ = pipeline.run(&records, &[]).unwrap();
    let _ = pipeline.run(&records, &[]).unwrap();
    assert_eq!(records, snapshot);
}
