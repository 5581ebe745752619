//! Typed field handles for the pooling rule table.
//!
//! Each handle names one record field of a given value class and knows how to
//! read and write it, so aggregation rules can be declared as data without
//! string-keyed access into the record.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::types::EstimateRecord;

/// Numeric fields the rule table can aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    Denominator,
    Sensitivity,
    Specificity,
    Prevalence,
    AdjustedPrevalence,
}

impl NumericField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Denominator => "denominator",
            Self::Sensitivity => "sensitivity",
            Self::Specificity => "specificity",
            Self::Prevalence => "prevalence",
            Self::AdjustedPrevalence => "adjusted_prevalence",
        }
    }

    pub fn get(&self, record: &EstimateRecord) -> Option<f64> {
        match self {
            Self::Denominator => record.denominator,
            Self::Sensitivity => record.sensitivity,
            Self::Specificity => record.specificity,
            Self::Prevalence => record.prevalence,
            Self::AdjustedPrevalence => record.adjusted_prevalence,
        }
    }

    pub fn set(&self, record: &mut EstimateRecord, value: Option<f64>) {
        match self {
            Self::Denominator => record.denominator = value,
            Self::Sensitivity => record.sensitivity = value,
            Self::Specificity => record.specificity = value,
            Self::Prevalence => record.prevalence = value,
            Self::AdjustedPrevalence => record.adjusted_prevalence = value,
        }
    }
}

/// Date fields the rule table can aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    SamplingStartDate,
    SamplingEndDate,
}

impl DateField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SamplingStartDate => "sampling_start_date",
            Self::SamplingEndDate => "sampling_end_date",
        }
    }

    pub fn get(&self, record: &EstimateRecord) -> Option<NaiveDate> {
        match self {
            Self::SamplingStartDate => record.sampling_start_date,
            Self::SamplingEndDate => record.sampling_end_date,
        }
    }

    pub fn set(&self, record: &mut EstimateRecord, value: Option<NaiveDate>) {
        match self {
            Self::SamplingStartDate => record.sampling_start_date = value,
            Self::SamplingEndDate => record.sampling_end_date = value,
        }
    }
}

/// Boolean fields the rule table can aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolField {
    Included,
    IsPopulationAdjusted,
    IsTestAdjusted,
}

impl BoolField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Included => "included",
            Self::IsPopulationAdjusted => "is_population_adjusted",
            Self::IsTestAdjusted => "is_test_adjusted",
        }
    }

    pub fn get(&self, record: &EstimateRecord) -> Option<bool> {
        match self {
            Self::Included => record.included,
            Self::IsPopulationAdjusted => record.is_population_adjusted,
            Self::IsTestAdjusted => record.is_test_adjusted,
        }
    }

    pub fn set(&self, record: &mut EstimateRecord, value: Option<bool>) {
        match self {
            Self::Included => record.included = value,
            Self::IsPopulationAdjusted => record.is_population_adjusted = value,
            Self::IsTestAdjusted => record.is_test_adjusted = value,
        }
    }
}

/// Free-text fields the rule table can aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    AgeBand,
    Sex,
    SpecimenType,
    TestType,
    TestName,
    SourceName,
}

impl TextField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AgeBand => "age_band",
            Self::Sex => "sex",
            Self::SpecimenType => "specimen_type",
            Self::TestType => "test_type",
            Self::TestName => "test_name",
            Self::SourceName => "source_name",
        }
    }

    pub fn get<'a>(&self, record: &'a EstimateRecord) -> Option<&'a str> {
        match self {
            Self::AgeBand => record.age_band.as_deref(),
            Self::Sex => record.sex.as_deref(),
            Self::SpecimenType => record.specimen_type.as_deref(),
            Self::TestType => record.test_type.as_deref(),
            Self::TestName => record.test_name.as_deref(),
            Self::SourceName => record.source_name.as_deref(),
        }
    }

    pub fn set(&self, record: &mut EstimateRecord, value: Option<String>) {
        match self {
            Self::AgeBand => record.age_band = value,
            Self::Sex => record.sex = value,
            Self::SpecimenType => record.specimen_type = value,
            Self::TestType => record.test_type = value,
            Self::TestName => record.test_name = value,
            Self::SourceName => record.source_name = value,
        }
    }
}

/// String-set fields the rule table can aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    States,
    Cities,
    PopulationGroups,
    AntibodyTargets,
}

impl SetField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::States => "states",
            Self::Cities => "cities",
            Self::PopulationGroups => "population_groups",
            Self::AntibodyTargets => "antibody_targets",
        }
    }

    pub fn get<'a>(&self, record: &'a EstimateRecord) -> &'a BTreeSet<String> {
        match self {
            Self::States => &record.states,
            Self::Cities => &record.cities,
            Self::PopulationGroups => &record.population_groups,
            Self::AntibodyTargets => &record.antibody_targets,
        }
    }

    pub fn set(&self, record: &mut EstimateRecord, value: BTreeSet<String>) {
        match self {
            Self::States => record.states = value,
            Self::Cities => record.cities = value,
            Self::PopulationGroups => record.population_groups = value,
            Self::AntibodyTargets => record.antibody_targets = value,
        }
    }
}
