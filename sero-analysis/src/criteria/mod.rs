//! Prioritization criteria: the library, mode resolution, and the cascade.

pub mod cascade;
pub mod library;
pub mod modes;

pub use cascade::select;
pub use library::{CriteriaList, Criterion, Level, TEST_ADJUSTED_PREFERRING, TEST_UNADJUSTED_PREFERRING};
pub use modes::{resolve, PrioritizationMode};
