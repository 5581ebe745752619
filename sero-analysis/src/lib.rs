//! Estimate selection and pooling engine.
//!
//! Takes a flat collection of seroprevalence estimate records, partitions it
//! by study, narrows each study's candidates through a mode-dependent cascade
//! of prioritization criteria, and optionally pools the survivors into one
//! synthetic record per study with recomputed derived statistics.
//!
//! The engine is a pure, synchronous, in-memory batch transform: inputs are
//! never mutated, study groups are independent, and the same input collection
//! can be reused across invocations with different modes or filters.

pub mod criteria;
pub mod model;
pub mod pipeline;
pub mod pooling;

pub use criteria::{CriteriaList, Criterion, PrioritizationMode};
pub use model::{EstimateGrade, EstimateRecord, Isotype, IsotypeOperator};
pub use pipeline::{RecordFilter, SelectionPipeline};
pub use pooling::jeffreys_interval;
