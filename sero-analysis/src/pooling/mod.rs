//! Pooling: merge a surviving multi-record subset into one synthetic record.

pub mod engine;
pub mod jeffreys;
pub mod rules;

pub use engine::pool;
pub use jeffreys::jeffreys_interval;
pub use rules::{Aggregation, POOLING_RULES};
