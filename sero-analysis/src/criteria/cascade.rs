//! The cascading selector: a lexicographic, short-circuiting multi-key filter.
//!
//! Criteria are applied in list order; within a criterion, the first level
//! with any match becomes the new candidate set. Later criteria only break
//! ties among records indistinguishable by earlier ones, so the evaluation
//! order is part of the contract.

use smallvec::SmallVec;

use super::library::CriteriaList;
use crate::model::types::EstimateRecord;

/// Narrow a study group to its most preferred subset.
///
/// Guarantees: the result is never empty for a non-empty input; a criterion
/// no record satisfies is skipped without shrinking the candidate set; the
/// cascade stops at the first singleton. When every criterion is exhausted
/// and several records remain tied, the tied subset is returned as-is for the
/// caller to pool or keep.
pub fn select<'a>(group: &[&'a EstimateRecord], list: &CriteriaList) -> Vec<&'a EstimateRecord> {
    if group.len() <= 1 {
        return group.to_vec();
    }

    let mut current: Vec<&EstimateRecord> = group.to_vec();
    for criterion in list.criteria {
        for level in criterion.levels {
            let matched: SmallVec<[&EstimateRecord; 8]> =
                current.iter().copied().filter(|r| level(r)).collect();
            if !matched.is_empty() {
                current = matched.into_vec();
                break;
            }
        }
        tracing::debug!(
            criteria_list = list.name,
            criterion = criterion.name,
            survivors = current.len(),
            "applied criterion"
        );
        if current.len() == 1 {
            return current;
        }
    }
    current
}
