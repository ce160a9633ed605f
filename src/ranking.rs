//! Ordering of scored professors into a panel

use crate::types::ScoredCandidate;
use std::cmp::Ordering;

/// Ranking order: score descending, then experience descending.
///
/// Professors without an experience value sort after those with one.
pub fn compare_scored(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| compare_experience_desc(a.experience, b.experience))
}

fn compare_experience_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort by [`compare_scored`] and keep the first `k`.
///
/// The sort is stable, so full ties keep their input order.
pub fn top_k(mut scored: Vec<ScoredCandidate>, k: usize) -> Vec<ScoredCandidate> {
    scored.sort_by(compare_scored);
    scored.truncate(k);
    scored
}
