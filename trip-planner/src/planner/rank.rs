//! Journey ranking for routing results.
//!
//! Orders journeys so the least walking comes first, then the cheapest,
//! then the quickest, and keeps only the best few.

use std::cmp::Ordering;

use crate::domain::Journey;

/// Compare two journeys by preference.
///
/// 1. Walking distance (less is better)
/// 2. Cost (cheaper is better)
/// 3. Total time (shorter is better)
pub fn compare_journeys(a: &Journey, b: &Journey) -> Ordering {
    let (a, b) = (&a.summary, &b.summary);
    a.walking_distance_meters
        .cmp(&b.walking_distance_meters)
        .then_with(|| a.cost.total_cmp(&b.cost))
        .then_with(|| a.total_time_minutes.cmp(&b.total_time_minutes))
}

/// Rank journeys best-first and keep at most `top_k` of them.
///
/// The sort is stable: journeys that compare equal keep the order the
/// routing engine returned them in.
pub fn filter_sort(mut journeys: Vec<Journey>, top_k: usize) -> Vec<Journey> {
    journeys.sort_by(compare_journeys);
    journeys.truncate(top_k);
    journeys
}
