// Top-N selector: keeps the N most frequent categories of each group.

use std::collections::BTreeMap;

use super::counter::{CategoryCounts, GroupCounts, GroupKey};
use crate::error::{Result, TrendError};
use crate::vocab::Dimension;

/// One ranked (category, count) entry.
pub type Ranked = (String, u64);

/// Group -> at most N ranked entries.
pub type TopNResult = BTreeMap<GroupKey, Vec<Ranked>>;

/// Rank one group's categories: count descending, ties by canonical order of
/// `dimension` (values outside the vocabulary last, then alphabetical).
pub fn rank_categories(counts: &CategoryCounts, dimension: Dimension) -> Vec<Ranked> {
    let mut ranked: Vec<Ranked> = counts.iter().map(|(c, n)| (c.clone(), *n)).collect();
    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| dimension.sort_key(&a.0).cmp(&dimension.sort_key(&b.0)))
    });
    ranked
}

/// Reduce every group to its `n` most frequent categories.
///
/// Groups with fewer than `n` categories are returned whole, never padded.
pub fn top_n(group_counts: &GroupCounts, n: usize, dimension: Dimension) -> Result<TopNResult> {
    if n == 0 {
        return Err(TrendError::InvalidArgument(
            "top-N requires a positive N".to_string(),
        ));
    }

    Ok(group_counts
        .iter()
        .map(|(key, counts)| {
            let mut ranked = rank_categories(counts, dimension);
            ranked.truncate(n);
            (key.clone(), ranked)
        })
        .collect())
}
