//! Score frequency table built from trial results.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::numbers::ratio;

/// Final score mapped to how many trials ended on it, ordered by score.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: BTreeMap<u64, u64>,
}

impl FrequencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more trial ending on `score`.
    pub fn record(&mut self, score: u64) {
        *self.counts.entry(score).or_insert(0) += 1;
    }

    /// Fold-friendly form of [`FrequencyTable::record`].
    #[must_use]
    pub fn with_score(mut self, score: u64) -> Self {
        self.record(score);
        self
    }

    /// Sum counts key by key. Merging is associative and commutative, so
    /// partial tables may be combined in any order.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        let (mut into, from) = if self.counts.len() >= other.counts.len() {
            (self, other)
        } else {
            (other, self)
        };
        for (score, count) in from.counts {
            *into.counts.entry(score).or_insert(0) += count;
        }
        into
    }

    #[must_use]
    pub fn count(&self, score: u64) -> u64 {
        self.counts.get(&score).copied().unwrap_or(0)
    }

    /// Total number of trials recorded.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct scores seen.
    #[must_use]
    pub fn unique_scores(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[must_use]
    pub fn min_score(&self) -> Option<u64> {
        self.counts.keys().next().copied()
    }

    #[must_use]
    pub fn max_score(&self) -> Option<u64> {
        self.counts.keys().next_back().copied()
    }

    /// Share of all recorded trials that ended on `score`.
    #[must_use]
    pub fn probability(&self, score: u64) -> f64 {
        ratio(self.count(score), self.total())
    }

    /// `(score, count)` pairs in ascending score order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(&score, &count)| (score, count))
    }
}

impl FromIterator<u64> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), Self::with_score)
    }
}
