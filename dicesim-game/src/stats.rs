//! Summary statistics derived from a completed frequency table.
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::numbers::{per_second, u64_to_f64, weighted};
use crate::table::FrequencyTable;

/// Read-only summary of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub trials: u64,
    pub mean: f64,
    pub std_dev: f64,
    pub min: u64,
    pub max: u64,
    /// Most frequent score; the smallest score wins ties.
    pub mode: u64,
    pub median: u64,
    pub unique_scores: usize,
    #[serde(rename = "elapsed_ms", with = "duration_millis")]
    pub elapsed: Duration,
    /// Trials per second of wall time.
    pub throughput: f64,
}

impl RunStatistics {
    /// Summarize `table` over `trials` trials that took `elapsed`.
    ///
    /// Returns `None` when there is nothing to summarize (no trials or an
    /// empty table).
    #[must_use]
    pub fn from_table(table: &FrequencyTable, trials: u64, elapsed: Duration) -> Option<Self> {
        if trials == 0 {
            return None;
        }
        let min = table.min_score()?;
        let max = table.max_score()?;
        let n = u64_to_f64(trials);

        let mean = table
            .iter()
            .map(|(score, count)| weighted(score, count))
            .sum::<f64>()
            / n;
        let variance = table
            .iter()
            .map(|(score, count)| {
                let delta = u64_to_f64(score) - mean;
                delta * delta * u64_to_f64(count)
            })
            .sum::<f64>()
            / n;

        Some(Self {
            trials,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            mode: mode(table)?,
            median: median(table)?,
            unique_scores: table.unique_scores(),
            elapsed,
            throughput: per_second(trials, elapsed.as_secs_f64()),
        })
    }
}

// Ascending iteration plus a strict comparison keeps the first (smallest) score on ties.
fn mode(table: &FrequencyTable) -> Option<u64> {
    let mut best: Option<(u64, u64)> = None;
    for (score, count) in table.iter() {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((score, count)),
        }
    }
    best.map(|(score, _)| score)
}

// Lower median: the score holding the ((total + 1) / 2)-th trial in score order.
fn median(table: &FrequencyTable) -> Option<u64> {
    let target = table.total().div_ceil(2);
    let mut seen = 0_u64;
    table.iter().find_map(|(score, count)| {
        seen += count;
        (seen >= target).then_some(score)
    })
}

/// Serde adapter writing a [`Duration`] as fractional milliseconds.
pub mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_secs_f64() * 1000.0).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = f64::deserialize(deserializer)?;
        Ok(Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(scores: &[u64]) -> FrequencyTable {
        scores.iter().copied().collect()
    }

    #[test]
    fn summarizes_simple_distribution() {
        let table = table(&[0, 2, 2, 4]);
        let stats = RunStatistics::from_table(&table, 4, Duration::from_secs(2)).unwrap();
        assert!((stats.mean - 2.0).abs() < f64::EPSILON);
        assert!((stats.std_dev - 2.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(stats.min, 0);
        assert_eq!(stats.max, 4);
        assert_eq!(stats.mode, 2);
        assert_eq!(stats.median, 2);
        assert_eq!(stats.unique_scores, 3);
        assert!((stats.throughput - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mode_ties_resolve_to_smallest_score() {
        let table = table(&[9, 9, 4, 4, 7]);
        let stats = RunStatistics::from_table(&table, 5, Duration::from_millis(5)).unwrap();
        assert_eq!(stats.mode, 4);
    }

    #[test]
    fn median_uses_lower_middle_for_even_totals() {
        let stats = RunStatistics::from_table(&table(&[1, 3, 5, 7]), 4, Duration::ZERO).unwrap();
        assert_eq!(stats.median, 3);
        let stats = RunStatistics::from_table(&table(&[1, 3, 5]), 3, Duration::ZERO).unwrap();
        assert_eq!(stats.median, 3);
    }

    #[test]
    fn mean_lies_between_extrema() {
        let table = table(&[0, 0, 0, 11, 3, 6, 6]);
        let stats = RunStatistics::from_table(&table, 7, Duration::from_millis(1)).unwrap();
        assert!(u64_to_f64(stats.min) <= stats.mean);
        assert!(stats.mean <= u64_to_f64(stats.max));
    }

    #[test]
    fn zero_elapsed_reports_zero_throughput() {
        let stats = RunStatistics::from_table(&table(&[1]), 1, Duration::ZERO).unwrap();
        assert!((stats.throughput - 0.0).abs() < f64::EPSILON);
        assert!(stats.throughput.is_finite());
    }

    #[test]
    fn refuses_empty_input() {
        assert!(RunStatistics::from_table(&FrequencyTable::new(), 3, Duration::ZERO).is_none());
        assert!(RunStatistics::from_table(&table(&[1]), 0, Duration::ZERO).is_none());
    }

    #[test]
    fn elapsed_serializes_as_milliseconds() {
        let stats =
            RunStatistics::from_table(&table(&[2]), 1, Duration::from_millis(1500)).unwrap();
        let value = serde_json::to_value(&stats).unwrap();
        assert!((value["elapsed_ms"].as_f64().unwrap() - 1500.0).abs() < 1e-9);
    }
}
