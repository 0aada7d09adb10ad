use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::time::{Duration, Instant};

use dicesim_game::numbers::per_second;
use dicesim_game::{GameConfig, SimulationRunner};

use crate::common::split_csv;

pub const DEFAULT_BENCHMARK_SIZES: &str = "1000,5000,10000";

/// Wall-clock cost of one run size.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRow {
    pub trials: u64,
    #[serde(rename = "elapsed_ms", with = "dicesim_game::stats::duration_millis")]
    pub elapsed: Duration,
    pub throughput: f64,
}

/// Parse a comma-separated list of trial counts.
pub fn parse_sizes(raw: &str) -> Result<Vec<u64>> {
    let sizes = split_csv(raw)
        .iter()
        .map(|token| {
            token
                .replace('_', "")
                .parse::<u64>()
                .with_context(|| format!("invalid benchmark size: {token}"))
        })
        .collect::<Result<Vec<_>>>()?;
    if sizes.is_empty() {
        bail!("no benchmark sizes given");
    }
    Ok(sizes)
}

/// Time `base` at each trial count, measured around the whole run.
pub fn run_benchmark(
    runner: &SimulationRunner,
    base: &GameConfig,
    sizes: &[u64],
) -> Result<Vec<BenchmarkRow>> {
    let mut rows = Vec::with_capacity(sizes.len());
    for &trials in sizes {
        let config = base.with_trial_count(trials);
        let start = Instant::now();
        runner
            .run(&config)
            .with_context(|| format!("benchmark run of {trials} trials failed"))?;
        let elapsed = start.elapsed();
        log::debug!("benchmark {trials} trials took {elapsed:?}");
        rows.push(BenchmarkRow {
            trials,
            elapsed,
            throughput: per_second(trials, elapsed.as_secs_f64()),
        });
    }
    Ok(rows)
}
