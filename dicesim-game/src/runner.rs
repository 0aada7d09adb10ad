//! Monte Carlo runner: plays many independent trials and aggregates them.
//!
//! Trials are mapped in parallel with each rayon worker folding into its own
//! partial [`FrequencyTable`]; partial tables are merged once the workers are
//! done. Because every trial draws from a stream derived from the run seed
//! and its index, the merged table is identical to a sequential run with the
//! same seed.
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::config::{ConfigError, GameConfig};
use crate::engine::play_trial;
use crate::rng::{entropy_seed, trial_rng};
use crate::stats::RunStatistics;
use crate::table::FrequencyTable;

/// How trials are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Execution {
    /// Split trials across the rayon pool, merging per-worker tables.
    #[default]
    Parallel,
    /// Play every trial on the calling thread.
    Sequential,
}

/// Everything a completed run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub config: GameConfig,
    pub seed: u64,
    pub execution: Execution,
    pub distribution: FrequencyTable,
    pub statistics: RunStatistics,
}

/// Configured entry point for simulation runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationRunner {
    execution: Execution,
    seed: Option<u64>,
}

impl SimulationRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            execution: Execution::Parallel,
            seed: None,
        }
    }

    #[must_use]
    pub const fn with_execution(mut self, execution: Execution) -> Self {
        self.execution = execution;
        self
    }

    /// Fix the run seed; without one every run draws a fresh seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub const fn execution(&self) -> Execution {
        self.execution
    }

    /// Validate `config`, play all of its trials, and summarize them.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] before any trial is played when the
    /// configuration is invalid.
    pub fn run(&self, config: &GameConfig) -> Result<SimulationReport, ConfigError> {
        config.validate()?;
        let seed = self.seed.unwrap_or_else(entropy_seed);
        log::debug!(
            "starting {:?} run of {config} with seed {seed:#018x}",
            self.execution
        );

        let start = Instant::now();
        let distribution = match self.execution {
            Execution::Parallel => tally_parallel(config, seed),
            Execution::Sequential => tally_sequential(config, seed),
        };
        let elapsed = start.elapsed();

        let statistics = RunStatistics::from_table(&distribution, config.trial_count, elapsed)
            .ok_or(ConfigError::NoTrials {
                trial_count: config.trial_count,
            })?;
        log::debug!(
            "finished {} trials in {elapsed:?} ({:.0} trials/sec, {} distinct scores)",
            statistics.trials,
            statistics.throughput,
            statistics.unique_scores
        );

        Ok(SimulationReport {
            config: *config,
            seed,
            execution: self.execution,
            distribution,
            statistics,
        })
    }
}

/// Run `config` in parallel with a fresh seed.
///
/// # Errors
///
/// Returns a [`ConfigError`] when the configuration is invalid.
pub fn run(config: &GameConfig) -> Result<(FrequencyTable, RunStatistics), ConfigError> {
    let report = SimulationRunner::new().run(config)?;
    Ok((report.distribution, report.statistics))
}

fn tally_parallel(config: &GameConfig, seed: u64) -> FrequencyTable {
    (0..config.trial_count)
        .into_par_iter()
        .fold(FrequencyTable::new, |table, trial| {
            table.with_score(play_trial(config, &mut trial_rng(seed, trial)))
        })
        .reduce(FrequencyTable::new, FrequencyTable::merge)
}

fn tally_sequential(config: &GameConfig, seed: u64) -> FrequencyTable {
    (0..config.trial_count)
        .map(|trial| play_trial(config, &mut trial_rng(seed, trial)))
        .collect()
}
