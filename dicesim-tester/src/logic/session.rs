use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;

use dicesim_game::{GameConfig, SimulationReport, SimulationRunner};

/// A named configuration queued for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub name: String,
    pub config: GameConfig,
}

impl RunPlan {
    #[must_use]
    pub fn new(name: impl Into<String>, config: GameConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// A finished run as it appears in reports.
#[derive(Debug, Clone, Serialize)]
pub struct PresetRun {
    pub preset: String,
    pub generated_at: String,
    #[serde(flatten)]
    pub report: SimulationReport,
}

pub fn run_plans(
    runner: &SimulationRunner,
    plans: &[RunPlan],
    verbose: bool,
) -> Result<Vec<PresetRun>> {
    let mut runs = Vec::with_capacity(plans.len());
    for plan in plans {
        if verbose {
            eprintln!(
                "🎲 Running {} ({})",
                plan.name.bright_white(),
                plan.config
            );
        }
        let report = runner.run(&plan.config).inspect_err(|err| {
            log::warn!("rejected configuration for {}: {err}", plan.name);
        });
        let report = report.with_context(|| format!("preset {} failed", plan.name))?;
        if verbose {
            eprintln!(
                "   ✅ {} trials in {:?} (mean {:.2})",
                report.statistics.trials, report.statistics.elapsed, report.statistics.mean
            );
        }
        runs.push(PresetRun {
            preset: plan.name.clone(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            report,
        });
    }
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_each_plan_in_order() {
        let runner = SimulationRunner::new().with_seed(9);
        let plans = vec![
            RunPlan::new("a", GameConfig::default().with_trial_count(20)),
            RunPlan::new("b", GameConfig::default().with_dice_count(2).with_trial_count(30)),
        ];
        let runs = run_plans(&runner, &plans, false).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].preset, "a");
        assert_eq!(runs[1].report.distribution.total(), 30);
        assert!(!runs[0].generated_at.is_empty());
    }

    #[test]
    fn invalid_plan_aborts_with_context() {
        let runner = SimulationRunner::new().with_seed(9);
        let plans = vec![RunPlan::new(
            "broken",
            GameConfig::default().with_sides_per_die(1),
        )];
        let err = run_plans(&runner, &plans, false).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("preset broken failed"));
        assert!(chain.contains("at least 2 sides"));
    }

    #[test]
    fn serialized_run_flattens_report() {
        let runner = SimulationRunner::new().with_seed(1);
        let plans = vec![RunPlan::new("quick", GameConfig::default().with_trial_count(10))];
        let runs = run_plans(&runner, &plans, false).unwrap();
        let value = serde_json::to_value(&runs[0]).unwrap();
        assert_eq!(value["preset"], "quick");
        assert_eq!(value["seed"], 1);
        assert_eq!(value["config"]["trial_count"], 10);
    }
}
