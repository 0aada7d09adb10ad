use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;
use std::time::Duration;

use dicesim_game::numbers::u64_to_f64;

use super::{BenchmarkRow, PresetRun};

pub fn generate_console_report<W: Write>(
    out: &mut W,
    runs: &[PresetRun],
    benchmark: Option<&[BenchmarkRow]>,
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Simulation Results".bright_cyan().bold())?;
    writeln!(out, "{}", "=====================".cyan())?;

    for run in runs {
        let report = &run.report;
        let stats = &report.statistics;
        writeln!(out)?;
        writeln!(out, "{}", run.preset.bold())?;
        writeln!(out, "Configuration: {}", report.config)?;
        writeln!(out, "Seed: {:#018x}", report.seed)?;
        writeln!(
            out,
            "Number of simulations was {} using {} dice.",
            stats.trials, report.config.dice_count
        )?;

        for (score, count) in report.distribution.iter() {
            let occurrences = u64_to_f64(count);
            writeln!(
                out,
                "Total {score} occurs {:.2} occurred {occurrences:.1} times.",
                report.distribution.probability(score)
            )?;
        }
        writeln!(
            out,
            "Total simulation took {:.1} seconds.",
            stats.elapsed.as_secs_f64()
        )?;

        writeln!(out)?;
        writeln!(out, "{}", "Statistical Summary:".bright_yellow().bold())?;
        writeln!(out, "Mean Score: {:.2}", stats.mean)?;
        writeln!(out, "Min Score: {}", stats.min)?;
        writeln!(out, "Max Score: {}", stats.max)?;
        writeln!(out, "Mode Score: {}", stats.mode)?;
        writeln!(out, "Median Score: {}", stats.median)?;
        writeln!(out, "Std Deviation: {:.2}", stats.std_dev)?;
        writeln!(out, "Unique Scores: {}", stats.unique_scores)?;
        writeln!(
            out,
            "Performance: {} simulations/second",
            format!("{:.0}", stats.throughput).green()
        )?;
    }

    if let Some(rows) = benchmark {
        writeln!(out)?;
        writeln!(out, "{}", "⚡ Performance Sweep".bright_yellow().bold())?;
        writeln!(out, "{}", "===================".yellow())?;
        writeln!(out, "Performance test with different simulation sizes:")?;
        for row in rows {
            writeln!(
                out,
                "{} simulations: {:.3} seconds ({:.0} sims/sec)",
                row.trials,
                row.elapsed.as_secs_f64(),
                row.throughput
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Total time: {total_duration:?}")?;
    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    runs: &'a [PresetRun],
    #[serde(skip_serializing_if = "Option::is_none")]
    benchmark: Option<&'a [BenchmarkRow]>,
}

pub fn generate_json_report<W: Write>(
    out: &mut W,
    runs: &[PresetRun],
    benchmark: Option<&[BenchmarkRow]>,
) -> Result<()> {
    let json_output = serde_json::to_string_pretty(&JsonReport { runs, benchmark })?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write>(
    out: &mut W,
    runs: &[PresetRun],
    benchmark: Option<&[BenchmarkRow]>,
) -> Result<()> {
    writeln!(out, "# Dice Simulation Results\n")?;

    for run in runs {
        let report = &run.report;
        let stats = &report.statistics;
        writeln!(out, "## {}\n", run.preset)?;
        writeln!(out, "- **Dice**: {}", report.config.dice_count)?;
        writeln!(out, "- **Sides per die**: {}", report.config.sides_per_die)?;
        writeln!(out, "- **Magic number**: {}", report.config.magic_number)?;
        writeln!(out, "- **Trials**: {}", stats.trials)?;
        writeln!(out, "- **Seed**: `{:#018x}`\n", report.seed)?;

        writeln!(out, "| Score | Count | Probability |")?;
        writeln!(out, "|------:|------:|------------:|")?;
        for (score, count) in report.distribution.iter() {
            writeln!(
                out,
                "| {score} | {count} | {:.4} |",
                report.distribution.probability(score)
            )?;
        }
        writeln!(out)?;

        writeln!(out, "- **Mean**: {:.2}", stats.mean)?;
        writeln!(out, "- **Min / Max**: {} / {}", stats.min, stats.max)?;
        writeln!(out, "- **Mode**: {}", stats.mode)?;
        writeln!(out, "- **Median**: {}", stats.median)?;
        writeln!(out, "- **Std deviation**: {:.2}", stats.std_dev)?;
        writeln!(out, "- **Unique scores**: {}", stats.unique_scores)?;
        writeln!(
            out,
            "- **Throughput**: {:.0} simulations/second\n",
            stats.throughput
        )?;
    }

    if let Some(rows) = benchmark {
        writeln!(out, "## Performance Sweep\n")?;
        writeln!(out, "| Trials | Seconds | Sims/sec |")?;
        writeln!(out, "|-------:|--------:|---------:|")?;
        for row in rows {
            writeln!(
                out,
                "| {} | {:.3} | {:.0} |",
                row.trials,
                row.elapsed.as_secs_f64(),
                row.throughput
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_csv_report<W: Write>(
    out: &mut W,
    runs: &[PresetRun],
    benchmark: Option<&[BenchmarkRow]>,
) -> Result<()> {
    writeln!(out, "preset,dice,sides,magic,trials,score,count,probability")?;
    for run in runs {
        let config = &run.report.config;
        for (score, count) in run.report.distribution.iter() {
            writeln!(
                out,
                "{},{},{},{},{},{score},{count},{:.6}",
                run.preset,
                config.dice_count,
                config.sides_per_die,
                config.magic_number,
                config.trial_count,
                run.report.distribution.probability(score)
            )?;
        }
    }

    // Sweep rows follow the distribution block after a blank line.
    if let Some(rows) = benchmark {
        writeln!(out)?;
        writeln!(out, "benchmark_trials,elapsed_ms,throughput")?;
        for row in rows {
            writeln!(
                out,
                "{},{:.3},{:.0}",
                row.trials,
                row.elapsed.as_secs_f64() * 1000.0,
                row.throughput
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::{RunPlan, run_plans};
    use dicesim_game::{GameConfig, SimulationRunner};

    fn sample_runs() -> Vec<PresetRun> {
        let runner = SimulationRunner::new().with_seed(21);
        let plans = vec![RunPlan::new(
            "single",
            GameConfig::default()
                .with_dice_count(1)
                .with_trial_count(600),
        )];
        run_plans(&runner, &plans, false).expect("valid plan")
    }

    fn sample_rows() -> Vec<BenchmarkRow> {
        vec![BenchmarkRow {
            trials: 1_000,
            elapsed: Duration::from_millis(250),
            throughput: 4_000.0,
        }]
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).expect("report renders");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn console_report_lists_distribution_and_summary() {
        let runs = sample_runs();
        let rows = sample_rows();
        let text = render(|out| {
            generate_console_report(out, &runs, Some(&rows), Duration::from_millis(3))
        });
        assert!(text.contains("GameConfig[dice=1, sides=6, magic=3, sims=600]"));
        assert!(text.contains("Number of simulations was 600 using 1 dice."));
        assert!(text.contains("Total 0 occurs"));
        assert!(!text.contains("Total 3 occurs"));
        assert!(text.contains("Statistical Summary"));
        assert!(text.contains("Mode Score:"));
        assert!(text.contains("1000 simulations: 0.250 seconds (4000 sims/sec)"));
    }

    #[test]
    fn json_report_round_trips_through_serde_value() {
        let runs = sample_runs();
        let text = render(|out| generate_json_report(out, &runs, None));
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        let first = &value["runs"][0];
        assert_eq!(first["preset"], "single");
        assert_eq!(first["statistics"]["trials"], 600);
        assert!(first["distribution"].get("3").is_none());
        assert!(value.get("benchmark").is_none());
    }

    #[test]
    fn json_report_carries_sweep_rows() {
        let runs = sample_runs();
        let rows = sample_rows();
        let text = render(|out| generate_json_report(out, &runs, Some(&rows)));
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["benchmark"][0]["trials"], 1_000);
        assert!((value["benchmark"][0]["elapsed_ms"].as_f64().unwrap() - 250.0).abs() < 1e-9);
        assert_eq!(value["runs"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn markdown_report_has_table_rows() {
        let runs = sample_runs();
        let rows = sample_rows();
        let text = render(|out| generate_markdown_report(out, &runs, Some(&rows)));
        assert!(text.starts_with("# Dice Simulation Results"));
        assert!(text.contains("## single"));
        assert!(text.contains("| Score | Count | Probability |"));
        assert!(text.contains("## Performance Sweep"));
    }

    #[test]
    fn csv_report_counts_sum_to_trials() {
        let runs = sample_runs();
        let text = render(|out| generate_csv_report(out, &runs, None));
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("preset,dice,sides,magic,trials,score,count,probability")
        );
        let total: u64 = lines
            .map(|line| line.split(',').nth(6).unwrap().parse::<u64>().unwrap())
            .sum();
        assert_eq!(total, 600);
    }

    #[test]
    fn csv_report_appends_sweep_block() {
        let runs = sample_runs();
        let rows = sample_rows();
        let text = render(|out| generate_csv_report(out, &runs, Some(&rows)));
        let (_, sweep) = text.split_once("\n\n").expect("sweep block");
        let mut lines = sweep.lines();
        assert_eq!(lines.next(), Some("benchmark_trials,elapsed_ms,throughput"));
        assert_eq!(lines.next(), Some("1000,250.000,4000"));
        assert_eq!(lines.next(), None);
    }
}
