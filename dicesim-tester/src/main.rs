mod common;
mod logic;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use common::presets::{expand_presets, find_preset, list_presets};
use common::split_csv;
use common::util::load_config_file;
use dicesim_game::{Execution, GameConfig, SimulationRunner};
use logic::{
    BenchmarkRow, PresetRun, RunPlan, SeedInfo, parse_sizes, resolve_seed_input, run_benchmark,
    run_plans,
};

#[derive(Debug, Parser)]
#[command(name = "dicesim-tester", version = "0.1.0")]
#[command(about = "Monte Carlo simulator for the dice elimination game")]
struct Args {
    /// Presets to run (comma-separated, `all` for every preset)
    #[arg(long, default_value = "default")]
    presets: String,

    /// List all available presets and exit
    #[arg(long)]
    list_presets: bool,

    /// JSON configuration file; replaces the preset selection with a single custom run
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of dice in the pool (custom run)
    #[arg(long)]
    dice: Option<u32>,

    /// Faces per die (custom run)
    #[arg(long)]
    sides: Option<u32>,

    /// Face that voids a roll (custom run)
    #[arg(long)]
    magic: Option<u32>,

    /// Number of games to simulate (custom run)
    #[arg(long)]
    trials: Option<u64>,

    /// Run seed: integer, 0x-hex, or `random`
    #[arg(long)]
    seed: Option<String>,

    /// Play every trial on one thread instead of the rayon pool
    #[arg(long)]
    sequential: bool,

    /// Run the performance sweep after the presets
    #[arg(long)]
    benchmark: bool,

    /// Trial counts for the performance sweep (comma-separated)
    #[arg(long, default_value = logic::benchmark::DEFAULT_BENCHMARK_SIZES)]
    benchmark_sizes: String,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Args {
    const fn has_overrides(&self) -> bool {
        self.config.is_some()
            || self.dice.is_some()
            || self.sides.is_some()
            || self.magic.is_some()
            || self.trials.is_some()
    }

    const fn execution(&self) -> Execution {
        if self.sequential {
            Execution::Sequential
        } else {
            Execution::Parallel
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_presets(&args)? {
        return Ok(());
    }

    if args.report == "console" {
        announce_banner();
    }

    let start_time = Instant::now();
    let seed_info = resolve_seed_input(args.seed.as_deref())?;
    let runner = build_runner(&args, seed_info);
    let plans = build_plans(&args)?;
    log::info!(
        "running {} plan(s) with seed {:#018x} ({:?})",
        plans.len(),
        seed_info.seed,
        seed_info.source
    );
    if !seed_info.is_reproducible() {
        log::info!("pass --seed {:#x} to reproduce this run", seed_info.seed);
    }

    let runs = run_plans(&runner, &plans, args.verbose)?;
    let benchmark = gather_benchmark(&args, &runner)?;

    write_reports(&args, &runs, benchmark.as_deref(), start_time)
}

fn maybe_list_presets(args: &Args) -> Result<bool> {
    if !args.list_presets {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available presets:")?;
    for (key, description) in list_presets() {
        writeln!(output_target.writer(), "  {key:15} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎲 Dice Game Simulation".bright_cyan().bold());
    println!("{}", "=======================".cyan());
}

fn build_runner(args: &Args, seed_info: SeedInfo) -> SimulationRunner {
    SimulationRunner::new()
        .with_execution(args.execution())
        .with_seed(seed_info.seed)
}

fn build_plans(args: &Args) -> Result<Vec<RunPlan>> {
    if args.has_overrides() {
        return Ok(vec![RunPlan::new("custom", custom_config(args)?)]);
    }

    let mut plans = Vec::new();
    for key in expand_presets(split_csv(&args.presets)) {
        if let Some(preset) = find_preset(&key) {
            plans.push(RunPlan::new(preset.key, preset.config));
        } else {
            eprintln!("⚠️  Unknown preset: {}", key.yellow());
        }
    }

    if plans.is_empty() {
        bail!("no runnable presets in {:?}", args.presets);
    }
    Ok(plans)
}

fn custom_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(dice) = args.dice {
        config = config.with_dice_count(dice);
    }
    if let Some(sides) = args.sides {
        config = config.with_sides_per_die(sides);
    }
    if let Some(magic) = args.magic {
        config = config.with_magic_number(magic);
    }
    if let Some(trials) = args.trials {
        config = config.with_trial_count(trials);
    }
    config.validate().inspect_err(|err| {
        log::warn!("rejected custom configuration {config}: {err}");
    })?;
    Ok(config)
}

fn gather_benchmark(args: &Args, runner: &SimulationRunner) -> Result<Option<Vec<BenchmarkRow>>> {
    if !args.benchmark {
        return Ok(None);
    }
    let sizes = parse_sizes(&args.benchmark_sizes)?;
    let base = if args.has_overrides() {
        custom_config(args)?
    } else {
        GameConfig::default()
    };
    if args.report == "console" {
        println!("{}", "⚡ Running performance sweep".bright_yellow().bold());
    }
    run_benchmark(runner, &base, &sizes).map(Some)
}

fn write_reports(
    args: &Args,
    runs: &[PresetRun],
    benchmark: Option<&[BenchmarkRow]>,
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, runs, benchmark)?,
        "markdown" => {
            logic::reports::generate_markdown_report(&mut output_target, runs, benchmark)?;
        }
        "csv" => logic::reports::generate_csv_report(&mut output_target, runs, benchmark)?,
        _ => {
            let duration = start_time.elapsed();
            logic::reports::generate_console_report(
                &mut output_target,
                runs,
                benchmark,
                duration,
            )?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
