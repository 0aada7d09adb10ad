pub mod benchmark;
pub mod reports;
pub mod seeds;
pub mod session;

pub use benchmark::{BenchmarkRow, parse_sizes, run_benchmark};
pub use seeds::{SeedInfo, resolve_seed_input};
pub use session::{PresetRun, RunPlan, run_plans};
