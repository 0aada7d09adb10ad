//! Dice Elimination Game Engine
//!
//! Platform-agnostic core for the dice elimination simulator. A trial rolls a
//! pool of dice until none remain: a roll containing the magic face scores
//! nothing and discards the magic dice, any other roll scores its lowest face
//! and discards one die. The runner plays many independent trials and reports
//! the score distribution.

pub mod config;
pub mod constants;
pub mod engine;
pub mod numbers;
pub mod rng;
pub mod rules;
pub mod runner;
pub mod stats;
pub mod table;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use engine::{DiceGame, GameState, play_trial};
pub use rng::{CountingRng, entropy_seed, trial_rng};
pub use rules::{RollOutcome, resolve_roll};
pub use runner::{Execution, SimulationReport, SimulationRunner, run};
pub use stats::RunStatistics;
pub use table::FrequencyTable;
