//! Default values for a simulation run.
//!
//! The defaults describe the classic table game: five six-sided dice with
//! three as the magic face, sampled over ten thousand trials.

pub const DEFAULT_DICE_COUNT: u32 = 5;
pub const DEFAULT_SIDES_PER_DIE: u32 = 6;
pub const DEFAULT_MAGIC_NUMBER: u32 = 3;
pub const DEFAULT_TRIAL_COUNT: u64 = 10_000;

/// Smallest die that can still roll something other than the magic face.
pub const MIN_SIDES_PER_DIE: u32 = 2;

/// Seed used by tests and presets when reproducibility matters more than variety.
pub const REFERENCE_SEED: u64 = 0x00D1_CE5E_ED00_0003;
