//! Simulation configuration and its validation.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::{
    DEFAULT_DICE_COUNT, DEFAULT_MAGIC_NUMBER, DEFAULT_SIDES_PER_DIE, DEFAULT_TRIAL_COUNT,
    MIN_SIDES_PER_DIE,
};

/// Errors raised when a configuration cannot drive a simulation run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("dice count must be at least 1 (got {dice_count})")]
    NoDice { dice_count: u32 },
    #[error("dice need at least {min} sides (got {sides_per_die})")]
    TooFewSides { sides_per_die: u32, min: u32 },
    #[error("magic number {magic_number} must be between 1 and {sides_per_die}")]
    MagicOutOfRange {
        magic_number: u32,
        sides_per_die: u32,
    },
    #[error("trial count must be at least 1 (got {trial_count})")]
    NoTrials { trial_count: u64 },
    #[error("configuration document is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable description of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default = "GameConfig::default_dice_count")]
    pub dice_count: u32,
    #[serde(default = "GameConfig::default_sides_per_die")]
    pub sides_per_die: u32,
    #[serde(default = "GameConfig::default_magic_number")]
    pub magic_number: u32,
    #[serde(default = "GameConfig::default_trial_count")]
    pub trial_count: u64,
}

impl GameConfig {
    const fn default_dice_count() -> u32 {
        DEFAULT_DICE_COUNT
    }

    const fn default_sides_per_die() -> u32 {
        DEFAULT_SIDES_PER_DIE
    }

    const fn default_magic_number() -> u32 {
        DEFAULT_MAGIC_NUMBER
    }

    const fn default_trial_count() -> u64 {
        DEFAULT_TRIAL_COUNT
    }

    #[must_use]
    pub const fn with_dice_count(mut self, dice_count: u32) -> Self {
        self.dice_count = dice_count;
        self
    }

    #[must_use]
    pub const fn with_sides_per_die(mut self, sides_per_die: u32) -> Self {
        self.sides_per_die = sides_per_die;
        self
    }

    #[must_use]
    pub const fn with_magic_number(mut self, magic_number: u32) -> Self {
        self.magic_number = magic_number;
        self
    }

    #[must_use]
    pub const fn with_trial_count(mut self, trial_count: u64) -> Self {
        self.trial_count = trial_count;
        self
    }

    /// Check every invariant a run depends on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant, checked in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dice_count == 0 {
            return Err(ConfigError::NoDice {
                dice_count: self.dice_count,
            });
        }
        if self.sides_per_die < MIN_SIDES_PER_DIE {
            return Err(ConfigError::TooFewSides {
                sides_per_die: self.sides_per_die,
                min: MIN_SIDES_PER_DIE,
            });
        }
        if !(1..=self.sides_per_die).contains(&self.magic_number) {
            return Err(ConfigError::MagicOutOfRange {
                magic_number: self.magic_number,
                sides_per_die: self.sides_per_die,
            });
        }
        if self.trial_count == 0 {
            return Err(ConfigError::NoTrials {
                trial_count: self.trial_count,
            });
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the matching
    /// invariant error when the decoded values are unusable.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dice_count: Self::default_dice_count(),
            sides_per_die: Self::default_sides_per_die(),
            magic_number: Self::default_magic_number(),
            trial_count: Self::default_trial_count(),
        }
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameConfig[dice={}, sides={}, magic={}, sims={}]",
            self.dice_count, self.sides_per_die, self.magic_number, self.trial_count
        )
    }
}
