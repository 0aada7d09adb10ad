//! Single-trial game engine.
//!
//! A trial rolls the whole pool, resolves the roll, and repeats with whatever
//! dice remain. Each roll removes at least one die, so a trial finishes in at
//! most `dice_count` rolls.
use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::GameConfig;
use crate::rules::{RollOutcome, resolve_roll};

/// Inline capacity for one roll; larger pools spill to the heap.
const INLINE_DICE: usize = 8;

/// Mutable state owned by one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub remaining_dice: u32,
    pub total_score: u64,
    pub rolls_taken: u32,
}

impl GameState {
    #[must_use]
    pub const fn new(dice_count: u32) -> Self {
        Self {
            remaining_dice: dice_count,
            total_score: 0,
            rolls_taken: 0,
        }
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.remaining_dice == 0
    }

    fn apply(&mut self, outcome: RollOutcome) {
        self.total_score = self.total_score.saturating_add(outcome.score_delta);
        self.remaining_dice = self.remaining_dice.saturating_sub(outcome.dice_removed);
        self.rolls_taken = self.rolls_taken.saturating_add(1);
    }
}

/// One play-through of the game from a full pool to an empty one.
#[derive(Debug, Clone)]
pub struct DiceGame {
    sides_per_die: u32,
    magic_number: u32,
    state: GameState,
    rolls: SmallVec<[u32; INLINE_DICE]>,
}

impl DiceGame {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            sides_per_die: config.sides_per_die,
            magic_number: config.magic_number,
            state: GameState::new(config.dice_count),
            rolls: SmallVec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Faces from the most recent roll.
    #[must_use]
    pub fn last_roll(&self) -> &[u32] {
        &self.rolls
    }

    /// Roll the remaining pool once and apply the elimination rule.
    ///
    /// Returns `None` once the pool is empty; no dice are rolled in that case.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<RollOutcome> {
        if self.state.is_done() {
            return None;
        }

        self.rolls.clear();
        let sides = self.sides_per_die;
        self.rolls
            .extend((0..self.state.remaining_dice).map(|_| rng.gen_range(1..=sides)));

        let outcome = resolve_roll(&self.rolls, self.magic_number)?;
        self.state.apply(outcome);
        Some(outcome)
    }

    /// Play until the pool is empty and return the final state.
    pub fn play<R: Rng + ?Sized>(mut self, rng: &mut R) -> GameState {
        while self.step(rng).is_some() {}
        self.state
    }
}

/// Play one trial and return its final score.
pub fn play_trial<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> u64 {
    DiceGame::new(config).play(rng).total_score
}
