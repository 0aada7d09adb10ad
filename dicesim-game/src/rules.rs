//! The elimination rule applied to every roll of the remaining dice.
use serde::{Deserialize, Serialize};

/// Score and pool change produced by one roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub score_delta: u64,
    pub dice_removed: u32,
}

/// Resolve one roll of the pool.
///
/// Any die showing `magic_number` voids the roll: nothing is scored and every
/// magic die leaves the pool. Otherwise the lowest face is scored and exactly
/// one die leaves. Returns `None` for an empty roll.
#[must_use]
pub fn resolve_roll(rolls: &[u32], magic_number: u32) -> Option<RollOutcome> {
    let magic_count = rolls.iter().filter(|&&face| face == magic_number).count();
    if magic_count > 0 {
        return Some(RollOutcome {
            score_delta: 0,
            dice_removed: u32::try_from(magic_count).unwrap_or(u32::MAX),
        });
    }

    rolls.iter().copied().min().map(|lowest| RollOutcome {
        score_delta: u64::from(lowest),
        dice_removed: 1,
    })
}
