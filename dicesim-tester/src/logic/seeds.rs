use anyhow::{Result, bail};
use dicesim_game::entropy_seed;

/// Where a run seed came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedSource {
    Explicit,
    Entropy,
}

/// Run seed plus its origin, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    pub source: SeedSource,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self {
            seed,
            source: SeedSource::Explicit,
        }
    }

    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            seed: entropy_seed(),
            source: SeedSource::Entropy,
        }
    }

    #[must_use]
    pub const fn is_reproducible(&self) -> bool {
        matches!(self.source, SeedSource::Explicit)
    }
}

/// Resolve the `--seed` argument.
///
/// Supports decimal integers (negative values use their magnitude),
/// `0x`-prefixed hexadecimal, and the keywords `random` / `entropy`.
/// No argument also draws from entropy.
pub fn resolve_seed_input(token: Option<&str>) -> Result<SeedInfo> {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(SeedInfo::from_entropy());
    };

    if token.eq_ignore_ascii_case("random") || token.eq_ignore_ascii_case("entropy") {
        return Ok(SeedInfo::from_entropy());
    }

    if let Ok(value) = token.parse::<u64>() {
        return Ok(SeedInfo::from_numeric(value));
    }

    if let Ok(value) = token.parse::<i64>() {
        return Ok(SeedInfo::from_numeric(value.unsigned_abs()));
    }

    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        && let Ok(value) = u64::from_str_radix(&hex.replace('_', ""), 16)
    {
        return Ok(SeedInfo::from_numeric(value));
    }

    bail!("Unrecognized seed token: {token}");
}
