use anyhow::{Context, Result};
use std::{fs, path::Path};

use dicesim_game::GameConfig;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Read a JSON configuration document; absent fields keep their defaults.
pub fn load_config_file(path: &Path) -> Result<GameConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    GameConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}
