//! Named run configurations selectable from the command line.
use dicesim_game::GameConfig;

/// A named configuration with a short description for `--list-presets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub key: &'static str,
    pub description: &'static str,
    pub config: GameConfig,
}

pub fn catalog_presets() -> Vec<Preset> {
    let base = GameConfig::default();
    vec![
        Preset {
            key: "default",
            description: "Five d6, magic 3, 10,000 games",
            config: base,
        },
        Preset {
            key: "three-dice",
            description: "Quick game with three dice, 5,000 games",
            config: base.with_dice_count(3).with_trial_count(5_000),
        },
        Preset {
            key: "magic-two",
            description: "Magic number 2 instead of 3, 5,000 games",
            config: base.with_magic_number(2).with_trial_count(5_000),
        },
        Preset {
            key: "eight-sided",
            description: "Four d8 with magic 4, 5,000 games",
            config: base
                .with_dice_count(4)
                .with_sides_per_die(8)
                .with_magic_number(4)
                .with_trial_count(5_000),
        },
        Preset {
            key: "quick",
            description: "Default game, 1,000 games",
            config: base.with_trial_count(1_000),
        },
    ]
}

pub fn find_preset(key: &str) -> Option<Preset> {
    catalog_presets()
        .into_iter()
        .find(|preset| preset.key.eq_ignore_ascii_case(key))
}

pub fn list_presets() -> Vec<(&'static str, &'static str)> {
    catalog_presets()
        .into_iter()
        .map(|preset| (preset.key, preset.description))
        .collect()
}

/// Replace the `all` keyword with every catalog key, keeping other entries in order.
pub fn expand_presets(keys: Vec<String>) -> Vec<String> {
    let mut expanded = keys;
    if expanded.iter().any(|key| key.eq_ignore_ascii_case("all")) {
        expanded.retain(|key| !key.eq_ignore_ascii_case("all"));
        for preset in catalog_presets() {
            if !expanded.iter().any(|key| key == preset.key) {
                expanded.push(preset.key.to_string());
            }
        }
    }
    expanded
}
