use dicesim_game::constants::REFERENCE_SEED;
use dicesim_game::{Execution, GameConfig, SimulationRunner, resolve_roll};

const SAMPLE_SIZE: u64 = 60_000;
const TOLERANCE: f64 = 0.01;

fn runner() -> SimulationRunner {
    SimulationRunner::new().with_seed(REFERENCE_SEED)
}

/// Expected final score by enumerating every roll of the pool.
fn exact_mean(dice: u32, sides: u32, magic: u32) -> f64 {
    if dice == 0 {
        return 0.0;
    }
    let total = sides.pow(dice);
    let mut acc = 0.0;
    for code in 0..total {
        let mut rest = code;
        let faces: Vec<u32> = (0..dice)
            .map(|_| {
                let face = rest % sides + 1;
                rest /= sides;
                face
            })
            .collect();
        let outcome = resolve_roll(&faces, magic).expect("non-empty roll");
        let score = f64::from(u32::try_from(outcome.score_delta).expect("score fits"));
        acc += score + exact_mean(dice - outcome.dice_removed, sides, magic);
    }
    acc / f64::from(total)
}

#[test]
fn single_die_support_is_faces_with_magic_folded_into_zero() {
    let config = GameConfig::default()
        .with_dice_count(1)
        .with_trial_count(SAMPLE_SIZE);
    let report = runner().run(&config).expect("valid config");

    let support: Vec<u64> = report.distribution.iter().map(|(score, _)| score).collect();
    assert_eq!(support, vec![0, 1, 2, 4, 5, 6]);
    assert_eq!(report.distribution.count(3), 0);

    for score in support {
        let observed = report.distribution.probability(score);
        assert!(
            (observed - 1.0 / 6.0).abs() <= TOLERANCE,
            "score {score} drifted: observed {observed:.4}"
        );
    }
}

#[test]
fn counts_are_conserved_across_configurations() {
    let configs = [
        GameConfig::default().with_trial_count(7_919),
        GameConfig::default()
            .with_dice_count(3)
            .with_trial_count(5_000),
        GameConfig::default()
            .with_dice_count(4)
            .with_sides_per_die(8)
            .with_magic_number(4)
            .with_trial_count(5_000),
        GameConfig::default().with_magic_number(2).with_trial_count(1),
    ];
    for config in configs {
        let report = runner().run(&config).expect("valid config");
        assert_eq!(report.distribution.total(), config.trial_count, "{config}");
    }
}

#[test]
fn mean_tracks_exact_expectation_for_small_pools() {
    for (dice, sides, magic) in [(1, 6, 3), (2, 6, 3), (3, 6, 3), (3, 4, 1)] {
        let config = GameConfig::default()
            .with_dice_count(dice)
            .with_sides_per_die(sides)
            .with_magic_number(magic)
            .with_trial_count(SAMPLE_SIZE);
        let report = runner().run(&config).expect("valid config");
        let expected = exact_mean(dice, sides, magic);
        assert!(
            (report.statistics.mean - expected).abs() <= 0.1,
            "{config}: observed mean {:.4}, expected {expected:.4}",
            report.statistics.mean
        );
    }
}

#[test]
fn scheduling_does_not_change_the_distribution() {
    let config = GameConfig::default().with_trial_count(20_000);
    let parallel = runner().run(&config).expect("valid config");
    let sequential = runner()
        .with_execution(Execution::Sequential)
        .run(&config)
        .expect("valid config");
    assert_eq!(parallel.distribution, sequential.distribution);
}

#[test]
fn default_game_statistics_are_consistent() {
    let report = runner().run(&GameConfig::default()).expect("valid config");
    let stats = &report.statistics;
    let min = f64::from(u32::try_from(stats.min).expect("min fits"));
    let max = f64::from(u32::try_from(stats.max).expect("max fits"));
    assert!(min <= stats.mean && stats.mean <= max);
    assert_eq!(stats.min, 0);
    assert_eq!(stats.unique_scores, report.distribution.unique_scores());
    assert!(stats.throughput > 0.0);
    // Five d6 can never score more than five sixes.
    assert!(stats.max <= 30);
}
