use kmed::core::{PerChannel, RegimeLabel};
use kmed::sim::oscillating::partition_blocks;
use kmed::sim::{
    IntermittentConfig, OscillatingConfig, PhaseAnnotation, Simulation, StaticComparison,
    StaticConfig, SwitchConfig, TrainingConfig,
};
use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};

fn values(sim: &Simulation) -> Vec<Vec<f64>> {
    sim.series.iter().map(|(_, tr)| tr.values().to_vec()).collect()
}

proptest! {
    #[test]
    fn blocks_cover_horizon_without_gaps(
        horizon in 0usize..2_000,
        min_len in 1usize..40,
        extra in 1usize..40,
        seed in any::<u64>(),
        start_clientelist in any::<bool>(),
    ) {
        let max_len = min_len + extra;
        let start = if start_clientelist { RegimeLabel::Clientelist } else { RegimeLabel::Fiduciary };
        let mut rng = StdRng::seed_from_u64(seed);
        let blocks = partition_blocks(horizon, start, min_len, max_len, &mut rng).unwrap();

        if horizon == 0 {
            prop_assert!(blocks.is_empty());
            return Ok(());
        }
        prop_assert_eq!(blocks[0].start, 0);
        prop_assert_eq!(blocks[0].regime, start);
        prop_assert_eq!(blocks[blocks.len() - 1].end, horizon);
        for pair in blocks.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
            prop_assert_ne!(pair[0].regime, pair[1].regime);
        }
        for b in &blocks[..blocks.len() - 1] {
            prop_assert!(b.len() >= min_len && b.len() < max_len);
        }
        let last = blocks[blocks.len() - 1];
        prop_assert!(last.len() >= 1 && last.len() < max_len);
    }
}

#[test]
fn zero_horizon_returns_initial_and_draws_nothing() {
    let initial = PerChannel::new(0.2, 0.4, 0.9);
    let fresh_next = StdRng::seed_from_u64(9).random::<u64>();

    let mut runs: Vec<(&str, Simulation, StdRng)> = Vec::new();
    let mut rng = StdRng::seed_from_u64(9);
    let sim = StaticConfig { horizon: 0, initial, ..StaticConfig::default() }
        .run(&mut rng)
        .unwrap();
    runs.push(("static", sim, rng));
    let mut rng = StdRng::seed_from_u64(9);
    let sim = SwitchConfig { horizon: 0, switch_at: 0, initial, ..SwitchConfig::default() }
        .run(&mut rng)
        .unwrap();
    runs.push(("switch", sim, rng));
    let mut rng = StdRng::seed_from_u64(9);
    let sim = IntermittentConfig {
        horizon: 0,
        initial,
        persistence: Some(0.9),
        ..IntermittentConfig::default()
    }
    .run(&mut rng)
    .unwrap();
    runs.push(("intermittent", sim, rng));
    let mut rng = StdRng::seed_from_u64(9);
    let sim = OscillatingConfig { horizon: 0, initial, ..OscillatingConfig::default() }
        .run(&mut rng)
        .unwrap();
    runs.push(("oscillating", sim, rng));
    let mut rng = StdRng::seed_from_u64(9);
    let sim = TrainingConfig { horizon: 0, initial, ..TrainingConfig::default() }
        .run(&mut rng)
        .unwrap();
    runs.push(("training", sim, rng));

    for (name, sim, mut rng) in runs {
        assert_eq!(sim.horizon(), 0, "{name}");
        assert_eq!(sim.series.autonomy.values(), &[0.2], "{name}");
        assert_eq!(sim.series.tolerance.values(), &[0.4], "{name}");
        assert_eq!(sim.series.dependence.values(), &[0.9], "{name}");
        assert_eq!(rng.random::<u64>(), fresh_next, "{name} consumed randomness");
    }
}

#[test]
fn zero_noise_ignores_stream_state() {
    let cfg = StaticComparison {
        noise_std: 0.0,
        ..StaticComparison::default()
    };
    let (a1, c1) = cfg.run(&mut StdRng::seed_from_u64(1)).unwrap();
    let (a2, c2) = cfg.run(&mut StdRng::seed_from_u64(999)).unwrap();
    assert_eq!(values(&a1), values(&a2));
    assert_eq!(values(&c1), values(&c2));
}

#[test]
fn same_seed_reproduces_each_scheduler() {
    let seeded = |seed| StdRng::seed_from_u64(seed);

    let cfg = SwitchConfig::default();
    assert_eq!(values(&cfg.run(&mut seeded(5)).unwrap()), values(&cfg.run(&mut seeded(5)).unwrap()));
    assert_ne!(values(&cfg.run(&mut seeded(5)).unwrap()), values(&cfg.run(&mut seeded(6)).unwrap()));

    let cfg = IntermittentConfig {
        persistence: Some(0.6),
        ..IntermittentConfig::default()
    };
    let a = cfg.run(&mut seeded(5)).unwrap();
    let b = cfg.run(&mut seeded(5)).unwrap();
    assert_eq!(values(&a), values(&b));
    assert_eq!(a.phases, b.phases);

    let cfg = OscillatingConfig::default();
    let a = cfg.run(&mut seeded(5)).unwrap();
    let b = cfg.run(&mut seeded(5)).unwrap();
    assert_eq!(values(&a), values(&b));
    assert_eq!(a.phases, b.phases);
    let c = cfg.run(&mut seeded(6)).unwrap();
    assert_ne!(values(&a), values(&c));

    let cfg = TrainingConfig::default();
    assert_eq!(values(&cfg.run(&mut seeded(5)).unwrap()), values(&cfg.run(&mut seeded(5)).unwrap()));
}

#[test]
fn switch_boundaries_match_static_runs() {
    let sw = SwitchConfig::default();
    let after_only = StaticConfig {
        horizon: sw.horizon,
        initial: sw.initial,
        regime: sw.after.clone(),
        noise_std: sw.noise_std,
    };
    let before_only = StaticConfig {
        regime: sw.before.clone(),
        ..after_only.clone()
    };

    let at_zero = SwitchConfig { switch_at: 0, ..sw.clone() };
    assert_eq!(
        values(&at_zero.run(&mut StdRng::seed_from_u64(3)).unwrap()),
        values(&after_only.run(&mut StdRng::seed_from_u64(3)).unwrap())
    );

    let past_end = SwitchConfig { switch_at: sw.horizon + 50, ..sw };
    assert_eq!(
        values(&past_end.run(&mut StdRng::seed_from_u64(3)).unwrap()),
        values(&before_only.run(&mut StdRng::seed_from_u64(3)).unwrap())
    );
}

#[test]
fn invalid_configurations_fail_before_running() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(StaticConfig { noise_std: -0.1, ..StaticConfig::default() }.run(&mut rng).is_err());
    assert!(OscillatingConfig { min_len: 30, max_len: 20, ..OscillatingConfig::default() }
        .run(&mut rng)
        .is_err());
    assert!(IntermittentConfig { clientelist_share: 1.5, ..IntermittentConfig::default() }
        .run(&mut rng)
        .is_err());
    assert!(TrainingConfig { sessions: Vec::new(), ..TrainingConfig::default() }
        .run(&mut rng)
        .is_err());
}

#[test]
fn oscillating_annotation_matches_blocks() {
    let sim = OscillatingConfig::default()
        .run(&mut StdRng::seed_from_u64(42))
        .unwrap();
    let PhaseAnnotation::Blocks(blocks) = &sim.phases else {
        panic!("expected blocks");
    };
    assert_eq!(blocks.iter().map(|b| b.len()).sum::<usize>(), 300);
}
