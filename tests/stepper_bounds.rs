use kmed::core::step::step_asymptotic;
use kmed::core::{ChannelParams, PerChannel, Regime};
use kmed::sim::{IntermittentConfig, OscillatingConfig, StaticConfig, SwitchConfig, TrainingConfig};
use proptest::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

fn in_unit(values: &[f64]) -> bool {
    values.iter().all(|v| (0.0..=1.0).contains(v))
}

proptest! {
    #[test]
    fn single_step_stays_in_unit_interval(
        x in 0.0f64..=1.0,
        rate in 0.0f64..=1.0,
        target in 0.0f64..=1.0,
        noise_std in 0.0f64..2.0,
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let next = step_asymptotic(x, rate, target, noise_std, &mut rng);
        prop_assert!((0.0..=1.0).contains(&next), "{next} out of range");
    }

    #[test]
    fn static_runs_stay_bounded(
        ea in 0.0f64..=1.0,
        dt in 0.0f64..=1.0,
        d in 0.0f64..=1.0,
        target in 0.0f64..=1.0,
        rate in 0.001f64..=1.0,
        noise_std in 0.0f64..0.5,
        seed in any::<u64>(),
    ) {
        let params = PerChannel::splat(ChannelParams::new(target, rate));
        let cfg = StaticConfig {
            horizon: 200,
            initial: PerChannel::new(ea, dt, d),
            regime: Regime::new("probe", params).unwrap(),
            noise_std,
        };
        let sim = cfg.run(&mut StdRng::seed_from_u64(seed)).unwrap();
        for (_, tr) in sim.series.iter() {
            prop_assert_eq!(tr.len(), 201);
            prop_assert!(in_unit(tr.values()));
        }
    }

    #[test]
    fn every_scheduler_stays_bounded(noise_std in 0.0f64..0.3, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let runs = [
            SwitchConfig { noise_std, ..SwitchConfig::default() }.run(&mut rng).unwrap(),
            IntermittentConfig { noise_std, persistence: Some(0.5), ..IntermittentConfig::default() }
                .run(&mut rng)
                .unwrap(),
            OscillatingConfig { noise_std, ..OscillatingConfig::default() }.run(&mut rng).unwrap(),
            TrainingConfig { noise_std, ..TrainingConfig::default() }.run(&mut rng).unwrap(),
        ];
        for sim in &runs {
            for (_, tr) in sim.series.iter() {
                prop_assert!(in_unit(tr.values()));
            }
        }
    }
}
