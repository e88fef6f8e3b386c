//! Session-driven target adaptation.
//!
//! A single regime whose targets themselves move toward final values: quickly inside
//! scheduled sessions (with faster step rates) and slowly in between.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::channel::{Channel, PerChannel};
use crate::core::engine::run_schedule;
use crate::core::error::{SimError, SimResult, check_noise, check_unit};
use crate::core::regime::ChannelParams;
use crate::sim::{PhaseAnnotation, Simulation, check_initial, default_initial, default_noise_std};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub start: usize,
    pub duration: usize,
}

impl Session {
    pub const fn new(start: usize, duration: usize) -> Self {
        Self { start, duration }
    }
}

/// `count` sessions of `duration` steps, `spacing` apart, the first at `first`.
pub fn regular_sessions(first: usize, spacing: usize, duration: usize, count: usize) -> Vec<Session> {
    (0..count)
        .map(|i| Session::new(first + i * spacing, duration))
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    #[serde(default = "TrainingConfig::default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_initial")]
    pub initial: PerChannel<f64>,
    #[serde(default = "TrainingConfig::default_base_targets")]
    pub base_targets: PerChannel<f64>,
    #[serde(default = "TrainingConfig::default_final_targets")]
    pub final_targets: PerChannel<f64>,
    /// Step rates between sessions.
    #[serde(default = "TrainingConfig::default_base_rates")]
    pub base_rates: PerChannel<f64>,
    /// Step rates inside sessions.
    #[serde(default = "TrainingConfig::default_session_rates")]
    pub session_rates: PerChannel<f64>,
    #[serde(default = "TrainingConfig::default_adapt_rate")]
    pub adapt_rate: f64,
    #[serde(default = "TrainingConfig::default_consolidate_rate")]
    pub consolidate_rate: f64,
    #[serde(default = "default_noise_std")]
    pub noise_std: f64,
    #[serde(default = "TrainingConfig::default_sessions")]
    pub sessions: Vec<Session>,
}

impl TrainingConfig {
    fn default_horizon() -> usize {
        320
    }
    fn default_base_targets() -> PerChannel<f64> {
        PerChannel::new(0.25, 0.30, 0.60)
    }
    fn default_final_targets() -> PerChannel<f64> {
        PerChannel::new(0.75, 0.80, 0.18)
    }
    fn default_base_rates() -> PerChannel<f64> {
        PerChannel::new(0.025, 0.025, 0.030)
    }
    fn default_session_rates() -> PerChannel<f64> {
        PerChannel::new(0.060, 0.070, 0.060)
    }
    fn default_adapt_rate() -> f64 {
        0.20
    }
    fn default_consolidate_rate() -> f64 {
        0.02
    }
    fn default_sessions() -> Vec<Session> {
        regular_sessions(20, 40, 20, 8)
    }

    pub fn validate(&self) -> SimResult<()> {
        check_initial(&self.initial)?;
        check_noise(self.noise_std)?;
        check_unit("adapt_rate", self.adapt_rate)?;
        check_unit("consolidate_rate", self.consolidate_rate)?;
        for channel in Channel::ALL {
            for (kind, value) in [
                ("base_targets", *self.base_targets.get(channel)),
                ("final_targets", *self.final_targets.get(channel)),
            ] {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(SimError::InvalidTarget {
                        name: format!("{kind}.{}", channel.name()),
                        value,
                    });
                }
            }
            for (kind, value) in [
                ("base_rates", *self.base_rates.get(channel)),
                ("session_rates", *self.session_rates.get(channel)),
            ] {
                if !value.is_finite() || value <= 0.0 || value > 1.0 {
                    return Err(SimError::InvalidRate {
                        name: format!("{kind}.{}", channel.name()),
                        value,
                    });
                }
            }
        }
        if self.sessions.is_empty() {
            return Err(SimError::InvalidSessions("no sessions".to_string()));
        }
        if let Some(s) = self.sessions.iter().find(|s| s.duration == 0) {
            return Err(SimError::InvalidSessions(format!(
                "session at {} has zero duration",
                s.start
            )));
        }
        Ok(())
    }

    /// In-session flags over `[0, horizon]`. Windows are clipped at the horizon and
    /// overlapping windows simply union.
    pub fn session_mask(&self) -> Vec<bool> {
        let len = self.horizon + 1;
        let mut mask = vec![false; len];
        for s in &self.sessions {
            let end = s.start.saturating_add(s.duration).min(len);
            for slot in mask.iter_mut().take(end).skip(s.start) {
                *slot = true;
            }
        }
        mask
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<Simulation> {
        self.validate()?;
        let mask = self.session_mask();
        debug!(
            sessions = self.sessions.len(),
            in_session_steps = mask.iter().filter(|&&m| m).count(),
            "training run"
        );

        let mut target = self.base_targets;
        let mut history = self.base_targets.map(|t0| {
            let mut v = Vec::with_capacity(self.horizon + 1);
            v.push(t0);
            v
        });
        let series = run_schedule(self.horizon, self.initial, self.noise_std, rng, |t, _| {
            let (pull, rates) = if mask[t] {
                (self.adapt_rate, self.session_rates)
            } else {
                (self.consolidate_rate, self.base_rates)
            };
            let mut params = PerChannel::splat(ChannelParams::new(0.0, 0.0));
            for channel in Channel::ALL {
                let goal = target.get_mut(channel);
                *goal += pull * (self.final_targets.get(channel) - *goal);
                history.get_mut(channel).push(*goal);
                *params.get_mut(channel) = ChannelParams::new(*goal, *rates.get(channel));
            }
            params
        });
        Ok(Simulation {
            series,
            phases: PhaseAnnotation::Sessions {
                mask,
                targets: history,
            },
        })
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            horizon: Self::default_horizon(),
            initial: default_initial(),
            base_targets: Self::default_base_targets(),
            final_targets: Self::default_final_targets(),
            base_rates: Self::default_base_rates(),
            session_rates: Self::default_session_rates(),
            adapt_rate: Self::default_adapt_rate(),
            consolidate_rate: Self::default_consolidate_rate(),
            noise_std: default_noise_std(),
            sessions: Self::default_sessions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::mask_runs;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn default_schedule_mask() {
        let cfg = TrainingConfig::default();
        let mask = cfg.session_mask();
        assert_eq!(mask.len(), 321);
        let runs = mask_runs(&mask);
        assert_eq!(runs.len(), 8);
        assert_eq!(runs[0], (20, 40));
        assert_eq!(runs[7], (300, 320));
    }

    #[test]
    fn overlapping_sessions_union() {
        let cfg = TrainingConfig {
            horizon: 50,
            sessions: vec![Session::new(5, 10), Session::new(10, 10), Session::new(45, 100)],
            ..TrainingConfig::default()
        };
        assert_eq!(mask_runs(&cfg.session_mask()), vec![(5, 20), (45, 51)]);
    }

    #[test]
    fn targets_move_faster_in_session() {
        let cfg = TrainingConfig::default();
        let sim = cfg.run(&mut StdRng::seed_from_u64(42)).unwrap();
        let PhaseAnnotation::Sessions { mask, targets } = &sim.phases else {
            panic!("expected sessions");
        };
        let ea = &targets.autonomy;
        assert_eq!(ea.len(), 321);
        // step 19 is the last step before the first session, step 20 the first inside
        let outside = ea[20] - ea[19];
        let inside = ea[21] - ea[20];
        assert!(!mask[19] && mask[20]);
        assert!(inside > outside && outside > 0.0);
    }

    #[test]
    fn rejects_malformed_schedules() {
        let cfg = TrainingConfig {
            sessions: Vec::new(),
            ..TrainingConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SimError::InvalidSessions(_))));
        let cfg = TrainingConfig {
            sessions: vec![Session::new(3, 0)],
            ..TrainingConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SimError::InvalidSessions(_))));
        let mut cfg = TrainingConfig::default();
        cfg.session_rates.tolerance = 0.0;
        assert!(matches!(cfg.validate(), Err(SimError::InvalidRate { .. })));
    }

    #[test]
    fn dependence_target_falls() {
        let sim = TrainingConfig::default()
            .run(&mut StdRng::seed_from_u64(1))
            .unwrap();
        let PhaseAnnotation::Sessions { targets, .. } = &sim.phases else {
            panic!("expected sessions");
        };
        let d = &targets.dependence;
        assert!(d.windows(2).all(|w| w[1] <= w[0]));
        assert!(d[320] < 0.25);
    }
}
