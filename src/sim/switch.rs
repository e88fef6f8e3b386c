//! One deterministic regime change (rupture, then repair).

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::channel::PerChannel;
use crate::core::engine::run_schedule;
use crate::core::error::{SimResult, check_noise};
use crate::core::regime::Regime;
use crate::sim::{PhaseAnnotation, Simulation, check_initial, default_initial, default_noise_std};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchConfig {
    #[serde(default = "SwitchConfig::default_horizon")]
    pub horizon: usize,
    /// Steps `t < switch_at` use `before`, the rest use `after`.
    #[serde(default = "SwitchConfig::default_switch_at")]
    pub switch_at: usize,
    #[serde(default = "default_initial")]
    pub initial: PerChannel<f64>,
    #[serde(default = "Regime::rupture")]
    pub before: Regime,
    #[serde(default = "Regime::fiduciary")]
    pub after: Regime,
    #[serde(default = "default_noise_std")]
    pub noise_std: f64,
}

impl SwitchConfig {
    fn default_horizon() -> usize {
        300
    }
    fn default_switch_at() -> usize {
        150
    }

    pub fn validate(&self) -> SimResult<()> {
        check_initial(&self.initial)?;
        check_noise(self.noise_std)?;
        self.before.validate()?;
        self.after.validate()
    }

    /// A switch index past the horizon is legal and leaves `before` active throughout.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<Simulation> {
        self.validate()?;
        debug!(
            before = %self.before.name,
            after = %self.after.name,
            switch_at = self.switch_at,
            "switch run"
        );
        let (before, after, switch_at) = (self.before.params, self.after.params, self.switch_at);
        let series = run_schedule(self.horizon, self.initial, self.noise_std, rng, |t, _| {
            if t < switch_at { before } else { after }
        });
        Ok(Simulation {
            series,
            phases: PhaseAnnotation::Switch { at: self.switch_at },
        })
    }
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            horizon: Self::default_horizon(),
            switch_at: Self::default_switch_at(),
            initial: default_initial(),
            before: Regime::rupture(),
            after: Regime::fiduciary(),
            noise_std: default_noise_std(),
        }
    }
}
