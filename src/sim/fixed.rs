//! One regime for the whole horizon, and the paired scaffold/suppression contrast.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::channel::PerChannel;
use crate::core::engine::run_schedule;
use crate::core::error::{SimResult, check_noise};
use crate::core::regime::Regime;
use crate::sim::{PhaseAnnotation, Simulation, check_initial, default_initial, default_noise_std};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticConfig {
    #[serde(default = "StaticConfig::default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_initial")]
    pub initial: PerChannel<f64>,
    #[serde(default = "Regime::fiduciary")]
    pub regime: Regime,
    #[serde(default = "default_noise_std")]
    pub noise_std: f64,
}

impl StaticConfig {
    fn default_horizon() -> usize {
        250
    }

    pub fn validate(&self) -> SimResult<()> {
        check_initial(&self.initial)?;
        check_noise(self.noise_std)?;
        self.regime.validate()
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<Simulation> {
        self.validate()?;
        debug!(regime = %self.regime.name, horizon = self.horizon, "static run");
        let params = self.regime.params;
        let series = run_schedule(self.horizon, self.initial, self.noise_std, rng, |_, _| {
            params
        });
        Ok(Simulation {
            series,
            phases: PhaseAnnotation::None,
        })
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            horizon: Self::default_horizon(),
            initial: default_initial(),
            regime: Regime::fiduciary(),
            noise_std: default_noise_std(),
        }
    }
}

/// Two static runs under contrasting regimes, same start and noise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticComparison {
    #[serde(default = "StaticConfig::default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_initial")]
    pub initial: PerChannel<f64>,
    #[serde(default = "default_noise_std")]
    pub noise_std: f64,
    #[serde(default = "Regime::fiduciary")]
    pub primary: Regime,
    #[serde(default = "Regime::clientelist")]
    pub contrast: Regime,
}

impl StaticComparison {
    fn config_for(&self, regime: &Regime) -> StaticConfig {
        StaticConfig {
            horizon: self.horizon,
            initial: self.initial,
            regime: regime.clone(),
            noise_std: self.noise_std,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        self.config_for(&self.primary).validate()?;
        self.contrast.validate()
    }

    /// Runs `primary` then `contrast` on the same stream.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<(Simulation, Simulation)> {
        self.validate()?;
        let primary = self.config_for(&self.primary).run(rng)?;
        let contrast = self.config_for(&self.contrast).run(rng)?;
        Ok((primary, contrast))
    }
}

impl Default for StaticComparison {
    fn default() -> Self {
        Self {
            horizon: StaticConfig::default_horizon(),
            initial: default_initial(),
            noise_std: default_noise_std(),
            primary: Regime::fiduciary(),
            contrast: Regime::clientelist(),
        }
    }
}
