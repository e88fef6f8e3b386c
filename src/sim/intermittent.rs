//! Random per-step regime exposure, optionally with Markov persistence.
//!
//! Without persistence every step draws clientelist with probability `p`. With
//! persistence `rho` a step repeats the previous regime with probability `rho` and
//! otherwise draws fresh; the first step always draws fresh.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::channel::PerChannel;
use crate::core::engine::run_schedule;
use crate::core::error::{SimError, SimResult, check_noise, check_unit};
use crate::core::regime::{RegimeLabel, RegimePair};
use crate::sim::{PhaseAnnotation, Simulation, check_initial, default_initial, default_noise_std};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntermittentConfig {
    #[serde(default = "IntermittentConfig::default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_initial")]
    pub initial: PerChannel<f64>,
    /// Base probability of a clientelist step.
    #[serde(default = "IntermittentConfig::default_clientelist_share")]
    pub clientelist_share: f64,
    /// Probability of repeating the previous step's regime; `None` draws independently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistence: Option<f64>,
    #[serde(default)]
    pub regimes: RegimePair,
    #[serde(default = "default_noise_std")]
    pub noise_std: f64,
}

impl IntermittentConfig {
    fn default_horizon() -> usize {
        600
    }
    fn default_clientelist_share() -> f64 {
        0.2
    }

    pub fn with_share(&self, clientelist_share: f64) -> Self {
        Self {
            clientelist_share,
            ..self.clone()
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        check_initial(&self.initial)?;
        check_noise(self.noise_std)?;
        check_unit("clientelist_share", self.clientelist_share)?;
        if let Some(rho) = self.persistence {
            if !rho.is_finite() || !(0.0..1.0).contains(&rho) {
                return Err(SimError::InvalidProbability {
                    name: "persistence",
                    value: rho,
                });
            }
        }
        self.regimes.validate()
    }

    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<Simulation> {
        self.validate()?;
        debug!(
            p = self.clientelist_share,
            persistence = ?self.persistence,
            horizon = self.horizon,
            "intermittent run"
        );
        let (p, rho) = (self.clientelist_share, self.persistence);
        let regimes = &self.regimes;
        let mut labels = Vec::with_capacity(self.horizon);
        let mut prev = None;
        let series = run_schedule(self.horizon, self.initial, self.noise_std, rng, |_, rng| {
            let label = draw_regime(prev, p, rho, rng);
            prev = Some(label);
            labels.push(label);
            regimes.get(label).params
        });
        Ok(Simulation {
            series,
            phases: PhaseAnnotation::Labels(labels),
        })
    }
}

impl Default for IntermittentConfig {
    fn default() -> Self {
        Self {
            horizon: Self::default_horizon(),
            initial: default_initial(),
            clientelist_share: Self::default_clientelist_share(),
            persistence: None,
            regimes: RegimePair::default(),
            noise_std: default_noise_std(),
        }
    }
}

/// Pick the regime for one step.
///
/// Consumes one uniform draw for the fresh pick, plus one for the persistence test when
/// both `prev` and `persistence` are present.
pub fn draw_regime<R: Rng + ?Sized>(
    prev: Option<RegimeLabel>,
    clientelist_share: f64,
    persistence: Option<f64>,
    rng: &mut R,
) -> RegimeLabel {
    if let (Some(prev), Some(rho)) = (prev, persistence) {
        if rng.random::<f64>() < rho {
            return prev;
        }
    }
    if rng.random::<f64>() < clientelist_share {
        RegimeLabel::Clientelist
    } else {
        RegimeLabel::Fiduciary
    }
}
