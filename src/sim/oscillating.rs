//! Alternating regime blocks of random length (recognition given, then withdrawn).

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::channel::PerChannel;
use crate::core::engine::run_schedule;
use crate::core::error::{SimError, SimResult, check_noise};
use crate::core::regime::{RegimeLabel, RegimePair};
use crate::sim::{
    PhaseAnnotation, PhaseBlock, Simulation, check_initial, default_initial, default_noise_std,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OscillatingConfig {
    #[serde(default = "OscillatingConfig::default_horizon")]
    pub horizon: usize,
    #[serde(default = "default_initial")]
    pub initial: PerChannel<f64>,
    #[serde(default = "OscillatingConfig::default_start")]
    pub start: RegimeLabel,
    /// Shortest block length (inclusive).
    #[serde(default = "OscillatingConfig::default_min_len")]
    pub min_len: usize,
    /// Block length upper bound (exclusive).
    #[serde(default = "OscillatingConfig::default_max_len")]
    pub max_len: usize,
    #[serde(default)]
    pub regimes: RegimePair,
    #[serde(default = "default_noise_std")]
    pub noise_std: f64,
}

impl OscillatingConfig {
    fn default_horizon() -> usize {
        300
    }
    fn default_start() -> RegimeLabel {
        RegimeLabel::Fiduciary
    }
    fn default_min_len() -> usize {
        18
    }
    fn default_max_len() -> usize {
        32
    }

    pub fn validate(&self) -> SimResult<()> {
        check_initial(&self.initial)?;
        check_noise(self.noise_std)?;
        check_block_range(self.min_len, self.max_len)?;
        self.regimes.validate()
    }

    /// Partition the horizon first, then step through it.
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> SimResult<Simulation> {
        self.validate()?;
        let blocks = partition_blocks(self.horizon, self.start, self.min_len, self.max_len, rng)?;
        debug!(blocks = blocks.len(), horizon = self.horizon, "oscillating run");

        let mut by_step = Vec::with_capacity(self.horizon);
        for block in &blocks {
            by_step.extend(std::iter::repeat_n(block.regime, block.len()));
        }
        let regimes = &self.regimes;
        let series = run_schedule(self.horizon, self.initial, self.noise_std, rng, |t, _| {
            regimes.get(by_step[t]).params
        });
        Ok(Simulation {
            series,
            phases: PhaseAnnotation::Blocks(blocks),
        })
    }
}

impl Default for OscillatingConfig {
    fn default() -> Self {
        Self {
            horizon: Self::default_horizon(),
            initial: default_initial(),
            start: Self::default_start(),
            min_len: Self::default_min_len(),
            max_len: Self::default_max_len(),
            regimes: RegimePair::default(),
            noise_std: default_noise_std(),
        }
    }
}

fn check_block_range(min_len: usize, max_len: usize) -> SimResult<()> {
    if min_len == 0 || min_len >= max_len {
        return Err(SimError::InvalidBlockRange { min_len, max_len });
    }
    Ok(())
}

/// Cover `[0, horizon)` with alternating blocks whose lengths are uniform on
/// `[min_len, max_len)`. The last block is cut at `horizon`.
pub fn partition_blocks<R: Rng + ?Sized>(
    horizon: usize,
    start: RegimeLabel,
    min_len: usize,
    max_len: usize,
    rng: &mut R,
) -> SimResult<Vec<PhaseBlock>> {
    check_block_range(min_len, max_len)?;
    let mut blocks = Vec::new();
    let mut t = 0;
    let mut current = start;
    while t < horizon {
        let len = rng.random_range(min_len..max_len);
        let end = horizon.min(t + len);
        blocks.push(PhaseBlock {
            regime: current,
            start: t,
            end,
        });
        t = end;
        current = current.other();
    }
    Ok(blocks)
}
