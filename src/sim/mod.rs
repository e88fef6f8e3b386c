//! Regime schedulers.
//!
//! Each scheduler is a `*Config` record: `validate()` checks every parameter, `run()`
//! validates and then drives [`crate::core::engine::run_schedule`] with a per-step
//! parameter lookup. No trajectory is produced for an invalid configuration.

pub mod fixed;
pub mod intermittent;
pub mod oscillating;
pub mod sweep;
pub mod switch;
pub mod training;

use serde::Serialize;

use crate::core::channel::PerChannel;
use crate::core::error::{SimError, SimResult};
use crate::core::regime::RegimeLabel;
use crate::core::trajectory::Trajectory;

pub use fixed::{StaticComparison, StaticConfig};
pub use intermittent::IntermittentConfig;
pub use oscillating::OscillatingConfig;
pub use sweep::{SweepPoint, sweep_equilibria, sweep_equilibria_seeded};
pub use switch::SwitchConfig;
pub use training::{Session, TrainingConfig};

/// A contiguous run of one regime over `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PhaseBlock {
    pub regime: RegimeLabel,
    pub start: usize,
    pub end: usize,
}

impl PhaseBlock {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// What was active when; built once per run and read by reporting.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum PhaseAnnotation {
    None,
    Switch {
        at: usize,
    },
    /// Regime used for each step `t` (length `T`).
    Labels(Vec<RegimeLabel>),
    Blocks(Vec<PhaseBlock>),
    Sessions {
        /// In-session flag per time index (length `T + 1`).
        mask: Vec<bool>,
        /// Moving target per channel: index 0 is the base target, index `t + 1`
        /// the target used for step `t`.
        targets: PerChannel<Vec<f64>>,
    },
}

#[derive(Clone, Debug)]
pub struct Simulation {
    pub series: PerChannel<Trajectory>,
    pub phases: PhaseAnnotation,
}

impl Simulation {
    pub fn horizon(&self) -> usize {
        self.series.autonomy.horizon()
    }
}

pub(crate) fn default_initial() -> PerChannel<f64> {
    PerChannel::splat(0.5)
}

pub(crate) fn default_noise_std() -> f64 {
    0.004
}

pub(crate) fn check_initial(initial: &PerChannel<f64>) -> SimResult<()> {
    for (channel, &value) in initial.iter() {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(SimError::InvalidInitial {
                channel: channel.name(),
                value,
            });
        }
    }
    Ok(())
}

/// Contiguous `true` runs of a mask as `[start, end)` pairs.
pub fn mask_runs(mask: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &on) in mask.iter().enumerate() {
        match (on, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, mask.len()));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_runs_cover_true_spans() {
        let mask = [false, true, true, false, true, false, false, true];
        assert_eq!(mask_runs(&mask), vec![(1, 3), (4, 5), (7, 8)]);
        assert!(mask_runs(&[false; 4]).is_empty());
        assert_eq!(mask_runs(&[true; 3]), vec![(0, 3)]);
    }

    #[test]
    fn initial_values_must_lie_in_unit_interval() {
        assert!(check_initial(&PerChannel::new(0.0, 0.5, 1.0)).is_ok());
        assert_eq!(
            check_initial(&PerChannel::new(0.5, 0.5, 1.5)),
            Err(SimError::InvalidInitial {
                channel: "dependence",
                value: 1.5
            })
        );
        assert!(matches!(
            check_initial(&PerChannel::new(f64::NAN, 0.5, 0.5)),
            Err(SimError::InvalidInitial {
                channel: "autonomy",
                ..
            })
        ));
    }
}
