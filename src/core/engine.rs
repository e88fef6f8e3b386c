//! The single stepping loop shared by every scheduler.
//!
//! A scheduler is reduced to a per-step parameter lookup. The lookup is called once per
//! step, before the three channel updates, and receives the same random stream so that
//! regime draws and noise draws interleave in one reproducible order:
//! lookup(t), autonomy, tolerance, dependence.

use rand::Rng;

use crate::core::channel::{Channel, PerChannel};
use crate::core::regime::ChannelParams;
use crate::core::step::step_asymptotic;
use crate::core::trajectory::Trajectory;

pub type StepParams = PerChannel<ChannelParams>;

/// Run `horizon` steps from `initial`.
///
/// Callers validate their configuration first; this loop has no failure modes.
/// `horizon == 0` returns length-1 trajectories and never calls `params_at`.
pub fn run_schedule<R, F>(
    horizon: usize,
    initial: PerChannel<f64>,
    noise_std: f64,
    rng: &mut R,
    mut params_at: F,
) -> PerChannel<Trajectory>
where
    R: Rng + ?Sized,
    F: FnMut(usize, &mut R) -> StepParams,
{
    let mut series = initial.map(|x0| Trajectory::with_horizon(x0, horizon));
    for t in 0..horizon {
        let params = params_at(t, rng);
        for channel in Channel::ALL {
            let p = params.get(channel);
            let tr = series.get_mut(channel);
            let next = step_asymptotic(tr.current(), p.rate, p.target, noise_std, rng);
            tr.push(next);
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::regime::Regime;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn lookup_called_once_per_step() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut calls = Vec::new();
        let regime = Regime::fiduciary();
        let out = run_schedule(5, PerChannel::splat(0.5), 0.0, &mut rng, |t, _| {
            calls.push(t);
            regime.params
        });
        assert_eq!(calls, vec![0, 1, 2, 3, 4]);
        assert_eq!(out.autonomy.len(), 6);
    }

    #[test]
    fn zero_horizon_keeps_initial() {
        let mut rng = StdRng::seed_from_u64(0);
        let out = run_schedule(0, PerChannel::new(0.1, 0.2, 0.3), 0.5, &mut rng, |_, _| {
            unreachable!("no steps")
        });
        assert_eq!(out.autonomy.values(), &[0.1]);
        assert_eq!(out.tolerance.values(), &[0.2]);
        assert_eq!(out.dependence.values(), &[0.3]);
    }
}
