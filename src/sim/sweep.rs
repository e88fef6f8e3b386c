//! Long-run equilibria over a grid of clientelist shares.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::Serialize;
use tracing::debug;

use crate::core::channel::PerChannel;
use crate::core::error::{SimError, SimResult};
use crate::core::stats::{TailStats, tail_stats};
use crate::sim::Simulation;
use crate::sim::intermittent::IntermittentConfig;

#[derive(Clone, Debug, Serialize)]
pub struct SweepPoint {
    pub clientelist_share: f64,
    pub stats: PerChannel<TailStats>,
}

/// Tail statistics for every channel of a finished run.
pub fn equilibrium(sim: &Simulation, tail: usize) -> SimResult<PerChannel<TailStats>> {
    sim.series
        .as_ref()
        .try_map(|tr| tail_stats(tr.values(), tail))
}

fn check_sweep(base: &IntermittentConfig, grid: &[f64], tail: usize) -> SimResult<()> {
    if grid.is_empty() {
        return Err(SimError::EmptyGrid);
    }
    for &p in grid {
        base.with_share(p).validate()?;
    }
    if tail < 2 || tail > base.horizon {
        return Err(SimError::InvalidTailWindow {
            tail,
            len: base.horizon + 1,
        });
    }
    Ok(())
}

/// Run every grid point in order on one shared stream.
///
/// Returns the trajectories alongside the statistics, in grid order. The whole grid is
/// validated before the first run.
pub fn sweep_equilibria<R: Rng + ?Sized>(
    base: &IntermittentConfig,
    grid: &[f64],
    tail: usize,
    rng: &mut R,
) -> SimResult<Vec<(SweepPoint, Simulation)>> {
    check_sweep(base, grid, tail)?;
    grid.iter()
        .map(|&p| {
            let sim = base.with_share(p).run(rng)?;
            let stats = equilibrium(&sim, tail)?;
            debug!(p, ea = stats.autonomy.mean, d = stats.dependence.mean, "sweep point");
            Ok((
                SweepPoint {
                    clientelist_share: p,
                    stats,
                },
                sim,
            ))
        })
        .collect()
}

/// Like [`sweep_equilibria`], but grid point `i` gets its own stream seeded with
/// `base_seed + i`, so each result is independent of which other points run.
pub fn sweep_equilibria_seeded(
    base: &IntermittentConfig,
    grid: &[f64],
    tail: usize,
    base_seed: u64,
) -> SimResult<Vec<(SweepPoint, Simulation)>> {
    check_sweep(base, grid, tail)?;
    grid.iter()
        .enumerate()
        .map(|(i, &p)| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            let sim = base.with_share(p).run(&mut rng)?;
            let stats = equilibrium(&sim, tail)?;
            Ok((
                SweepPoint {
                    clientelist_share: p,
                    stats,
                },
                sim,
            ))
        })
        .collect()
}
