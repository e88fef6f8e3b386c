use std::fs::write;
use std::io;
use std::path::Path;

use crate::core::channel::Channel;
use crate::sim::{PhaseAnnotation, Simulation, SweepPoint};

/// Phase tag for time index `t`, empty when nothing applies.
pub fn phase_at(phases: &PhaseAnnotation, t: usize) -> String {
    match phases {
        PhaseAnnotation::None => String::new(),
        PhaseAnnotation::Switch { at } => {
            let side = if t < *at { "before" } else { "after" };
            side.to_string()
        }
        PhaseAnnotation::Labels(labels) => labels
            .get(t)
            .map(|l| l.label().to_string())
            .unwrap_or_default(),
        PhaseAnnotation::Blocks(blocks) => blocks
            .iter()
            .find(|b| b.start <= t && t < b.end)
            .map(|b| b.regime.label().to_string())
            .unwrap_or_default(),
        PhaseAnnotation::Sessions { mask, .. } => match mask.get(t) {
            Some(true) => "session".to_string(),
            Some(false) => "between".to_string(),
            None => String::new(),
        },
    }
}

pub fn series_csv(sim: &Simulation) -> String {
    let mut out = String::from("t,autonomy,tolerance,dependence,phase\n");
    let len = sim.series.autonomy.len();
    for t in 0..len {
        let ea = sim.series.autonomy.values()[t];
        let dt = sim.series.tolerance.values()[t];
        let d = sim.series.dependence.values()[t];
        let phase = phase_at(&sim.phases, t);
        out.push_str(&format!("{t},{ea:.6},{dt:.6},{d:.6},{phase}\n"));
    }
    out
}

pub fn write_series_csv(path: &Path, sim: &Simulation) -> io::Result<()> {
    write(path, series_csv(sim))
}

pub fn equilibria_csv(points: &[SweepPoint]) -> String {
    let mut out = String::from("p,channel,mean,half_width\n");
    for pt in points {
        for c in Channel::ALL {
            let s = pt.stats.get(c);
            out.push_str(&format!(
                "{:.3},{},{:.6},{:.6}\n",
                pt.clientelist_share,
                c.name(),
                s.mean,
                s.half_width
            ));
        }
    }
    out
}

pub fn write_equilibria_csv(path: &Path, points: &[SweepPoint]) -> io::Result<()> {
    write(path, equilibria_csv(points))
}

/// Phase annotation as JSON, for downstream tooling.
pub fn write_phases_json(path: &Path, phases: &PhaseAnnotation) -> io::Result<()> {
    let text = serde_json::to_string_pretty(phases).map_err(io::Error::other)?;
    write(path, text)
}
