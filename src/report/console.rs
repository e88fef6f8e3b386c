//! Small fixed-precision excerpts for eyeballing a run.

use crate::core::channel::Channel;
use crate::core::regime::RegimeLabel;
use crate::sim::{PhaseAnnotation, Simulation};

fn fmt_values(values: &[f64], decimals: usize) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.decimals$}")).collect();
    format!("[{}]", parts.join(", "))
}

/// First `n` values of every channel, four decimals.
pub fn head(sim: &Simulation, n: usize) -> Vec<String> {
    sim.series
        .iter()
        .map(|(c, tr)| {
            let n = n.min(tr.len());
            format!("{:<2}: {}", c.tag(), fmt_values(&tr.values()[..n], 4))
        })
        .collect()
}

/// Values at indices `[at - radius, at + radius]`, four decimals. The window is
/// clipped to the series and always keeps at least its last index.
pub fn around(sim: &Simulation, at: usize, radius: usize) -> Vec<String> {
    sim.series
        .iter()
        .map(|(c, tr)| {
            let last = tr.len() - 1;
            let lo = at.saturating_sub(radius).min(last);
            let hi = at.saturating_add(radius + 1).min(tr.len());
            format!(
                "{:<2} t={lo}..{}: {}",
                c.tag(),
                hi - 1,
                fmt_values(&tr.values()[lo..hi], 4)
            )
        })
        .collect()
}

/// Mean of the last `window` values per channel, three decimals.
pub fn final_means(sim: &Simulation, window: usize) -> String {
    let parts: Vec<String> = Channel::ALL
        .iter()
        .map(|&c| {
            let mean = sim.series.get(c).tail_mean(window);
            format!("{}={mean:.3}", c.tag())
        })
        .collect();
    parts.join(", ")
}

/// One-line description of the phase annotation.
pub fn phase_summary(phases: &PhaseAnnotation) -> String {
    match phases {
        PhaseAnnotation::None => "single regime".to_string(),
        PhaseAnnotation::Switch { at } => format!("switch at t={at}"),
        PhaseAnnotation::Labels(labels) => {
            let c = labels
                .iter()
                .filter(|&&l| l == RegimeLabel::Clientelist)
                .count();
            let share = if labels.is_empty() {
                0.0
            } else {
                c as f64 / labels.len() as f64
            };
            format!("{c}/{} clientelist steps ({share:.3})", labels.len())
        }
        PhaseAnnotation::Blocks(blocks) => {
            let pattern: String = blocks.iter().map(|b| b.regime.short()).collect();
            format!("{} blocks {pattern}", blocks.len())
        }
        PhaseAnnotation::Sessions { mask, .. } => {
            let on = mask.iter().filter(|&&m| m).count();
            format!("{on}/{} indices in session", mask.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::channel::PerChannel;
    use crate::core::engine::run_schedule;
    use crate::core::regime::Regime;
    use crate::sim::PhaseBlock;
    use rand::{SeedableRng, rngs::StdRng};

    fn sample() -> Simulation {
        let params = Regime::fiduciary().params;
        let series = run_schedule(
            10,
            PerChannel::splat(0.5),
            0.0,
            &mut StdRng::seed_from_u64(0),
            |_, _| params,
        );
        Simulation {
            series,
            phases: PhaseAnnotation::None,
        }
    }

    #[test]
    fn head_formats_four_decimals() {
        let lines = head(&sample(), 2);
        assert_eq!(lines[0], "EA: [0.5000, 0.5120]");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn around_clips_at_edges() {
        let lines = around(&sample(), 0, 1);
        assert!(lines[0].starts_with("EA t=0..1:"), "{}", lines[0]);
        let lines = around(&sample(), 10, 5);
        assert!(lines[2].starts_with("D  t=5..10:"), "{}", lines[2]);
    }

    #[test]
    fn around_past_the_end_shows_final_value() {
        let lines = around(&sample(), 301, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("EA t=10..10: ["), "{}", lines[0]);
    }

    #[test]
    fn final_means_match_tail_mean() {
        let sim = sample();
        let expected = format!(
            "EA={:.3}, DT={:.3}, D={:.3}",
            sim.series.autonomy.tail_mean(4),
            sim.series.tolerance.tail_mean(4),
            sim.series.dependence.tail_mean(4)
        );
        assert_eq!(final_means(&sim, 4), expected);
    }

    #[test]
    fn summaries() {
        assert!(final_means(&sample(), 3).starts_with("EA="));
        let blocks = PhaseAnnotation::Blocks(vec![
            PhaseBlock {
                regime: RegimeLabel::Fiduciary,
                start: 0,
                end: 4,
            },
            PhaseBlock {
                regime: RegimeLabel::Clientelist,
                start: 4,
                end: 6,
            },
        ]);
        assert_eq!(phase_summary(&blocks), "2 blocks FC");
        let labels = PhaseAnnotation::Labels(vec![
            RegimeLabel::Clientelist,
            RegimeLabel::Fiduciary,
            RegimeLabel::Fiduciary,
            RegimeLabel::Fiduciary,
        ]);
        assert_eq!(phase_summary(&labels), "1/4 clientelist steps (0.250)");
    }
}
