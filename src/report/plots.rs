//! PNG rendering of finished runs.
//!
//! Charts are drawn on a `[0, T] x [0, 1]` frame with optional phase shading underneath
//! the series: a marker line for a switch, coloured spans for regime blocks or sessions.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::core::channel::Channel;
use crate::core::regime::RegimeLabel;
use crate::core::trajectory::time_points;
use crate::sim::{PhaseAnnotation, PhaseBlock, SweepPoint, mask_runs};

const SERIES_COLORS: [RGBColor; 6] = [
    BLUE,
    RED,
    RGBColor(0, 140, 60),
    MAGENTA,
    RGBColor(230, 130, 0),
    BLACK,
];
const FIDUCIARY_SHADE: RGBColor = RGBColor(150, 230, 150);
const CLIENTELIST_SHADE: RGBColor = RGBColor(230, 150, 150);
const SESSION_SHADE: RGBColor = RGBColor(200, 240, 200);

pub const TIME_AXIS: &str = "Time (micro-dissonance events)";

#[derive(Clone, Debug, PartialEq)]
pub enum Shading {
    None,
    Marker { at: usize, label: String },
    Blocks(Vec<PhaseBlock>),
    Sessions(Vec<(usize, usize)>),
}

impl Shading {
    /// Shading derived from a run's phase annotation. Per-step labels are not shaded.
    pub fn from_phases(phases: &PhaseAnnotation, switch_label: &str) -> Self {
        match phases {
            PhaseAnnotation::Switch { at } => Shading::Marker {
                at: *at,
                label: switch_label.to_string(),
            },
            PhaseAnnotation::Blocks(blocks) => Shading::Blocks(blocks.clone()),
            PhaseAnnotation::Sessions { mask, .. } => Shading::Sessions(mask_runs(mask)),
            PhaseAnnotation::None | PhaseAnnotation::Labels(_) => Shading::None,
        }
    }
}

pub struct NamedSeries<'a> {
    pub label: String,
    pub values: &'a [f64],
}

pub struct ChartSpec<'a> {
    pub title: String,
    pub y_label: String,
    pub series: Vec<NamedSeries<'a>>,
    pub shading: Shading,
}

impl<'a> ChartSpec<'a> {
    pub fn for_channel(channel: Channel, title: String, series: Vec<NamedSeries<'a>>) -> Self {
        Self {
            title,
            y_label: channel.axis_label().to_string(),
            series,
            shading: Shading::None,
        }
    }

    pub fn with_shading(mut self, shading: Shading) -> Self {
        self.shading = shading;
        self
    }
}

pub fn render_series_chart(
    out_path: &Path,
    spec: &ChartSpec<'_>,
    size: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    let x_max = spec
        .series
        .iter()
        .map(|s| s.values.len().saturating_sub(1))
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let root = BitMapBackend::new(out_path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..x_max, 0.0f64..1.0f64)?;

    chart
        .configure_mesh()
        .x_desc(TIME_AXIS)
        .y_desc(spec.y_label.as_str())
        .draw()?;

    match &spec.shading {
        Shading::None => {}
        Shading::Marker { at, label } => {
            let x = *at as f64;
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(x, 0.0), (x, 1.0)],
                BLACK.mix(0.6).stroke_width(2),
            )))?;
            chart.draw_series(std::iter::once(Text::new(
                label.clone(),
                (x + 2.0, 0.08),
                ("sans-serif", 14),
            )))?;
        }
        Shading::Blocks(blocks) => {
            chart.draw_series(blocks.iter().map(|b| {
                let color = match b.regime {
                    RegimeLabel::Fiduciary => FIDUCIARY_SHADE,
                    RegimeLabel::Clientelist => CLIENTELIST_SHADE,
                };
                Rectangle::new(
                    [(b.start as f64, 0.0), (b.end as f64, 1.0)],
                    color.mix(0.35).filled(),
                )
            }))?;
        }
        Shading::Sessions(runs) => {
            chart.draw_series(runs.iter().map(|&(s, e)| {
                Rectangle::new(
                    [(s as f64, 0.0), (e as f64, 1.0)],
                    SESSION_SHADE.mix(0.6).filled(),
                )
            }))?;
        }
    }

    for (i, s) in spec.series.iter().enumerate() {
        let color = SERIES_COLORS[i % SERIES_COLORS.len()];
        chart
            .draw_series(LineSeries::new(time_points(s.values), color.stroke_width(2)))?
            .label(s.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Tail means against clientelist share, one line per channel with a +/- half-width band.
pub fn render_equilibria_chart(
    out_path: &Path,
    points: &[SweepPoint],
    tail: usize,
    size: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    let p_min = points
        .iter()
        .map(|p| p.clientelist_share)
        .fold(f64::INFINITY, f64::min);
    let p_max = points
        .iter()
        .map(|p| p.clientelist_share)
        .fold(f64::NEG_INFINITY, f64::max);
    let (p_min, p_max) = if p_min.is_finite() && p_max > p_min {
        (p_min, p_max)
    } else {
        (0.0, 1.0)
    };

    let root = BitMapBackend::new(out_path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Equilibrium EA / DT / D vs Clientelist Share",
            ("sans-serif", 20),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(p_min..p_max, 0.0f64..1.0f64)?;

    chart
        .configure_mesh()
        .x_desc("Clientelist share (p)")
        .y_desc(format!("Equilibrium level (last-{tail}-step mean)"))
        .draw()?;

    for (i, channel) in Channel::ALL.into_iter().enumerate() {
        let color = SERIES_COLORS[i];
        let mut band: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (p.clientelist_share, p.stats.get(channel).upper()))
            .collect();
        band.extend(
            points
                .iter()
                .rev()
                .map(|p| (p.clientelist_share, p.stats.get(channel).lower())),
        );
        chart.draw_series(std::iter::once(Polygon::new(band, color.mix(0.15).filled())))?;

        let means: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (p.clientelist_share, p.stats.get(channel).mean))
            .collect();
        chart
            .draw_series(LineSeries::new(means.clone(), color.stroke_width(2)))?
            .label(channel.tag())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        chart.draw_series(
            means
                .into_iter()
                .map(|pt| Circle::new(pt, 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
