// Experiment driver: runs each scenario on a freshly seeded stream, then hands the
// finished runs to reporting.
use std::error::Error;
use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use kmed::config::AppConfig;
use kmed::core::channel::Channel;
use kmed::report::console;
use kmed::report::csv::{write_equilibria_csv, write_phases_json, write_series_csv};
use kmed::report::plots::{
    ChartSpec, NamedSeries, Shading, render_equilibria_chart, render_series_chart,
};
use kmed::sim::{
    PhaseAnnotation, Simulation, SweepPoint, sweep_equilibria, sweep_equilibria_seeded,
};

use crate::cli::Experiment;

pub struct App {
    cfg: AppConfig,
    out_dir: PathBuf,
    plots: bool,
}

impl App {
    pub fn new(cfg: AppConfig, plots: bool) -> Result<Self, Box<dyn Error>> {
        let out_dir = PathBuf::from(&cfg.run.output_dir);
        create_dir_all(&out_dir)?;
        Ok(Self {
            cfg,
            out_dir,
            plots,
        })
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.cfg.run.seed)
    }

    fn path(&self, name: String) -> PathBuf {
        self.out_dir.join(name)
    }

    pub fn run(&self, exp: Experiment) -> Result<(), Box<dyn Error>> {
        info!("running {exp:?} (seed {})", self.cfg.run.seed);
        match exp {
            Experiment::Fixed => self.run_fixed(),
            Experiment::Switch => self.run_switch(),
            Experiment::Intermittent => self.run_intermittent(),
            Experiment::Oscillating => self.run_oscillating(),
            Experiment::Training => self.run_training(),
            Experiment::All => {
                for each in Experiment::EACH {
                    self.run(each)?;
                }
                Ok(())
            }
        }
    }

    fn log_lines(&self, heading: &str, lines: &[String]) {
        info!("{heading}");
        for line in lines {
            info!("  {line}");
        }
    }

    /// One chart per channel; `series_for` supplies the overlaid lines.
    fn channel_charts<'a, F>(
        &self,
        prefix: &str,
        title: &str,
        shading: &Shading,
        mut series_for: F,
    ) -> Result<(), Box<dyn Error>>
    where
        F: FnMut(Channel) -> Vec<NamedSeries<'a>>,
    {
        if !self.plots {
            return Ok(());
        }
        for channel in Channel::ALL {
            let spec = ChartSpec::for_channel(
                channel,
                format!("{} {title}", channel.tag()),
                series_for(channel),
            )
            .with_shading(shading.clone());
            let path = self.path(format!("{prefix}_{}.png", channel.tag()));
            render_series_chart(&path, &spec, self.cfg.run.plot_size())?;
            debug!("wrote {}", path.display());
        }
        Ok(())
    }

    fn run_fixed(&self) -> Result<(), Box<dyn Error>> {
        let prefix = Experiment::Fixed.file_prefix();
        let cmp = &self.cfg.fixed;
        let (primary, contrast) = cmp.run(&mut self.rng())?;

        self.log_lines(
            &format!("{} (first {})", cmp.primary.name, self.cfg.run.head),
            &console::head(&primary, self.cfg.run.head),
        );
        self.log_lines(
            &format!("{} (first {})", cmp.contrast.name, self.cfg.run.head),
            &console::head(&contrast, self.cfg.run.head),
        );

        write_series_csv(&self.path(format!("{prefix}_{}.csv", cmp.primary.name)), &primary)?;
        write_series_csv(&self.path(format!("{prefix}_{}.csv", cmp.contrast.name)), &contrast)?;

        let title = format!("under {} vs {}", cmp.primary.name, cmp.contrast.name);
        self.channel_charts(prefix, &title, &Shading::None, |c| {
            vec![
                NamedSeries {
                    label: format!("{} ({})", c.tag(), cmp.primary.name),
                    values: primary.series.get(c).values(),
                },
                NamedSeries {
                    label: format!("{} ({})", c.tag(), cmp.contrast.name),
                    values: contrast.series.get(c).values(),
                },
            ]
        })
    }

    fn run_switch(&self) -> Result<(), Box<dyn Error>> {
        let prefix = Experiment::Switch.file_prefix();
        let cfg = &self.cfg.switch;
        let sim = cfg.run(&mut self.rng())?;

        self.log_lines(
            &format!("around switch t={}", cfg.switch_at),
            &console::around(&sim, cfg.switch_at, 3),
        );
        info!("final means: {}", console::final_means(&sim, self.cfg.run.tail));
        write_series_csv(&self.path(format!("{prefix}.csv")), &sim)?;

        let label = format!("switch ({} -> {})", cfg.before.name, cfg.after.name);
        let title = format!("under {} -> {} regime switching", cfg.before.name, cfg.after.name);
        self.channel_charts(
            prefix,
            &title,
            &Shading::from_phases(&sim.phases, &label),
            |c| {
                vec![NamedSeries {
                    label: format!("{} (regime switching)", c.tag()),
                    values: sim.series.get(c).values(),
                }]
            },
        )
    }

    fn run_intermittent(&self) -> Result<(), Box<dyn Error>> {
        let prefix = Experiment::Intermittent.file_prefix();
        let run = &self.cfg.run;
        let base = &self.cfg.intermittent;
        let results: Vec<(SweepPoint, Simulation)> = if run.seeded_sweep {
            sweep_equilibria_seeded(base, &run.sweep_grid, run.tail, run.seed)?
        } else {
            sweep_equilibria(base, &run.sweep_grid, run.tail, &mut self.rng())?
        };

        for (pt, sim) in &results {
            info!(
                "p={:.2}: {} | {}",
                pt.clientelist_share,
                console::phase_summary(&sim.phases),
                console::final_means(sim, run.tail)
            );
            let name = format!("{prefix}_p{:03}.csv", (pt.clientelist_share * 100.0).round() as u32);
            write_series_csv(&self.path(name), sim)?;
        }

        let points: Vec<SweepPoint> = results.iter().map(|(pt, _)| pt.clone()).collect();
        write_equilibria_csv(&self.path(format!("{prefix}_equilibria.csv")), &points)?;

        self.channel_charts(
            &format!("{prefix}_trajectories"),
            "under intermittent clientelism (variable share)",
            &Shading::None,
            |c| {
                results
                    .iter()
                    .map(|(pt, sim)| NamedSeries {
                        label: format!("p={:.1}", pt.clientelist_share),
                        values: sim.series.get(c).values(),
                    })
                    .collect()
            },
        )?;
        if self.plots {
            let path = self.path(format!("{prefix}_equilibria_vs_p.png"));
            render_equilibria_chart(&path, &points, run.tail, run.plot_size())?;
        }
        Ok(())
    }

    fn run_oscillating(&self) -> Result<(), Box<dyn Error>> {
        let prefix = Experiment::Oscillating.file_prefix();
        let sim = self.cfg.oscillating.run(&mut self.rng())?;

        info!("{}", console::phase_summary(&sim.phases));
        self.log_lines(
            &format!("first {} steps", self.cfg.run.head),
            &console::head(&sim, self.cfg.run.head),
        );
        write_series_csv(&self.path(format!("{prefix}.csv")), &sim)?;
        write_phases_json(&self.path(format!("{prefix}_phases.json")), &sim.phases)?;

        self.channel_charts(
            prefix,
            "under oscillating recognition/withdrawal",
            &Shading::from_phases(&sim.phases, ""),
            |c| {
                vec![NamedSeries {
                    label: format!("{} (oscillating)", c.tag()),
                    values: sim.series.get(c).values(),
                }]
            },
        )
    }

    fn run_training(&self) -> Result<(), Box<dyn Error>> {
        let prefix = Experiment::Training.file_prefix();
        let sim = self.cfg.training.run(&mut self.rng())?;

        info!("{}", console::phase_summary(&sim.phases));
        info!(
            "final (mean of last {}): {}",
            self.cfg.run.tail,
            console::final_means(&sim, self.cfg.run.tail)
        );
        write_series_csv(&self.path(format!("{prefix}.csv")), &sim)?;

        let PhaseAnnotation::Sessions { targets, .. } = &sim.phases else {
            return Err("training run produced no session annotation".into());
        };
        self.channel_charts(
            prefix,
            "under dissonance training (session scaffolding)",
            &Shading::from_phases(&sim.phases, ""),
            |c| {
                vec![
                    NamedSeries {
                        label: format!("{} (training)", c.tag()),
                        values: sim.series.get(c).values(),
                    },
                    NamedSeries {
                        label: format!("{} target", c.tag()),
                        values: targets.get(c).as_slice(),
                    },
                ]
            },
        )
    }
}
