use clap::{ArgAction, Parser, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Experiment {
    /// Scaffold vs suppression, one regime each
    Fixed,
    /// Rupture then repair at a fixed step
    Switch,
    /// Random clientelist exposure and the equilibrium sweep
    Intermittent,
    /// Alternating regime blocks of random length
    Oscillating,
    /// Session-driven target adaptation
    Training,
    All,
}

impl Experiment {
    pub const EACH: [Experiment; 5] = [
        Experiment::Fixed,
        Experiment::Switch,
        Experiment::Intermittent,
        Experiment::Oscillating,
        Experiment::Training,
    ];

    pub fn file_prefix(self) -> &'static str {
        match self {
            Experiment::Fixed => "sim1",
            Experiment::Switch => "sim2",
            Experiment::Intermittent => "sim3",
            Experiment::Oscillating => "sim4",
            Experiment::Training => "sim5",
            Experiment::All => "all",
        }
    }
}

/// Expand `all` and drop duplicates, keeping first-seen order. Empty means all.
pub fn resolve_experiments(requested: &[Experiment]) -> Vec<Experiment> {
    if requested.is_empty() || requested.contains(&Experiment::All) {
        return Experiment::EACH.to_vec();
    }
    let mut out = Vec::with_capacity(requested.len());
    for &exp in requested {
        if !out.contains(&exp) {
            out.push(exp);
        }
    }
    out
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Experiments to run (default: all)
    #[arg(value_enum, value_name = "EXPERIMENT")]
    pub experiments: Vec<Experiment>,

    /// Path to config TOML
    #[arg(long, default_value = "kmed.toml")]
    pub config: String,

    /// Output directory (overrides config)
    #[arg(long)]
    pub out: Option<String>,

    /// Random seed (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip PNG rendering, write CSV only
    #[arg(long, default_value_t = false)]
    pub no_plots: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
