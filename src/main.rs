// Entry point: parses arguments, loads config and runs the requested experiments.
mod app;
mod cli;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use kmed::config::AppConfig;

use crate::cli::{Args, resolve_experiments};

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_target(false).init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut cfg = AppConfig::load_or_default(&args.config);
    if let Some(out) = &args.out {
        cfg.run.output_dir = out.clone();
    }
    if let Some(seed) = args.seed {
        cfg.run.seed = seed;
    }

    let app = match app::App::new(cfg, !args.no_plots) {
        Ok(app) => app,
        Err(err) => {
            error!("failed to prepare output directory: {err}");
            std::process::exit(1);
        }
    };

    for exp in resolve_experiments(&args.experiments) {
        if let Err(err) = app.run(exp) {
            error!("{exp:?} failed: {err}");
            std::process::exit(1);
        }
    }
    info!("outputs saved to {}", app.out_dir().display());
}
