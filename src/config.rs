use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::core::stats::DEFAULT_TAIL;
use crate::sim::{
    IntermittentConfig, OscillatingConfig, StaticComparison, SwitchConfig, TrainingConfig,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Every experiment reseeds a fresh stream from this value.
    #[serde(default = "RunConfig::default_seed")]
    pub seed: u64,
    #[serde(default = "RunConfig::default_output_dir")]
    pub output_dir: String,
    #[serde(default = "RunConfig::default_plot_width")]
    pub plot_width: u32,
    #[serde(default = "RunConfig::default_plot_height")]
    pub plot_height: u32,
    #[serde(default = "RunConfig::default_tail")]
    pub tail: usize,
    /// Steps shown in console excerpts.
    #[serde(default = "RunConfig::default_head")]
    pub head: usize,
    #[serde(default = "RunConfig::default_sweep_grid")]
    pub sweep_grid: Vec<f64>,
    /// Give each sweep point its own stream instead of sharing one.
    #[serde(default)]
    pub seeded_sweep: bool,
}

impl RunConfig {
    fn default_seed() -> u64 {
        42
    }
    fn default_output_dir() -> String {
        "outputs".to_string()
    }
    fn default_plot_width() -> u32 {
        1000
    }
    fn default_plot_height() -> u32 {
        560
    }
    fn default_tail() -> usize {
        DEFAULT_TAIL
    }
    fn default_head() -> usize {
        6
    }
    fn default_sweep_grid() -> Vec<f64> {
        vec![0.0, 0.1, 0.2, 0.3, 0.5]
    }

    pub fn plot_size(&self) -> (u32, u32) {
        (self.plot_width, self.plot_height)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
            output_dir: Self::default_output_dir(),
            plot_width: Self::default_plot_width(),
            plot_height: Self::default_plot_height(),
            tail: Self::default_tail(),
            head: Self::default_head(),
            sweep_grid: Self::default_sweep_grid(),
            seeded_sweep: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub fixed: StaticComparison,
    #[serde(default)]
    pub switch: SwitchConfig,
    #[serde(default)]
    pub intermittent: IntermittentConfig,
    #[serde(default)]
    pub oscillating: OscillatingConfig,
    #[serde(default)]
    pub training: TrainingConfig,
}

impl AppConfig {
    /// Defaults rendered as a fully commented template: top-level section headers stay
    /// live, everything else is commented so the file parses back to the defaults.
    pub fn commented_template() -> Option<String> {
        let text = toml::to_string_pretty(&Self::default()).ok()?;
        let mut commented = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                commented.push('\n');
            } else if trimmed.starts_with('[')
                && !trimmed.starts_with("[[")
                && trimmed.ends_with(']')
                && !trimmed.contains('.')
            {
                commented.push_str(line);
                commented.push('\n');
            } else {
                commented.push_str("# ");
                commented.push_str(line);
                commented.push('\n');
            }
        }
        Some(commented)
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => {
                        info!("loaded config {path}");
                        return cfg;
                    }
                    Err(err) => {
                        warn!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    warn!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        match Self::commented_template() {
            Some(text) => {
                if let Err(err) = fs::write(path_obj, text) {
                    warn!("Failed to write default config to {path}: {err}");
                } else {
                    info!("wrote default config to {path}");
                }
            }
            None => warn!("Failed to serialize default config; continuing with defaults"),
        }
        Self::default()
    }
}
