//! Tail-window equilibrium statistics.

use serde::Serialize;

use crate::core::error::{SimError, SimResult};

/// Two-sided 95% normal quantile.
pub const Z_95: f64 = 1.96;

pub const DEFAULT_TAIL: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TailStats {
    pub mean: f64,
    /// `1.96 * s / sqrt(n)` with the Bessel-corrected sample deviation.
    pub half_width: f64,
    pub n: usize,
}

impl TailStats {
    pub fn lower(&self) -> f64 {
        self.mean - self.half_width
    }

    pub fn upper(&self) -> f64 {
        self.mean + self.half_width
    }
}

/// Mean and 95% half-width over the last `tail` values; the window must be shorter
/// than the series.
pub fn tail_stats(values: &[f64], tail: usize) -> SimResult<TailStats> {
    if tail < 2 || tail >= values.len() {
        return Err(SimError::InvalidTailWindow {
            tail,
            len: values.len(),
        });
    }
    let window = &values[values.len() - tail..];
    let n = window.len() as f64;
    // Shifted by the first value so a constant window yields exactly that value.
    let pivot = window[0];
    let mean = pivot + window.iter().map(|v| v - pivot).sum::<f64>() / n;
    let ss: f64 = window.iter().map(|v| (v - mean) * (v - mean)).sum();
    let sd = (ss / (n - 1.0)).sqrt();
    Ok(TailStats {
        mean,
        half_width: Z_95 * sd / n.sqrt(),
        n: window.len(),
    })
}
