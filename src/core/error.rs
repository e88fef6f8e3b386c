use std::fmt;

/// Configuration errors raised before any stepping begins.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// A probability-like parameter left its allowed interval.
    InvalidProbability { name: &'static str, value: f64 },
    /// A step rate outside (0, 1].
    InvalidRate { name: String, value: f64 },
    /// A target outside [0, 1].
    InvalidTarget { name: String, value: f64 },
    /// A starting channel value outside [0, 1].
    InvalidInitial { channel: &'static str, value: f64 },
    NegativeNoise(f64),
    NonFiniteValue { name: &'static str },
    InvalidBlockRange { min_len: usize, max_len: usize },
    InvalidSessions(String),
    InvalidTailWindow { tail: usize, len: usize },
    EmptyGrid,
}

pub type SimResult<T> = Result<T, SimError>;

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidProbability { name, value } => {
                write!(f, "{name} = {value} is outside its allowed range")
            }
            SimError::InvalidRate { name, value } => {
                write!(f, "rate {name} = {value} must lie in (0, 1]")
            }
            SimError::InvalidTarget { name, value } => {
                write!(f, "target {name} = {value} must lie in [0, 1]")
            }
            SimError::InvalidInitial { channel, value } => {
                write!(f, "initial {channel} = {value} must lie in [0, 1]")
            }
            SimError::NegativeNoise(std) => {
                write!(f, "noise standard deviation {std} must be >= 0")
            }
            SimError::NonFiniteValue { name } => write!(f, "{name} must be finite"),
            SimError::InvalidBlockRange { min_len, max_len } => write!(
                f,
                "block lengths need 0 < min_len < max_len (got {min_len}..{max_len})"
            ),
            SimError::InvalidSessions(msg) => write!(f, "invalid session schedule: {msg}"),
            SimError::InvalidTailWindow { tail, len } => write!(
                f,
                "tail window {tail} needs 2 <= tail < series length {len}"
            ),
            SimError::EmptyGrid => write!(f, "sweep grid is empty"),
        }
    }
}

impl std::error::Error for SimError {}

pub(crate) fn check_noise(noise_std: f64) -> SimResult<()> {
    if !noise_std.is_finite() {
        return Err(SimError::NonFiniteValue { name: "noise_std" });
    }
    if noise_std < 0.0 {
        return Err(SimError::NegativeNoise(noise_std));
    }
    Ok(())
}

pub(crate) fn check_unit(name: &'static str, value: f64) -> SimResult<()> {
    if !value.is_finite() {
        return Err(SimError::NonFiniteValue { name });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(SimError::InvalidProbability { name, value });
    }
    Ok(())
}
