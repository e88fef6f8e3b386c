//! Named regimes: per-channel (target, rate) bundles.
//!
//! A regime only says where each channel is pulled and how fast. Stepping lives in
//! [`crate::core::step`], so every scheduler shares one update rule.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::channel::{Channel, PerChannel};
use crate::core::error::{SimError, SimResult};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelParams {
    pub target: f64,
    pub rate: f64,
}

impl ChannelParams {
    pub const fn new(target: f64, rate: f64) -> Self {
        Self { target, rate }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Regime {
    pub name: String,
    pub params: PerChannel<ChannelParams>,
}

impl Regime {
    /// Build a regime, rejecting targets outside [0, 1] and rates outside (0, 1].
    pub fn new(name: impl Into<String>, params: PerChannel<ChannelParams>) -> SimResult<Self> {
        let regime = Self {
            name: name.into(),
            params,
        };
        regime.validate()?;
        Ok(regime)
    }

    pub fn validate(&self) -> SimResult<()> {
        for (channel, p) in self.params.iter() {
            let field = || format!("{}.{}", self.name, channel.name());
            if !p.target.is_finite() || !(0.0..=1.0).contains(&p.target) {
                return Err(SimError::InvalidTarget {
                    name: field(),
                    value: p.target,
                });
            }
            if !p.rate.is_finite() || p.rate <= 0.0 || p.rate > 1.0 {
                return Err(SimError::InvalidRate {
                    name: field(),
                    value: p.rate,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, channel: Channel) -> ChannelParams {
        *self.params.get(channel)
    }

    /// Scaffold regime: autonomy and tolerance rise, dependence falls.
    pub fn fiduciary() -> Self {
        Self {
            name: "fiduciary".to_string(),
            params: PerChannel::new(
                ChannelParams::new(0.74, 0.05),
                ChannelParams::new(0.80, 0.06),
                ChannelParams::new(0.18, 0.06),
            ),
        }
    }

    /// Suppression regime: autonomy and tolerance collapse, dependence entrenches.
    pub fn clientelist() -> Self {
        Self {
            name: "clientelist".to_string(),
            params: PerChannel::new(
                ChannelParams::new(0.03, 0.06),
                ChannelParams::new(0.08, 0.06),
                ChannelParams::new(0.65, 0.04),
            ),
        }
    }

    /// Suppression phase preceding a repair switch.
    pub fn rupture() -> Self {
        Self {
            name: "rupture".to_string(),
            params: PerChannel::new(
                ChannelParams::new(0.05, 0.06),
                ChannelParams::new(0.10, 0.06),
                ChannelParams::new(0.70, 0.05),
            ),
        }
    }

    pub fn catalogue() -> [Regime; 3] {
        [Self::fiduciary(), Self::clientelist(), Self::rupture()]
    }

    pub fn by_name(name: &str) -> Option<Regime> {
        Self::catalogue().into_iter().find(|r| r.name == name)
    }
}

/// Two-way tag for schedulers that pick between a scaffold and a suppression regime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegimeLabel {
    Fiduciary,
    Clientelist,
}

impl RegimeLabel {
    pub fn other(self) -> Self {
        match self {
            RegimeLabel::Fiduciary => RegimeLabel::Clientelist,
            RegimeLabel::Clientelist => RegimeLabel::Fiduciary,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RegimeLabel::Fiduciary => "fiduciary",
            RegimeLabel::Clientelist => "clientelist",
        }
    }

    pub fn short(self) -> char {
        match self {
            RegimeLabel::Fiduciary => 'F',
            RegimeLabel::Clientelist => 'C',
        }
    }
}

impl fmt::Display for RegimeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RegimeLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f" | "fiduciary" => Ok(RegimeLabel::Fiduciary),
            "c" | "clientelist" => Ok(RegimeLabel::Clientelist),
            _ => Err(format!("unknown regime '{s}' (use fiduciary or clientelist)")),
        }
    }
}

/// The two regimes a label can resolve to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegimePair {
    #[serde(default = "Regime::fiduciary")]
    pub fiduciary: Regime,
    #[serde(default = "Regime::clientelist")]
    pub clientelist: Regime,
}

impl RegimePair {
    pub fn get(&self, label: RegimeLabel) -> &Regime {
        match label {
            RegimeLabel::Fiduciary => &self.fiduciary,
            RegimeLabel::Clientelist => &self.clientelist,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        self.fiduciary.validate()?;
        self.clientelist.validate()
    }
}

impl Default for RegimePair {
    fn default() -> Self {
        Self {
            fiduciary: Regime::fiduciary(),
            clientelist: Regime::clientelist(),
        }
    }
}
