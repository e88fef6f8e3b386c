//! The three bounded state channels and a fixed-size per-channel container.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    Autonomy,
    Tolerance,
    Dependence,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Autonomy, Channel::Tolerance, Channel::Dependence];

    /// Short tag used in file names and CSV headers.
    pub fn tag(self) -> &'static str {
        match self {
            Channel::Autonomy => "EA",
            Channel::Tolerance => "DT",
            Channel::Dependence => "D",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Autonomy => "autonomy",
            Channel::Tolerance => "tolerance",
            Channel::Dependence => "dependence",
        }
    }

    /// Axis label for plots.
    pub fn axis_label(self) -> &'static str {
        match self {
            Channel::Autonomy => "Epistemic Autonomy (EA)",
            Channel::Tolerance => "Dissonance Tolerance (DT)",
            Channel::Dependence => "Dependence (D)",
        }
    }
}

/// One value per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerChannel<T> {
    pub autonomy: T,
    pub tolerance: T,
    pub dependence: T,
}

impl<T> PerChannel<T> {
    pub const fn new(autonomy: T, tolerance: T, dependence: T) -> Self {
        Self {
            autonomy,
            tolerance,
            dependence,
        }
    }

    pub fn get(&self, channel: Channel) -> &T {
        match channel {
            Channel::Autonomy => &self.autonomy,
            Channel::Tolerance => &self.tolerance,
            Channel::Dependence => &self.dependence,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut T {
        match channel {
            Channel::Autonomy => &mut self.autonomy,
            Channel::Tolerance => &mut self.tolerance,
            Channel::Dependence => &mut self.dependence,
        }
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> PerChannel<U> {
        PerChannel {
            autonomy: f(self.autonomy),
            tolerance: f(self.tolerance),
            dependence: f(self.dependence),
        }
    }

    pub fn as_ref(&self) -> PerChannel<&T> {
        PerChannel {
            autonomy: &self.autonomy,
            tolerance: &self.tolerance,
            dependence: &self.dependence,
        }
    }

    /// Iterate in `Channel::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &T)> + '_ {
        Channel::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn try_map<U, E>(self, mut f: impl FnMut(T) -> Result<U, E>) -> Result<PerChannel<U>, E> {
        Ok(PerChannel {
            autonomy: f(self.autonomy)?,
            tolerance: f(self.tolerance)?,
            dependence: f(self.dependence)?,
        })
    }
}

impl<T: Copy> PerChannel<T> {
    pub const fn splat(value: T) -> Self {
        Self {
            autonomy: value,
            tolerance: value,
            dependence: value,
        }
    }
}
