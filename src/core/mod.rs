pub mod channel;
pub mod engine;
pub mod error;
pub mod regime;
pub mod stats;
pub mod step;
pub mod trajectory;

pub use channel::{Channel, PerChannel};
pub use error::{SimError, SimResult};
pub use regime::{ChannelParams, Regime, RegimeLabel, RegimePair};
pub use stats::{TailStats, tail_stats};
pub use trajectory::Trajectory;
