//! `kmed`: bounded stochastic dynamics of autonomy, tolerance and dependence under
//! scheduled regimes.
//!
//! The numeric core lives in [`core`]; [`sim`] holds the five regime schedulers and the
//! equilibrium sweep; [`report`] renders finished runs. Every entry point takes its
//! random stream explicitly, so a seeded `StdRng` reproduces a run bit for bit.

#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod report;
pub mod sim;
