//! Reporting: charts, CSV export and console excerpts for finished runs.
//! Nothing here feeds back into a simulation.

pub mod console;
pub mod csv;
pub mod plots;
