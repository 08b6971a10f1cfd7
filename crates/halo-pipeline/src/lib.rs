//! Per-simulation batch drivers.
//!
//! `infall_run` produces one infall table per simulation; `eigen_run`
//! samples eigenvector grids for the current-position and birth/infall
//! variants. Each run is a complete recomputation with no persisted
//! state between configurations.

pub mod eigen_run;
pub mod infall_run;
