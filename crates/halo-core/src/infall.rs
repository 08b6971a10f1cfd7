// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Infall Detector
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Threshold-crossing detector over paired merger-tree histories.
//!
//! Turns a noisy, possibly incomplete time series of host-satellite
//! separations into at most one crossing event. Missing histories and
//! inconclusive separation series yield `None`, never an error.

use halo_types::state::{HaloHistory, HaloState, InfallEvent};

/// Which crossing index to report when the separation condition is not
/// constant across the tracked history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossingPolicy {
    /// Smallest index with the satellite outside the threshold, scanning
    /// from present day toward the past. For satellites that cross the
    /// threshold more than once this reports the most recent excursion,
    /// not necessarily the true infall epoch.
    #[default]
    FirstFromPresent,
    /// Largest such index: the earliest tracked epoch at which the
    /// satellite is found outside the threshold.
    LastFromPresent,
}

/// Euclidean separation between two halo states (same units as positions).
pub fn separation(a: &HaloState, b: &HaloState) -> f64 {
    let dx = a.pos[0] - b.pos[0];
    let dy = a.pos[1] - b.pos[1];
    let dz = a.pos[2] - b.pos[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Detect the infall crossing for one satellite against its host.
///
/// Both histories run from present day (index 0) toward formation and are
/// aligned by index; alignment on matching timestep grids is a caller
/// precondition. The pair is truncated to the shorter common length.
///
/// Returns `None` when either history is empty, or when the satellite is
/// outside `rvir_factor * Rvir_host` at every tracked index or at none of
/// them (no crossing observable inside the tracked overlap).
pub fn detect_infall(
    sat: &HaloHistory,
    host: &HaloHistory,
    rvir_factor: f64,
    policy: CrossingPolicy,
) -> Option<InfallEvent> {
    if sat.is_empty() || host.is_empty() {
        return None;
    }

    let n = sat.len().min(host.len());
    let sat_states = &sat.snapshots[..n];
    let host_states = &host.snapshots[..n];

    let outside: Vec<bool> = (0..n)
        .map(|t| separation(&sat_states[t], &host_states[t]) > rvir_factor * host_states[t].rvir)
        .collect();

    // Uniformly inside or uniformly outside: no crossing observed.
    if outside.iter().all(|&o| o) || !outside.iter().any(|&o| o) {
        return None;
    }

    let index = match policy {
        CrossingPolicy::FirstFromPresent => outside.iter().position(|&o| o)?,
        CrossingPolicy::LastFromPresent => outside.iter().rposition(|&o| o)?,
    };

    Some(InfallEvent {
        index,
        sat_infall: sat_states[index],
        host_infall: host_states[index],
        sat_present: sat_states[0],
        sat_birth: sat_states[n - 1],
        host_birth: host_states[n - 1],
    })
}
