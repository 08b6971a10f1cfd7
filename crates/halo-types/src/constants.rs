// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// AHF catalogs store positions in comoving kpc/h; field grids are in Mpc.
pub const KPC_PER_MPC: f64 = 1000.0;

/// Default virial-radius multiplier for the infall threshold.
pub const DEFAULT_RVIR_FACTOR: f64 = 2.0;

/// Eigenvector slots stored per grid cell (one per tensor eigenvalue).
pub const EIGEN_SLOTS: usize = 3;

/// Columns in one infall output row.
pub const INFALL_RECORD_COLS: usize = 35;

/// Columns in a single-epoch eigenvector row: z, x, y, z plus 3x3 components.
pub const EIGEN_ROW_COLS: usize = 13;

/// Columns in a birth/infall eigenvector row: id plus 2x (3x3) components.
pub const EIGEN_BIRTH_ROW_COLS: usize = 19;
