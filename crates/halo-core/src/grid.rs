// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Grid Index Converter
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Physical comoving coordinate → integer field-grid cell.

use halo_types::config::GridConfig;
use halo_types::constants::KPC_PER_MPC;
use halo_types::error::{HaloError, HaloResult};
use halo_types::state::GridCell;

/// Field-grid geometry for one simulation box.
#[derive(Debug, Clone, Copy)]
pub struct GridSpec {
    pub ngrid: usize,
    pub box_size_mpc: f64,
}

impl GridSpec {
    pub fn new(ngrid: usize, box_size_mpc: f64) -> Self {
        Self { ngrid, box_size_mpc }
    }

    pub fn from_config(cfg: &GridConfig) -> Self {
        Self::new(cfg.ngrid, cfg.box_size_mpc)
    }

    /// Grid index along one axis: `trunc(coord_mpc * Ngrid / BoxSizeMpc)`.
    /// Truncation toward zero, not rounding. No wrapping, no clamping.
    pub fn index_of(&self, coord_mpc: f64) -> i64 {
        (coord_mpc * self.ngrid as f64 / self.box_size_mpc) as i64
    }

    /// Cell containing a position in Mpc. Unchecked; see `checked_cell`.
    pub fn cell_of(&self, pos_mpc: [f64; 3]) -> GridCell {
        GridCell {
            i: self.index_of(pos_mpc[0]),
            j: self.index_of(pos_mpc[1]),
            k: self.index_of(pos_mpc[2]),
        }
    }

    /// Cell containing a position in Mpc, validated against `[0, Ngrid)`.
    /// An out-of-range cell is a caller contract violation and fails
    /// loudly; silent wrapping would corrupt the sampled physics.
    pub fn checked_cell(&self, pos_mpc: [f64; 3]) -> HaloResult<[usize; 3]> {
        let cell = self.cell_of(pos_mpc);
        let n = self.ngrid as i64;
        if cell.i < 0 || cell.i >= n || cell.j < 0 || cell.j >= n || cell.k < 0 || cell.k >= n {
            return Err(HaloError::GridOutOfBounds {
                i: cell.i,
                j: cell.j,
                k: cell.k,
                ngrid: self.ngrid,
            });
        }
        Ok([cell.i as usize, cell.j as usize, cell.k as usize])
    }
}

/// Catalog positions are in comoving kpc; the grid works in Mpc.
pub fn kpc_to_mpc(pos_kpc: [f64; 3]) -> [f64; 3] {
    [
        pos_kpc[0] / KPC_PER_MPC,
        pos_kpc[1] / KPC_PER_MPC,
        pos_kpc[2] / KPC_PER_MPC,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_cell() {
        // x = 63500 kpc, box 127 Mpc, 256 cells: 63.5 * 256 / 127 = 128.0
        let grid = GridSpec::new(256, 127.0);
        let pos = kpc_to_mpc([63500.0, 63500.0, 63500.0]);
        let cell = grid.cell_of(pos);
        assert_eq!(cell, GridCell { i: 128, j: 128, k: 128 });
    }

    #[test]
    fn test_truncation_not_rounding() {
        let grid = GridSpec::new(256, 127.0);
        // 63.9 * 256 / 127 = 128.806..., truncates to 128
        assert_eq!(grid.index_of(63.9), 128);
    }

    #[test]
    fn test_upper_boundary_maps_inside() {
        let grid = GridSpec::new(256, 127.0);
        let eps = 1e-9;
        assert_eq!(grid.index_of(127.0 - eps), 255);
        assert!(grid.checked_cell([127.0 - eps; 3]).is_ok());
    }

    #[test]
    fn test_checked_cell_rejects_out_of_range() {
        let grid = GridSpec::new(256, 127.0);
        let err = grid.checked_cell([127.0, 1.0, 1.0]).unwrap_err();
        match err {
            halo_types::error::HaloError::GridOutOfBounds { i, ngrid, .. } => {
                assert_eq!(i, 256);
                assert_eq!(ngrid, 256);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(grid.checked_cell([-0.5, 1.0, 1.0]).is_err());
    }
}
