// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Field Sampler
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Snapshot grouping and sparse eigenvector gathering.
//!
//! Satellites are grouped by the snapshot whose tabulated redshift
//! matches their target redshift; each needed field grid is loaded at
//! most once per invocation and sampled at the satellites' grid cells.

use ndarray::Array5;

use halo_types::constants::EIGEN_SLOTS;
use halo_types::error::{HaloError, HaloResult};
use halo_types::state::SnapshotRedshiftTable;

use crate::grid::{kpc_to_mpc, GridSpec};

/// Tensor family a field grid was eigen-decomposed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TensorKind {
    Shear,
    Tidal,
}

impl TensorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TensorKind::Shear => "Shear",
            TensorKind::Tidal => "Tidal",
        }
    }

    pub fn parse(name: &str) -> HaloResult<Self> {
        match name {
            "Shear" | "shear" => Ok(TensorKind::Shear),
            "Tidal" | "tidal" => Ok(TensorKind::Tidal),
            other => Err(HaloError::ConfigError(format!(
                "unknown tensor kind '{other}' (expected Shear or Tidal)"
            ))),
        }
    }
}

impl std::fmt::Display for TensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one field grid on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub snapshot: u32,
    pub tensor: TensorKind,
    pub smoothing_mpc: u32,
}

/// Per-cell eigenvector grid for one (snapshot, tensor, smoothing).
/// Shape `(3 eigen slots, 3 components, N, N, N)` indexed
/// `[slot, component, k, j, i]`.
#[derive(Debug, Clone)]
pub struct EigenField {
    data: Array5<f64>,
}

impl EigenField {
    /// Wrap a raw grid, validating the expected shape.
    pub fn from_array(data: Array5<f64>) -> Result<Self, String> {
        let shape = data.shape();
        let n = shape[2];
        if shape[0] != EIGEN_SLOTS || shape[1] != 3 || shape[3] != n || shape[4] != n {
            return Err(format!(
                "expected eigen grid of shape (3, 3, N, N, N), got {shape:?}"
            ));
        }
        Ok(Self { data })
    }

    pub fn ngrid(&self) -> usize {
        self.data.shape()[2]
    }

    /// Eigenvector `slot` (0..3, fixed upstream eigenvalue ordering) at a
    /// grid cell given as `[i, j, k]`.
    pub fn eigenvector(&self, slot: usize, cell: [usize; 3]) -> [f64; 3] {
        let [i, j, k] = cell;
        [
            self.data[[slot, 0, k, j, i]],
            self.data[[slot, 1, k, j, i]],
            self.data[[slot, 2, k, j, i]],
        ]
    }
}

/// Source of field grids, keyed by `(snapshot, tensor, smoothing)`.
/// A load failure is fatal to the whole sampling invocation.
pub trait FieldLoader {
    fn load(&mut self, key: &FieldKey) -> HaloResult<EigenField>;
}

/// How a satellite's target redshift is matched against table entries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RedshiftMatch {
    /// Bitwise float equality. Target redshifts copied out of the
    /// snapshot table match; anything else silently stays unsampled.
    #[default]
    Exact,
    /// |target - entry| <= tol.
    Within(f64),
}

impl RedshiftMatch {
    pub fn matches(&self, target_z: f64, entry_z: f64) -> bool {
        match self {
            RedshiftMatch::Exact => target_z == entry_z,
            RedshiftMatch::Within(tol) => (target_z - entry_z).abs() <= *tol,
        }
    }
}

/// One satellite to sample: identity, target redshift, position.
#[derive(Debug, Clone, Copy)]
pub struct SampleTarget {
    pub halo_id: u64,
    pub target_z: f64,
    pub pos_kpc: [f64; 3],
}

/// Gathered eigenvectors for one satellite. `matched` is false when the
/// target redshift matched no table entry; the vectors then stay zero.
#[derive(Debug, Clone, Copy)]
pub struct EigenSample {
    pub halo_id: u64,
    pub vectors: [[f64; 3]; 3],
    pub matched: bool,
}

/// Sample the three per-cell eigenvectors for every target.
///
/// Walks the snapshot table in order; for each entry, the subset of
/// targets whose redshift matches is gathered from a single load of the
/// corresponding field grid. Entries with no matching target are skipped
/// without touching the loader.
pub fn sample_eigenvectors(
    targets: &[SampleTarget],
    table: &SnapshotRedshiftTable,
    grid: &GridSpec,
    tensor: TensorKind,
    smoothing_mpc: u32,
    loader: &mut dyn FieldLoader,
    matching: RedshiftMatch,
) -> HaloResult<Vec<EigenSample>> {
    let mut samples: Vec<EigenSample> = targets
        .iter()
        .map(|t| EigenSample {
            halo_id: t.halo_id,
            vectors: [[0.0; 3]; 3],
            matched: false,
        })
        .collect();

    for entry in table.iter() {
        let subset: Vec<usize> = targets
            .iter()
            .enumerate()
            .filter(|(_, t)| matching.matches(t.target_z, entry.z))
            .map(|(idx, _)| idx)
            .collect();
        if subset.is_empty() {
            continue;
        }

        let key = FieldKey {
            snapshot: entry.snapshot,
            tensor,
            smoothing_mpc,
        };
        let field = loader.load(&key)?;

        for idx in subset {
            let cell = grid.checked_cell(kpc_to_mpc(targets[idx].pos_kpc))?;
            for slot in 0..EIGEN_SLOTS {
                samples[idx].vectors[slot] = field.eigenvector(slot, cell);
            }
            samples[idx].matched = true;
        }
    }

    Ok(samples)
}
