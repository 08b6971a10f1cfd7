// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Field Grid Loader
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! `.npy` loader for eigen-decomposed tensor-field snapshot grids.

use std::path::{Path, PathBuf};

use ndarray::Array5;
use ndarray_npy::read_npy;

use halo_core::sampler::{EigenField, FieldKey, FieldLoader};
use halo_types::error::{HaloError, HaloResult};

/// Loads eigen grids from per-snapshot `.npy` files named
/// `{prefix}{snap:03}_{ngrid}_{smoothing}.0_{Tensor}Tensor_Eigen_cell_All.npy`.
#[derive(Debug, Clone)]
pub struct NpyFieldLoader {
    dir: PathBuf,
    prefix: String,
    ngrid: usize,
}

impl NpyFieldLoader {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, ngrid: usize) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            ngrid,
        }
    }

    /// File name for one grid; snapshot numbers are zero-padded to three
    /// digits.
    pub fn file_name(&self, key: &FieldKey) -> String {
        format!(
            "{}{:03}_{}_{}.0_{}Tensor_Eigen_cell_All.npy",
            self.prefix,
            key.snapshot,
            self.ngrid,
            key.smoothing_mpc,
            key.tensor.as_str()
        )
    }

    pub fn path_for(&self, key: &FieldKey) -> PathBuf {
        self.dir.join(self.file_name(key))
    }

    fn load_error(&self, key: &FieldKey, path: &Path, message: String) -> HaloError {
        HaloError::FieldLoad {
            snapshot: key.snapshot,
            tensor: key.tensor.as_str().to_string(),
            smoothing: key.smoothing_mpc,
            path: path.to_string_lossy().into_owned(),
            message,
        }
    }
}

impl FieldLoader for NpyFieldLoader {
    fn load(&mut self, key: &FieldKey) -> HaloResult<EigenField> {
        let path = self.path_for(key);
        let data: Array5<f64> =
            read_npy(&path).map_err(|e| self.load_error(key, &path, e.to_string()))?;
        let field =
            EigenField::from_array(data).map_err(|msg| self.load_error(key, &path, msg))?;
        if field.ngrid() != self.ngrid {
            return Err(self.load_error(
                key,
                &path,
                format!("grid is {}^3, expected {}^3", field.ngrid(), self.ngrid),
            ));
        }
        Ok(field)
    }
}
