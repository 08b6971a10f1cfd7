// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::constants::DEFAULT_RVIR_FACTOR;

/// Top-level survey configuration. Maps 1:1 to the JSON config schema.
/// Path templates may contain `{sim}`, replaced per simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    pub survey_name: String,
    /// Simulation identifiers, e.g. ["09_18", "17_11", "37_11"].
    pub simulations: Vec<String>,
    /// Directory holding per-halo merger-tree tables (template).
    pub tree_dir: String,
    /// Directory holding tensor-field snapshot grids (template).
    pub field_dir: String,
    /// Directory holding the per-simulation satellite catalogs.
    pub catalog_dir: String,
    /// Directory for output tables.
    pub output_dir: String,
    /// Merger-tree file prefix; full name is
    /// `{tree_prefix}{sim}.127_halo_{id}.dat`.
    pub tree_prefix: String,
    /// Field file prefix (template); full name is
    /// `{field_prefix}{snap:03}_{ngrid}_{smoothing}.0_{Tensor}Tensor_Eigen_cell_All.npy`.
    pub field_prefix: String,
    /// Path to the snapshot-redshift lookup table.
    pub snapshot_table: String,
    pub grid: GridConfig,
    #[serde(default = "default_rvir_factor")]
    pub rvir_factor: f64,
    /// Tensor kinds to process, e.g. ["Shear", "Tidal"].
    pub tensors: Vec<String>,
    /// Smoothing scales in Mpc, e.g. [1, 2, 5].
    pub smoothings_mpc: Vec<u32>,
    /// Rvir-threshold tags selecting which infall tables the birth/infall
    /// sampler consumes, e.g. ["0.5rvir", "1.0rvir", "1.5rvir", "2.0rvir"].
    #[serde(default)]
    pub rvir_tags: Vec<String>,
    /// Host halo IDs per simulation, ordered (first host, second host).
    pub host_ids: HashMap<String, [u64; 2]>,
}

/// Field-grid geometry, fixed per simulation box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridConfig {
    pub ngrid: usize,
    pub box_size_mpc: f64,
}

fn default_rvir_factor() -> f64 {
    DEFAULT_RVIR_FACTOR
}

impl SurveyConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> crate::error::HaloResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    fn expand(template: &str, sim: &str) -> String {
        template.replace("{sim}", sim)
    }

    pub fn tree_dir_for(&self, sim: &str) -> PathBuf {
        PathBuf::from(Self::expand(&self.tree_dir, sim))
    }

    pub fn field_dir_for(&self, sim: &str) -> PathBuf {
        PathBuf::from(Self::expand(&self.field_dir, sim))
    }

    pub fn field_prefix_for(&self, sim: &str) -> String {
        Self::expand(&self.field_prefix, sim)
    }

    /// Merger-tree table path for one halo in one simulation.
    pub fn tree_path(&self, sim: &str, halo_id: u64) -> PathBuf {
        self.tree_dir_for(sim)
            .join(format!("{}{}.127_halo_{}.dat", self.tree_prefix, sim, halo_id))
    }

    /// Satellite catalog path for one simulation.
    pub fn catalog_path(&self, sim: &str) -> PathBuf {
        PathBuf::from(&self.catalog_dir).join(format!("dwarfs_{sim}.txt"))
    }

    /// Infall output table path for one simulation at the configured factor.
    pub fn infall_output_path(&self, sim: &str) -> PathBuf {
        PathBuf::from(&self.output_dir)
            .join(format!("out_infall_{}_{:.1}rvir.txt", sim, self.rvir_factor))
    }

    /// Infall table path for a named Rvir tag (birth/infall sampler input).
    pub fn infall_table_path(&self, sim: &str, rvir_tag: &str) -> PathBuf {
        PathBuf::from(&self.output_dir).join(format!("out_infall_{sim}_{rvir_tag}.txt"))
    }

    /// Host IDs for one simulation, or a config error when missing.
    pub fn hosts_for(&self, sim: &str) -> crate::error::HaloResult<[u64; 2]> {
        self.host_ids.get(sim).copied().ok_or_else(|| {
            crate::error::HaloError::ConfigError(format!("no host IDs configured for '{sim}'"))
        })
    }
}
