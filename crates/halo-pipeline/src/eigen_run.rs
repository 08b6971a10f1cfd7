// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Eigenvector Sampling Pipelines
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Eigenvector extraction drivers.
//!
//! Both drivers share the grouping sampler from `halo-core`; each
//! (tensor × smoothing) configuration builds a fresh field loader so no
//! grids are cached across configurations.

use std::path::PathBuf;

use halo_core::grid::GridSpec;
use halo_core::sampler::{sample_eigenvectors, RedshiftMatch, SampleTarget, TensorKind};
use halo_io::field::NpyFieldLoader;
use halo_io::output::{eigen_rows_birth, eigen_rows_current, write_eigen_table};
use halo_io::table::{read_halo_history, read_infall_table, read_snapshot_table};
use halo_types::config::SurveyConfig;
use halo_types::error::HaloResult;
use halo_types::state::SnapshotRedshiftTable;

fn eigen_output_name(cfg: &SurveyConfig, sim: &str, tensor: TensorKind, smo: u32, tail: &str) -> String {
    format!(
        "{}{}_{}.0_{}Tensor_Eigen_vecs_{}.npy",
        cfg.field_prefix_for(sim),
        cfg.grid.ngrid,
        smo,
        tensor.as_str(),
        tail
    )
}

fn load_snapshot_table(cfg: &SurveyConfig) -> HaloResult<SnapshotRedshiftTable> {
    read_snapshot_table(std::path::Path::new(&cfg.snapshot_table))
}

/// Current-position variant: for each host, sample the field at the
/// host's own tracked position at every epoch of its merger tree, one
/// output per (host × tensor × smoothing).
pub fn run_current_positions(cfg: &SurveyConfig, sim: &str) -> HaloResult<Vec<PathBuf>> {
    println!("Processing simulation: {sim}");
    let table = load_snapshot_table(cfg)?;
    let grid = GridSpec::from_config(&cfg.grid);
    let hosts = cfg.hosts_for(sim)?;
    std::fs::create_dir_all(&cfg.output_dir)?;

    let mut written = Vec::new();
    for &host in &hosts {
        println!("  Host halo: {host}");
        let history = read_halo_history(&cfg.tree_path(sim, host))?;
        let targets: Vec<SampleTarget> = history
            .snapshots
            .iter()
            .map(|s| SampleTarget {
                halo_id: host,
                target_z: s.z,
                pos_kpc: s.pos,
            })
            .collect();

        for tensor_name in &cfg.tensors {
            let tensor = TensorKind::parse(tensor_name)?;
            println!("    Processing tensor: {tensor}");
            for &smo in &cfg.smoothings_mpc {
                let mut loader = NpyFieldLoader::new(
                    cfg.field_dir_for(sim),
                    cfg.field_prefix_for(sim),
                    cfg.grid.ngrid,
                );
                let samples = sample_eigenvectors(
                    &targets,
                    &table,
                    &grid,
                    tensor,
                    smo,
                    &mut loader,
                    RedshiftMatch::Exact,
                )?;
                let rows = eigen_rows_current(&targets, &samples)?;
                let out = PathBuf::from(&cfg.output_dir).join(eigen_output_name(
                    cfg,
                    sim,
                    tensor,
                    smo,
                    &format!("LG_{host}"),
                ));
                write_eigen_table(&out, &rows)?;
                println!("      Saved: {}", out.display());
                written.push(out);
            }
        }
    }
    Ok(written)
}

/// Birth/infall variant: consume a previously written infall table and
/// sample each satellite twice, at its infall redshift and at its birth
/// redshift. The two samplings are independent invocations.
pub fn run_birth_infall(cfg: &SurveyConfig, sim: &str) -> HaloResult<Vec<PathBuf>> {
    println!("Processing simulation: {sim}");
    let table = load_snapshot_table(cfg)?;
    let grid = GridSpec::from_config(&cfg.grid);
    std::fs::create_dir_all(&cfg.output_dir)?;

    let mut written = Vec::new();
    for tensor_name in &cfg.tensors {
        let tensor = TensorKind::parse(tensor_name)?;
        println!("  Tensor type: {tensor}");
        for &smo in &cfg.smoothings_mpc {
            for tag in &cfg.rvir_tags {
                println!("    rvir selection: {tag}");
                let records = read_infall_table(&cfg.infall_table_path(sim, tag))?;

                let ids: Vec<u64> = records.iter().map(|r| r.halo_id).collect();
                let infall_targets: Vec<SampleTarget> = records
                    .iter()
                    .map(|r| SampleTarget {
                        halo_id: r.halo_id,
                        target_z: r.infall.z,
                        pos_kpc: r.infall.pos,
                    })
                    .collect();
                let birth_targets: Vec<SampleTarget> = records
                    .iter()
                    .map(|r| SampleTarget {
                        halo_id: r.halo_id,
                        target_z: r.z_birth,
                        pos_kpc: r.birth_pos,
                    })
                    .collect();

                let mut loader = NpyFieldLoader::new(
                    cfg.field_dir_for(sim),
                    cfg.field_prefix_for(sim),
                    cfg.grid.ngrid,
                );
                let at_infall = sample_eigenvectors(
                    &infall_targets,
                    &table,
                    &grid,
                    tensor,
                    smo,
                    &mut loader,
                    RedshiftMatch::Exact,
                )?;
                let at_birth = sample_eigenvectors(
                    &birth_targets,
                    &table,
                    &grid,
                    tensor,
                    smo,
                    &mut loader,
                    RedshiftMatch::Exact,
                )?;

                let rows = eigen_rows_birth(&ids, &at_infall, &at_birth)?;
                let out = PathBuf::from(&cfg.output_dir).join(eigen_output_name(
                    cfg,
                    sim,
                    tensor,
                    smo,
                    &format!("LGs_{tag}"),
                ));
                write_eigen_table(&out, &rows)?;
                println!("      Saved: {}", out.display());
                written.push(out);
            }
        }
    }
    Ok(written)
}
