// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Infall Pipeline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-simulation infall extraction: catalog → merger trees → detector
//! → filtered 35-column table.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use halo_core::infall::{detect_infall, CrossingPolicy};
use halo_io::output::write_infall_table;
use halo_io::table::{host_id, ids_with_label, read_halo_history, read_satellite_catalog};
use halo_types::config::SurveyConfig;
use halo_types::error::{HaloError, HaloResult};
use halo_types::state::InfallRecord;

/// Counts from one simulation's infall run.
#[derive(Debug, Clone)]
pub struct InfallRunSummary {
    pub sim: String,
    pub n_satellites: usize,
    pub n_events: usize,
    /// Empty merger tree or inconclusive separation series.
    pub n_skipped: usize,
    /// Detected events dropped for non-finite derived columns.
    pub n_nonfinite: usize,
    pub output: PathBuf,
}

fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("  {msg} [{bar:32}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

/// Run the infall detector over every satellite of both hosts in one
/// simulation and write the filtered infall table.
pub fn run_infall(cfg: &SurveyConfig, sim: &str) -> HaloResult<InfallRunSummary> {
    println!("Processing simulation: {sim}");

    let catalog = read_satellite_catalog(&cfg.catalog_path(sim))?;
    let first_host = host_id(&catalog, 0).ok_or_else(|| {
        HaloError::ConfigError(format!("catalog for '{sim}' has no label-0 host"))
    })?;
    let second_host = host_id(&catalog, 1).ok_or_else(|| {
        HaloError::ConfigError(format!("catalog for '{sim}' has no label-1 host"))
    })?;

    let first_tree = read_halo_history(&cfg.tree_path(sim, first_host))?;
    let second_tree = read_halo_history(&cfg.tree_path(sim, second_host))?;

    // Host labels in the output table: 1 = first host, 2 = second host.
    let groups = [
        (ids_with_label(&catalog, 2), &first_tree, 1u8),
        (ids_with_label(&catalog, 3), &second_tree, 2u8),
    ];

    let n_satellites = groups[0].0.len() + groups[1].0.len();
    let pb = progress_bar(n_satellites as u64);
    pb.set_message(sim.to_string());

    let mut records = Vec::new();
    let mut n_skipped = 0usize;
    let mut n_nonfinite = 0usize;

    for (sat_ids, host_tree, label) in &groups {
        for &sat_id in sat_ids {
            // A satellite without a tree file was never traced; that is
            // the same condition as an empty tree, not an error.
            let sat_tree = match read_halo_history(&cfg.tree_path(sim, sat_id)) {
                Ok(tree) => tree,
                Err(HaloError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                    n_skipped += 1;
                    pb.inc(1);
                    continue;
                }
                Err(e) => return Err(e),
            };
            match detect_infall(&sat_tree, host_tree, cfg.rvir_factor, CrossingPolicy::default()) {
                Some(event) => {
                    let rec = InfallRecord::from_event(sat_id, *label, &event);
                    if rec.is_finite() {
                        records.push(rec);
                    } else {
                        n_nonfinite += 1;
                    }
                }
                None => n_skipped += 1,
            }
            pb.inc(1);
        }
    }
    pb.finish_and_clear();

    std::fs::create_dir_all(&cfg.output_dir)?;
    let output = cfg.infall_output_path(sim);
    let n_events = records.len();
    write_infall_table(&output, &records)?;
    println!(
        "Saved: {} ({} events, {} skipped, {} non-finite)",
        output.display(),
        n_events,
        n_skipped,
        n_nonfinite
    );

    Ok(InfallRunSummary {
        sim: sim.to_string(),
        n_satellites,
        n_events,
        n_skipped,
        n_nonfinite,
        output,
    })
}
