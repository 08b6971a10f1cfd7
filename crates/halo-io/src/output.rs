// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Output Writers
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Serialization of infall tables (text) and eigenvector tables (`.npy`).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ndarray::Array2;
use ndarray_npy::write_npy;

use halo_core::sampler::{EigenSample, SampleTarget};
use halo_types::constants::{EIGEN_BIRTH_ROW_COLS, EIGEN_ROW_COLS};
use halo_types::error::{HaloError, HaloResult};
use halo_types::state::{InfallRecord, INFALL_HEADER};

/// Write the infall table: a `#` header line then one 35-column row per
/// record. Callers filter non-finite rows beforehand.
pub fn write_infall_table(path: &Path, records: &[InfallRecord]) -> HaloResult<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    writeln!(w, "# {INFALL_HEADER}")?;
    for rec in records {
        let row = rec.to_row();
        write!(w, "{} {}", rec.halo_id, rec.host_label)?;
        for v in &row[2..] {
            write!(w, " {v}")?;
        }
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}

/// Assemble the 13-column single-epoch table: target redshift, position
/// (kpc), then the three gathered eigenvectors.
pub fn eigen_rows_current(
    targets: &[SampleTarget],
    samples: &[EigenSample],
) -> HaloResult<Array2<f64>> {
    if targets.len() != samples.len() {
        return Err(HaloError::ConfigError(format!(
            "target/sample length mismatch: {} vs {}",
            targets.len(),
            samples.len()
        )));
    }
    let mut rows = Array2::zeros((targets.len(), EIGEN_ROW_COLS));
    for (n, (t, s)) in targets.iter().zip(samples.iter()).enumerate() {
        rows[[n, 0]] = t.target_z;
        rows[[n, 1]] = t.pos_kpc[0];
        rows[[n, 2]] = t.pos_kpc[1];
        rows[[n, 3]] = t.pos_kpc[2];
        for slot in 0..3 {
            for c in 0..3 {
                rows[[n, 4 + slot * 3 + c]] = s.vectors[slot][c];
            }
        }
    }
    Ok(rows)
}

/// Assemble the 19-column birth/infall table: halo id, nine infall
/// components, nine birth components. Unmatched epochs stay zero.
pub fn eigen_rows_birth(
    ids: &[u64],
    infall: &[EigenSample],
    birth: &[EigenSample],
) -> HaloResult<Array2<f64>> {
    if ids.len() != infall.len() || ids.len() != birth.len() {
        return Err(HaloError::ConfigError(format!(
            "id/sample length mismatch: {} ids, {} infall, {} birth",
            ids.len(),
            infall.len(),
            birth.len()
        )));
    }
    let mut rows = Array2::zeros((ids.len(), EIGEN_BIRTH_ROW_COLS));
    for n in 0..ids.len() {
        rows[[n, 0]] = ids[n] as f64;
        for slot in 0..3 {
            for c in 0..3 {
                rows[[n, 1 + slot * 3 + c]] = infall[n].vectors[slot][c];
                rows[[n, 10 + slot * 3 + c]] = birth[n].vectors[slot][c];
            }
        }
    }
    Ok(rows)
}

/// Write an eigenvector table as a 2-D `.npy` array.
pub fn write_eigen_table(path: &Path, rows: &Array2<f64>) -> HaloResult<()> {
    write_npy(path, rows).map_err(|e| {
        HaloError::ConfigError(format!(
            "failed to write eigen table {}: {e}",
            path.to_string_lossy()
        ))
    })
}
