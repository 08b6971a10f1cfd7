// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Tabular Readers
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Whitespace-separated table readers: satellite catalogs, AHF merger
//! trees, the snapshot-redshift lookup, and previously written infall
//! tables.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use halo_types::constants::INFALL_RECORD_COLS;
use halo_types::error::{HaloError, HaloResult};
use halo_types::state::{
    HaloHistory, HaloState, InfallRecord, SnapshotEntry, SnapshotRedshiftTable,
};

// AHF merger-tree column positions, after the leading redshift column.
const COL_Z: usize = 0;
const COL_MVIR: usize = 4;
const COL_XC: usize = 6;
const COL_VXC: usize = 9;
const COL_RVIR: usize = 12;
const COL_M_GAS: usize = 45;
const COL_M_STAR: usize = 65;
/// A tree row must reach at least through M_star.
pub const TREE_MIN_COLS: usize = COL_M_STAR + 1;

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Read every non-comment, non-empty row of a numeric table.
pub fn read_numeric_rows(path: &Path) -> HaloResult<Vec<Vec<f64>>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut rows = Vec::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let row: Result<Vec<f64>, _> = trimmed
            .split_whitespace()
            .map(|tok| tok.parse::<f64>())
            .collect();
        match row {
            Ok(values) => rows.push(values),
            Err(e) => {
                return Err(HaloError::TableParse {
                    path: path_str(path),
                    line: lineno + 1,
                    message: e.to_string(),
                })
            }
        }
    }
    Ok(rows)
}

fn tree_state(row: &[f64]) -> HaloState {
    HaloState {
        z: row[COL_Z],
        pos: [row[COL_XC], row[COL_XC + 1], row[COL_XC + 2]],
        vel: [row[COL_VXC], row[COL_VXC + 1], row[COL_VXC + 2]],
        mvir: row[COL_MVIR],
        m_gas: row[COL_M_GAS],
        m_star: row[COL_M_STAR],
        rvir: row[COL_RVIR],
    }
}

/// Read one halo's merger-tree history, present day first.
///
/// A zero-row table is a legitimate untraceable halo and yields an empty
/// history; a row with too few columns is a malformed table.
pub fn read_halo_history(path: &Path) -> HaloResult<HaloHistory> {
    let rows = read_numeric_rows(path)?;
    let mut snapshots = Vec::with_capacity(rows.len());
    for (n, row) in rows.iter().enumerate() {
        if row.len() < TREE_MIN_COLS {
            return Err(HaloError::TableParse {
                path: path_str(path),
                line: n + 1,
                message: format!(
                    "tree row has {} columns, need at least {}",
                    row.len(),
                    TREE_MIN_COLS
                ),
            });
        }
        snapshots.push(tree_state(row));
    }
    Ok(HaloHistory::new(snapshots))
}

/// One satellite-catalog row. Labels 0/1 mark the two hosts, 2/3 mark
/// satellites of each host respectively.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub halo_id: u64,
    pub mass: f64,
    pub label: u8,
}

/// Read the per-simulation satellite catalog.
pub fn read_satellite_catalog(path: &Path) -> HaloResult<Vec<CatalogEntry>> {
    let rows = read_numeric_rows(path)?;
    let mut entries = Vec::with_capacity(rows.len());
    for (n, row) in rows.iter().enumerate() {
        if row.len() < 3 {
            return Err(HaloError::TableParse {
                path: path_str(path),
                line: n + 1,
                message: format!("catalog row has {} columns, need 3", row.len()),
            });
        }
        entries.push(CatalogEntry {
            halo_id: row[0] as u64,
            mass: row[1],
            label: row[2] as u8,
        });
    }
    Ok(entries)
}

/// First catalog entry carrying the given label (host lookup).
pub fn host_id(entries: &[CatalogEntry], label: u8) -> Option<u64> {
    entries.iter().find(|e| e.label == label).map(|e| e.halo_id)
}

/// All catalog IDs carrying the given label (satellite selection).
pub fn ids_with_label(entries: &[CatalogEntry], label: u8) -> Vec<u64> {
    entries
        .iter()
        .filter(|e| e.label == label)
        .map(|e| e.halo_id)
        .collect()
}

/// Read the snapshot-redshift lookup table (rows of `snapshot z`).
pub fn read_snapshot_table(path: &Path) -> HaloResult<SnapshotRedshiftTable> {
    let rows = read_numeric_rows(path)?;
    let mut entries = Vec::with_capacity(rows.len());
    for (n, row) in rows.iter().enumerate() {
        if row.len() < 2 {
            return Err(HaloError::TableParse {
                path: path_str(path),
                line: n + 1,
                message: format!("snapshot row has {} columns, need 2", row.len()),
            });
        }
        entries.push(SnapshotEntry {
            snapshot: row[0] as u32,
            z: row[1],
        });
    }
    Ok(SnapshotRedshiftTable::new(entries))
}

/// Read back a previously written infall table.
pub fn read_infall_table(path: &Path) -> HaloResult<Vec<InfallRecord>> {
    let rows = read_numeric_rows(path)?;
    let mut records = Vec::with_capacity(rows.len());
    for (n, row) in rows.iter().enumerate() {
        if row.len() != INFALL_RECORD_COLS {
            return Err(HaloError::TableParse {
                path: path_str(path),
                line: n + 1,
                message: format!(
                    "infall row has {} columns, expected {}",
                    row.len(),
                    INFALL_RECORD_COLS
                ),
            });
        }
        let mut fixed = [0.0; INFALL_RECORD_COLS];
        fixed.copy_from_slice(row);
        records.push(InfallRecord::from_row(&fixed));
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "halo_io_{}_{}_{}",
            std::process::id(),
            name,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    /// Minimal AHF-like tree row: redshift plus 86 halo columns, with
    /// real values only where the reader looks.
    fn tree_row(z: f64, x: f64, rvir: f64) -> String {
        let mut cols = vec![0.0; TREE_MIN_COLS];
        cols[COL_Z] = z;
        cols[COL_MVIR] = 2.5e9;
        cols[COL_XC] = x;
        cols[COL_XC + 1] = x + 10.0;
        cols[COL_XC + 2] = x + 20.0;
        cols[COL_VXC] = -35.0;
        cols[COL_VXC + 1] = 12.0;
        cols[COL_VXC + 2] = 7.5;
        cols[COL_RVIR] = rvir;
        cols[COL_M_GAS] = 3.0e7;
        cols[COL_M_STAR] = 8.0e6;
        cols.iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_read_halo_history() {
        let contents = format!(
            "# z then AHF columns\n{}\n{}\n",
            tree_row(0.0, 47000.0, 55.0),
            tree_row(0.25, 47100.0, 48.0)
        );
        let path = temp_file("tree", &contents);
        let hist = read_halo_history(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(hist.len(), 2);
        let present = hist.present().unwrap();
        assert_eq!(present.z, 0.0);
        assert_eq!(present.pos, [47000.0, 47010.0, 47020.0]);
        assert_eq!(present.vel, [-35.0, 12.0, 7.5]);
        assert_eq!(present.mvir, 2.5e9);
        assert_eq!(present.m_gas, 3.0e7);
        assert_eq!(present.m_star, 8.0e6);
        assert_eq!(present.rvir, 55.0);
        assert_eq!(hist.birth().unwrap().z, 0.25);
    }

    #[test]
    fn test_empty_tree_is_empty_history() {
        let path = temp_file("empty_tree", "# header only\n");
        let hist = read_halo_history(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(hist.is_empty());
    }

    #[test]
    fn test_short_tree_row_is_error() {
        let path = temp_file("short_tree", "0.0 1.0 2.0\n");
        let err = read_halo_history(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, HaloError::TableParse { line: 1, .. }));
    }

    #[test]
    fn test_bad_token_reports_line() {
        let path = temp_file("bad_token", "1 2 3\n4 five 6\n");
        let err = read_numeric_rows(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, HaloError::TableParse { line: 2, .. }));
    }

    #[test]
    fn test_catalog_labels() {
        let contents = "\
127000000000002 1.1e12 0
127000000000003 0.9e12 1
127000000000017 3.0e9 2
127000000000021 2.0e9 2
127000000000033 1.5e9 3
";
        let path = temp_file("catalog", contents);
        let entries = read_satellite_catalog(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(entries.len(), 5);
        assert_eq!(host_id(&entries, 0), Some(127000000000002));
        assert_eq!(host_id(&entries, 1), Some(127000000000003));
        assert_eq!(
            ids_with_label(&entries, 2),
            vec![127000000000017, 127000000000021]
        );
        assert_eq!(ids_with_label(&entries, 3), vec![127000000000033]);
        assert_eq!(host_id(&entries, 4), None);
    }

    #[test]
    fn test_snapshot_table() {
        let path = temp_file("snaps", "127 0.000\n100 0.517\n060 2.103\n");
        let table = read_snapshot_table(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.len(), 3);
        assert_eq!(table.entries[0].snapshot, 127);
        assert_eq!(table.entries[2].snapshot, 60);
        assert!((table.entries[1].z - 0.517).abs() < 1e-12);
    }
}
