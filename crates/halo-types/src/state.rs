// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::INFALL_RECORD_COLS;

/// One merger-tree row: the full tracked state of a halo at one redshift.
/// Positions are comoving kpc, velocities km/s, masses Msun/h, Rvir kpc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HaloState {
    pub z: f64,
    pub pos: [f64; 3],
    pub vel: [f64; 3],
    pub mvir: f64,
    pub m_gas: f64,
    pub m_star: f64,
    pub rvir: f64,
}

/// Merger-tree history of one halo, ordered from present day (index 0)
/// to the earliest tracked epoch (last index = formation).
///
/// An empty history means the halo could not be traced at all; that is a
/// different condition from "traced but never infalling" and both are
/// surfaced as `None` by the detector, not as errors.
#[derive(Debug, Clone, Default)]
pub struct HaloHistory {
    pub snapshots: Vec<HaloState>,
}

impl HaloHistory {
    pub fn new(snapshots: Vec<HaloState>) -> Self {
        Self { snapshots }
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Present-day state (index 0), if the halo was traced at all.
    pub fn present(&self) -> Option<&HaloState> {
        self.snapshots.first()
    }

    /// Earliest tracked state (last index).
    pub fn birth(&self) -> Option<&HaloState> {
        self.snapshots.last()
    }
}

/// Detected threshold crossing for one satellite, with the surrounding
/// context needed for the output row. At most one per satellite.
#[derive(Debug, Clone)]
pub struct InfallEvent {
    /// Index into the (truncated) satellite history where the crossing
    /// was detected. Index 0 is present day.
    pub index: usize,
    pub sat_infall: HaloState,
    pub host_infall: HaloState,
    pub sat_present: HaloState,
    pub sat_birth: HaloState,
    pub host_birth: HaloState,
}

/// Flat 35-column infall row, in output order.
#[derive(Debug, Clone)]
pub struct InfallRecord {
    pub halo_id: u64,
    pub host_label: u8,
    pub infall: HaloState,
    pub present: HaloState,
    pub host_pos: [f64; 3],
    pub host_vel: [f64; 3],
    pub z_birth: f64,
    pub birth_pos: [f64; 3],
    pub host_birth_pos: [f64; 3],
    pub host_rvir: f64,
}

/// Column header for the infall table, one name per output column.
pub const INFALL_HEADER: &str = "halo_id 1:M31/2:MW z_inf Xc_inf Yc_inf Zc_inf Vx_inf Vy_inf Vz_inf Mvir_inf Mgas_inf Mstar_inf Xc_0 Yc_0 Zc_0 Vx_0 Vy_0 Vz_0 Mvir_0 Mgas_0 Mstar_0 XcLG YcLG ZcLG VxLG VyLG VzLG zbirth xcbirth ycbirth zcbirth xlg_birth ylg_birth zlg_birth rvir";

impl InfallRecord {
    /// Assemble the output row from a detected event.
    pub fn from_event(halo_id: u64, host_label: u8, event: &InfallEvent) -> Self {
        InfallRecord {
            halo_id,
            host_label,
            infall: event.sat_infall,
            present: event.sat_present,
            host_pos: event.host_infall.pos,
            host_vel: event.host_infall.vel,
            z_birth: event.sat_birth.z,
            birth_pos: event.sat_birth.pos,
            host_birth_pos: event.host_birth.pos,
            host_rvir: event.host_infall.rvir,
        }
    }

    /// Flatten to the 35-column output order matching `INFALL_HEADER`.
    pub fn to_row(&self) -> [f64; INFALL_RECORD_COLS] {
        let mut row = [0.0; INFALL_RECORD_COLS];
        row[0] = self.halo_id as f64;
        row[1] = self.host_label as f64;
        row[2] = self.infall.z;
        row[3..6].copy_from_slice(&self.infall.pos);
        row[6..9].copy_from_slice(&self.infall.vel);
        row[9] = self.infall.mvir;
        row[10] = self.infall.m_gas;
        row[11] = self.infall.m_star;
        row[12..15].copy_from_slice(&self.present.pos);
        row[15..18].copy_from_slice(&self.present.vel);
        row[18] = self.present.mvir;
        row[19] = self.present.m_gas;
        row[20] = self.present.m_star;
        row[21..24].copy_from_slice(&self.host_pos);
        row[24..27].copy_from_slice(&self.host_vel);
        row[27] = self.z_birth;
        row[28..31].copy_from_slice(&self.birth_pos);
        row[31..34].copy_from_slice(&self.host_birth_pos);
        row[34] = self.host_rvir;
        row
    }

    /// Rebuild a record from a 35-column row (inverse of `to_row`).
    /// Columns the row does not carry (present-day z, satellite Rvir,
    /// masses at birth) are left at zero.
    pub fn from_row(row: &[f64; INFALL_RECORD_COLS]) -> Self {
        let vec3 = |offset: usize| [row[offset], row[offset + 1], row[offset + 2]];
        let state = |z, pos, vel, mvir, m_gas, m_star, rvir| HaloState {
            z,
            pos,
            vel,
            mvir,
            m_gas,
            m_star,
            rvir,
        };
        InfallRecord {
            halo_id: row[0] as u64,
            host_label: row[1] as u8,
            infall: state(row[2], vec3(3), vec3(6), row[9], row[10], row[11], 0.0),
            present: state(0.0, vec3(12), vec3(15), row[18], row[19], row[20], 0.0),
            host_pos: vec3(21),
            host_vel: vec3(24),
            z_birth: row[27],
            birth_pos: vec3(28),
            host_birth_pos: vec3(31),
            host_rvir: row[34],
        }
    }

    /// True when every derived column is finite. Rows failing this check
    /// are dropped before serialization.
    pub fn is_finite(&self) -> bool {
        self.to_row()[2..].iter().all(|v| v.is_finite())
    }
}

/// Integer grid cell from coordinate truncation. Deliberately unclamped;
/// bounds are enforced at the sampling site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub i: i64,
    pub j: i64,
    pub k: i64,
}

/// One row of the snapshot-redshift lookup table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotEntry {
    pub snapshot: u32,
    pub z: f64,
}

/// Static mapping from snapshot identifier to its tabulated redshift.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRedshiftTable {
    pub entries: Vec<SnapshotEntry>,
}

impl SnapshotRedshiftTable {
    pub fn new(entries: Vec<SnapshotEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SnapshotEntry> {
        self.entries.iter()
    }
}
