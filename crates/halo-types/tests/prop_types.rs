// ─────────────────────────────────────────────────────────────────────
// Halo Orbit Core — Property-Based Tests (proptest) for halo-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for halo-types using proptest.
//!
//! Covers: infall row layout invariants, the finite-row filter, and
//! configuration serialization roundtrip.

use proptest::prelude::*;

use halo_types::config::SurveyConfig;
use halo_types::constants::INFALL_RECORD_COLS;
use halo_types::state::{HaloHistory, HaloState, InfallEvent, InfallRecord};

fn finite() -> impl Strategy<Value = f64> {
    -1.0e12..1.0e12
}

prop_compose! {
    fn halo_state()(
        z in 0.0..12.0f64,
        x in finite(), y in finite(), zc in finite(),
        vx in finite(), vy in finite(), vz in finite(),
        mvir in 1.0e6..1.0e13f64,
        m_gas in 0.0..1.0e11f64,
        m_star in 0.0..1.0e11f64,
        rvir in 1.0..500.0f64,
    ) -> HaloState {
        HaloState {
            z,
            pos: [x, y, zc],
            vel: [vx, vy, vz],
            mvir,
            m_gas,
            m_star,
            rvir,
        }
    }
}

prop_compose! {
    fn infall_event()(
        index in 0usize..128,
        sat_infall in halo_state(),
        host_infall in halo_state(),
        sat_present in halo_state(),
        sat_birth in halo_state(),
        host_birth in halo_state(),
    ) -> InfallEvent {
        InfallEvent { index, sat_infall, host_infall, sat_present, sat_birth, host_birth }
    }
}

proptest! {
    /// Identity and host label always land in the first two columns.
    #[test]
    fn record_row_leads_with_identity(
        id in 1u64..1_000_000_000,
        label in 1u8..=2,
        event in infall_event(),
    ) {
        let row = InfallRecord::from_event(id, label, &event).to_row();
        prop_assert_eq!(row.len(), INFALL_RECORD_COLS);
        prop_assert_eq!(row[0], id as f64);
        prop_assert_eq!(row[1], label as f64);
        prop_assert_eq!(row[34], event.host_infall.rvir);
    }

    /// Every column a row carries survives to_row -> from_row -> to_row.
    #[test]
    fn record_row_is_stable(
        id in 1u64..1_000_000_000,
        label in 1u8..=2,
        event in infall_event(),
    ) {
        let rec = InfallRecord::from_event(id, label, &event);
        let row = rec.to_row();
        let echo = InfallRecord::from_row(&row).to_row();
        for (a, b) in row.iter().zip(echo.iter()) {
            prop_assert_eq!(a, b);
        }
    }

    /// Events built from finite states always pass the finite filter; a
    /// single poisoned column always fails it.
    #[test]
    fn finite_filter_detects_poison(
        event in infall_event(),
        col in 2usize..INFALL_RECORD_COLS,
    ) {
        let rec = InfallRecord::from_event(1, 1, &event);
        prop_assert!(rec.is_finite());

        let mut row = rec.to_row();
        row[col] = f64::NAN;
        prop_assert!(!InfallRecord::from_row(&row).is_finite());
    }

    /// Histories keep present-day at index 0 and formation at the tail.
    #[test]
    fn history_endpoints(states in prop::collection::vec(halo_state(), 1..64)) {
        let hist = HaloHistory::new(states.clone());
        prop_assert_eq!(hist.len(), states.len());
        prop_assert_eq!(hist.present().unwrap().z, states[0].z);
        prop_assert_eq!(hist.birth().unwrap().z, states[states.len() - 1].z);
    }
}

#[test]
fn config_roundtrip() {
    let json = r#"{
        "survey_name": "HESTIA-8192-GAL-FOR",
        "simulations": ["09_18"],
        "tree_dir": "/data/{sim}/AHF",
        "field_dir": "/data/{sim}/FIELDS",
        "catalog_dir": "/data/catalogs",
        "output_dir": "out",
        "tree_prefix": "HESTIA_100Mpc_8192_",
        "field_prefix": "CIC_8192_GAL_FOR_{sim}_",
        "snapshot_table": "/data/redshift_snap.txt",
        "grid": { "ngrid": 256, "box_size_mpc": 127.0 },
        "tensors": ["Shear"],
        "smoothings_mpc": [1, 2, 5],
        "host_ids": { "09_18": [2, 3] }
    }"#;
    let cfg: SurveyConfig = serde_json::from_str(json).unwrap();
    let echo: SurveyConfig =
        serde_json::from_str(&serde_json::to_string(&cfg).unwrap()).unwrap();
    assert_eq!(cfg.survey_name, echo.survey_name);
    assert_eq!(cfg.smoothings_mpc, echo.smoothings_mpc);
    assert_eq!(cfg.host_ids, echo.host_ids);
}
