/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

use approx::assert_relative_eq;
use nexafs_rs::bare_atom::{FormFactorSample, TableProvider};
use nexafs_rs::spectrum::{GeometryKey, Row};
use nexafs_rs::{
    compute_bare_atom_curve, detect_peaks, group_by_geometry, ingest, normalize_bare_atom,
    ColumnMapping, PeakOptions,
};
use serde_json::{json, Value};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn provider() -> TableProvider {
    let carbon = (0..=40)
        .map(|i| {
            let energy = 200.0 + 5.0 * i as f64;
            let f2 = if energy < 284.0 { 0.3 } else { 1.8 * 284.0 / energy };
            FormFactorSample::new(energy, 6.0, f2)
        })
        .collect();
    let hydrogen = (0..=4)
        .map(|i| FormFactorSample::new(200.0 + 50.0 * i as f64, 1.0, 0.01))
        .collect();
    TableProvider::new()
        .with_element("C", carbon)
        .with_element("H", hydrogen)
}

fn energies() -> Vec<f64> {
    (0..=400).map(|i| 280.0 + 0.1 * i as f64).collect()
}

fn resonance(energy: f64) -> f64 {
    3.0e4 * (-(energy - 285.5).powi(2) / (2.0 * 0.4 * 0.4)).exp()
}

/// Rows for two orientations of a polystyrene-like film with a π* resonance
/// at 285.5 eV, recorded with different detector gains
fn measured_rows(bare: &[f64]) -> Vec<Row> {
    let mut values = Vec::new();
    for (theta, scale, offset) in [(20.0, 2.0e-5, 0.05), (90.0, 5.0e-5, 0.01)] {
        for (energy, mu) in energies().into_iter().zip(bare) {
            values.push(json!({
                "Energy": energy,
                "Absorption": scale * (mu + resonance(energy)) + offset,
                "Theta": theta,
                "Phi": 0.0,
            }));
        }
    }
    values.push(json!({"Energy": 300.0, "Absorption": "n/a", "Theta": 20.0, "Phi": 0.0}));

    values
        .into_iter()
        .map(|v| match v {
            Value::Object(map) => map,
            other => panic!("row must be an object, got {}", other),
        })
        .collect()
}

#[test]
fn test_rows_to_normalized_peaks() {
    init_logging();

    let curve = compute_bare_atom_curve("C8H8", &energies(), &provider()).unwrap();
    assert!(curve.is_complete());
    let bare = curve.absorptions();

    let rows = measured_rows(&bare);
    let mapping = ColumnMapping::detect_from_rows(&rows).unwrap();
    assert_eq!(mapping.energy_column, "Energy");
    assert_eq!(mapping.absorption_column, "Absorption");

    let ingested = ingest(&rows, &mapping).unwrap();
    assert_eq!(ingested.dropped, 1);
    assert_eq!(ingested.points.len(), 802);

    let result = normalize_bare_atom(&ingested.points, &curve.points, 10, 10).unwrap();
    assert_eq!(result.groups.len(), 2);
    assert_relative_eq!(result.groups[0].scale, 2.0e-5, max_relative = 1e-9);
    assert_relative_eq!(result.groups[1].scale, 5.0e-5, max_relative = 1e-9);

    let groups = group_by_geometry(&result.points);
    for theta in [20.0, 90.0] {
        let members = &groups[&GeometryKey::from_angles(Some(theta), Some(0.0))];
        assert_eq!(members.len(), 401);

        for (point, mu) in members.iter().zip(&bare) {
            let expected = mu + resonance(point.energy);
            assert_relative_eq!(point.absorption, expected, max_relative = 1e-8);
        }

        let peaks = detect_peaks(members, &PeakOptions::default());
        assert_eq!(peaks.len(), 1, "theta {}: {:?}", theta, peaks);
        assert!((peaks[0].energy - 285.5).abs() < 0.15);
    }
}

#[test]
fn test_missing_element_still_normalizes() {
    init_logging();

    let carbon_only = TableProvider::new().with_element(
        "C",
        (0..=40)
            .map(|i| FormFactorSample::new(200.0 + 5.0 * i as f64, 6.0, 1.0))
            .collect(),
    );
    let curve = compute_bare_atom_curve("C8H8", &energies(), &carbon_only).unwrap();
    assert_eq!(curve.failed_elements().len(), 1);

    let rows = measured_rows(&curve.absorptions());
    let mapping = ColumnMapping::new("Energy", "Absorption")
        .with_theta_column("Theta")
        .with_phi_column("Phi");
    let ingested = ingest(&rows, &mapping).unwrap();

    let result = normalize_bare_atom(&ingested.points, &curve.points, 10, 10).unwrap();
    assert_eq!(result.points.len(), ingested.points.len());
}
