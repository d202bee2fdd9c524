/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

use nexafs_rs::spectrum::{
    group_by_geometry, ingest, ColumnMapping, GeometryKey, Row, SpectrumError, SpectrumPoint,
};
use serde_json::{json, Value};

fn rows(values: Vec<Value>) -> Vec<Row> {
    values
        .into_iter()
        .map(|v| match v {
            Value::Object(map) => map,
            other => panic!("row must be an object, got {}", other),
        })
        .collect()
}

#[test]
fn test_rows_without_angles_form_one_ungrouped_group() {
    let data = rows(
        (0..10)
            .map(|i| json!({"Energy": 280.0 + i as f64, "Absorption": 0.1 * i as f64}))
            .collect(),
    );

    let ingested = ingest(&data, &ColumnMapping::new("Energy", "Absorption")).unwrap();
    assert_eq!(ingested.points.len(), 10);
    assert_eq!(ingested.dropped, 0);

    let groups = group_by_geometry(&ingested.points);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[&GeometryKey::Ungrouped].len(), 10);
}

#[test]
fn test_auto_detected_mapping_with_angle_columns() {
    let mut values = Vec::new();
    for theta in [20.0, 55.0, 90.0] {
        for i in 0..5 {
            values.push(json!({
                "Photon Energy": format!("{}", 284.0 + i as f64),
                "Intensity": 1.0 + i as f64,
                "Theta": theta,
                "Phi": 0,
            }));
        }
    }
    let data = rows(values);

    let mapping = ColumnMapping::detect_from_rows(&data).unwrap();
    assert_eq!(mapping.theta_column.as_deref(), Some("Theta"));

    let ingested = ingest(&data, &mapping).unwrap();
    let groups = group_by_geometry(&ingested.points);
    assert_eq!(groups.len(), 3);
    for members in groups.values() {
        assert_eq!(members.len(), 5);
    }
    assert!(groups.contains_key(&GeometryKey::Oriented {
        theta: 55.0,
        phi: 0.0
    }));
}

#[test]
fn test_fixed_angles_apply_to_every_row() {
    let data = rows(vec![
        json!({"e": 280.0, "a": 1.0}),
        json!({"e": 281.0, "a": 2.0}),
    ]);
    let mapping = ColumnMapping::new("e", "a")
        .with_fixed_theta(54.7)
        .with_fixed_phi(0.0);

    let ingested = ingest(&data, &mapping).unwrap();
    let groups = group_by_geometry(&ingested.points);
    assert_eq!(groups.len(), 1);
    assert!(!groups.keys().next().unwrap().is_ungrouped());
}

#[test]
fn test_caller_mapping_is_honored_verbatim() {
    // Heuristics would pick "energy", but the caller asked for "E_cal"
    let data = rows(vec![
        json!({"energy": 1.0, "E_cal": 285.0, "signal": 3.0}),
        json!({"energy": 2.0, "E_cal": 286.0, "signal": 4.0}),
    ]);
    let ingested = ingest(&data, &ColumnMapping::new("E_cal", "signal")).unwrap();
    let energies: Vec<f64> = ingested.points.iter().map(|p| p.energy).collect();
    assert_eq!(energies, vec![285.0, 286.0]);
}

#[test]
fn test_all_rows_invalid() {
    let data = rows(vec![
        json!({"Energy": "", "Absorption": 1.0}),
        json!({"Energy": 280.0, "Absorption": "NaN"}),
        json!({"Absorption": 1.0}),
    ]);
    assert_eq!(
        ingest(&data, &ColumnMapping::new("Energy", "Absorption")),
        Err(SpectrumError::EmptySpectrum { dropped: 3 })
    );
}

#[test]
fn test_grouping_partitions_mixed_geometries() {
    // Deterministic pseudo-random assignment of angles, some missing
    let thetas = [Some(20.0), Some(55.0), None, Some(90.0)];
    let phis = [Some(0.0), Some(45.0), Some(0.0)];
    let points: Vec<SpectrumPoint> = (0..97)
        .map(|i| {
            SpectrumPoint::new(280.0 + 0.25 * i as f64, (i * 7 % 13) as f64)
                .with_geometry(thetas[(i * 5) % 4], phis[i % 3])
        })
        .collect();

    let groups = group_by_geometry(&points);

    let mut regrouped: Vec<SpectrumPoint> = groups.values().flatten().copied().collect();
    assert_eq!(regrouped.len(), points.len());

    regrouped.sort_by(|a, b| a.energy.total_cmp(&b.energy));
    assert_eq!(regrouped, points);

    for (key, members) in &groups {
        assert!(members.iter().all(|p| p.geometry_key() == *key));
    }
}
