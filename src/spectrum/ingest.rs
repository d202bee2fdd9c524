/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Spectral ingestion
//!
//! Turns already-materialized key/value rows into canonical
//! [`SpectrumPoint`]s according to a [`ColumnMapping`]. Rows whose energy or
//! absorption is missing or non-numeric are dropped and counted rather than
//! reported individually.

use super::errors::{Result, SpectrumError};
use super::point::SpectrumPoint;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One source record: column identifier → cell value
pub type Row = serde_json::Map<String, Value>;

const ENERGY_HINTS: [&str; 3] = ["energy", "photon", "ev"];
const ABSORPTION_HINTS: [&str; 3] = ["absorption", "intensity", "signal"];

/// Which source columns play which semantic role
///
/// `fixed_theta`/`fixed_phi` apply to every row that has no usable value in
/// the corresponding angle column.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    pub energy_column: String,
    pub absorption_column: String,
    #[serde(default)]
    pub theta_column: Option<String>,
    #[serde(default)]
    pub phi_column: Option<String>,
    #[serde(default)]
    pub fixed_theta: Option<f64>,
    #[serde(default)]
    pub fixed_phi: Option<f64>,
}

impl ColumnMapping {
    /// Mapping for the two required roles only
    pub fn new(energy_column: impl Into<String>, absorption_column: impl Into<String>) -> Self {
        Self {
            energy_column: energy_column.into(),
            absorption_column: absorption_column.into(),
            ..Default::default()
        }
    }

    pub fn with_theta_column(mut self, column: impl Into<String>) -> Self {
        self.theta_column = Some(column.into());
        self
    }

    pub fn with_phi_column(mut self, column: impl Into<String>) -> Self {
        self.phi_column = Some(column.into());
        self
    }

    pub fn with_fixed_theta(mut self, theta: f64) -> Self {
        self.fixed_theta = Some(theta);
        self
    }

    pub fn with_fixed_phi(mut self, phi: f64) -> Self {
        self.fixed_phi = Some(phi);
        self
    }

    /// Guess a mapping from header names
    ///
    /// Matching is case-insensitive and by substring: energy from
    /// "energy"/"photon"/"ev" (in that order of preference), absorption from
    /// "absorption"/"intensity"/"signal", and "theta"/"phi" for the angles.
    /// A header is never assigned to two roles. Returns `None` when either
    /// required role cannot be filled.
    pub fn detect<S: AsRef<str>>(headers: &[S]) -> Option<Self> {
        let lowered: Vec<String> = headers
            .iter()
            .map(|h| h.as_ref().to_ascii_lowercase())
            .collect();
        let mut taken = vec![false; headers.len()];

        let mut claim = |hints: &[&str]| -> Option<String> {
            for hint in hints {
                let found = lowered
                    .iter()
                    .enumerate()
                    .find(|(idx, name)| !taken[*idx] && name.contains(hint));
                if let Some((idx, _)) = found {
                    taken[idx] = true;
                    return Some(headers[idx].as_ref().to_string());
                }
            }
            None
        };

        let energy_column = claim(&ENERGY_HINTS[..])?;
        let absorption_column = claim(&ABSORPTION_HINTS[..])?;
        let theta_column = claim(&["theta"][..]);
        let phi_column = claim(&["phi"][..]);

        Some(Self {
            energy_column,
            absorption_column,
            theta_column,
            phi_column,
            fixed_theta: None,
            fixed_phi: None,
        })
    }

    /// [`ColumnMapping::detect`] over every key that appears in `rows`
    pub fn detect_from_rows(rows: &[Row]) -> Option<Self> {
        let mut headers: Vec<&str> = Vec::new();
        for key in rows.iter().flat_map(|row| row.keys()) {
            if !headers.contains(&key.as_str()) {
                headers.push(key.as_str());
            }
        }
        Self::detect(&headers)
    }
}

/// Outcome of ingestion: the valid points plus how many rows were discarded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingested {
    pub points: Vec<SpectrumPoint>,
    pub dropped: usize,
}

/// Coerce a cell to a finite number
///
/// Numbers pass through, strings are parsed after trimming; anything else,
/// and any non-finite result, yields `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn read_angle(row: &Row, column: Option<&String>, fixed: Option<f64>) -> Option<f64> {
    column
        .and_then(|name| row.get(name))
        .and_then(coerce_number)
        .or(fixed.filter(|v| v.is_finite()))
}

/// Convert rows to spectrum points using `mapping` verbatim
///
/// # Errors
///
/// * [`SpectrumError::UnmappedColumn`] if the energy or absorption column
///   identifier is empty
/// * [`SpectrumError::EmptySpectrum`] if no row survives validation
pub fn ingest(rows: &[Row], mapping: &ColumnMapping) -> Result<Ingested> {
    if mapping.energy_column.is_empty() {
        return Err(SpectrumError::UnmappedColumn("energy"));
    }
    if mapping.absorption_column.is_empty() {
        return Err(SpectrumError::UnmappedColumn("absorption"));
    }

    let mut points = Vec::with_capacity(rows.len());
    let mut dropped = 0;

    for row in rows {
        let energy = row.get(&mapping.energy_column).and_then(coerce_number);
        let absorption = row.get(&mapping.absorption_column).and_then(coerce_number);

        let (Some(energy), Some(absorption)) = (energy, absorption) else {
            dropped += 1;
            continue;
        };

        let theta = read_angle(row, mapping.theta_column.as_ref(), mapping.fixed_theta);
        let phi = read_angle(row, mapping.phi_column.as_ref(), mapping.fixed_phi);
        points.push(SpectrumPoint::new(energy, absorption).with_geometry(theta, phi));
    }

    if dropped > 0 {
        debug!("Ingestion dropped {} of {} rows", dropped, rows.len());
    }

    if points.is_empty() {
        return Err(SpectrumError::EmptySpectrum { dropped });
    }

    Ok(Ingested { points, dropped })
}
