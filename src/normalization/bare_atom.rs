/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Bare-atom regression normalization
//!
//! Within each geometry group the measured absorption of the calibration
//! points (those inside the pre- or post-edge range) is fitted as
//! `measured = scale · theoretical + offset`, where `theoretical` is the
//! bare-atom curve interpolated at each point's energy. Every point of the
//! group is then mapped into bare-atom units by `(measured − offset) / scale`.
//!
//! Calibration is all-or-nothing: if any group lacks two calibration points
//! the whole normalization is unavailable.

use super::errors::{NormalizationError, Result};
use super::range::EnergyRange;
use super::{GroupCalibration, NormalizationResult};
use crate::bare_atom::BareAtomPoint;
use crate::spectrum::{group_by_geometry, sort_by_energy, GeometryKey, SpectrumPoint};
use crate::utils::math::REGRESSION_EPSILON;
use crate::utils::{interpolate_table, linear_fit, mean};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Calibrate `points` against a bare-atom `reference` curve
///
/// # Arguments
///
/// * `points` - Measured spectrum, any order, any mix of geometries
/// * `reference` - Bare-atom curve; clamped outside its energy domain
/// * `pre_edge_count` - Number of lowest-energy points spanning the pre-edge range
/// * `post_edge_count` - Number of highest-energy points spanning the post-edge range
///
/// # Returns
///
/// Normalized points sorted by energy, per-group coefficients, and their
/// point-count-weighted aggregate
pub fn normalize_bare_atom(
    points: &[SpectrumPoint],
    reference: &[BareAtomPoint],
    pre_edge_count: usize,
    post_edge_count: usize,
) -> Result<NormalizationResult> {
    if points.is_empty() {
        return Err(NormalizationError::EmptyInput);
    }

    let sorted = sort_by_energy(points);
    let (pre_range, post_range) =
        EnergyRange::from_edge_counts(&sorted, pre_edge_count, post_edge_count);
    let pre_range = pre_range.ok_or(NormalizationError::EmptyEdgeRange("pre"))?;
    let post_range = post_range.ok_or(NormalizationError::EmptyEdgeRange("post"))?;

    if reference.is_empty() {
        return Err(NormalizationError::EmptyReference);
    }
    let mut reference = reference.to_vec();
    reference.sort_by(|a, b| a.energy.total_cmp(&b.energy));
    let reference_energies: Vec<f64> = reference.iter().map(|p| p.energy).collect();
    let reference_absorptions: Vec<f64> = reference.iter().map(|p| p.absorption).collect();

    // Calibrate in key order
    let mut groups: Vec<(GeometryKey, Vec<SpectrumPoint>)> =
        group_by_geometry(&sorted).into_iter().collect();
    groups.sort_by(|a, b| a.0.cmp(&b.0));
    let mut calibrations = Vec::with_capacity(groups.len());

    for (geometry, members) in &groups {
        let calibration: Vec<&SpectrumPoint> = members
            .iter()
            .filter(|p| pre_range.contains(p.energy) || post_range.contains(p.energy))
            .collect();

        if calibration.len() < 2 {
            return Err(NormalizationError::InsufficientCalibrationPoints {
                group: *geometry,
                found: calibration.len(),
            });
        }

        let theoretical = calibration
            .iter()
            .map(|p| interpolate_table(p.energy, &reference_energies, &reference_absorptions))
            .collect::<std::result::Result<Vec<f64>, _>>()?;
        let measured: Vec<f64> = calibration.iter().map(|p| p.absorption).collect();

        let (scale, offset, degenerate) = fit_group(&theoretical, &measured)?;
        if degenerate {
            warn!(
                "Degenerate bare-atom regression for geometry {}; using unit scale",
                geometry
            );
        }

        calibrations.push(GroupCalibration {
            geometry: *geometry,
            scale,
            offset,
            points: members.len(),
            calibration_points: calibration.len(),
            degenerate,
        });
    }

    let coefficients: BTreeMap<GeometryKey, (f64, f64)> = calibrations
        .iter()
        .map(|c| (c.geometry, (c.scale, c.offset)))
        .collect();

    let normalized = sorted
        .iter()
        .map(|p| {
            let (scale, offset) = coefficients
                .get(&p.geometry_key())
                .copied()
                .unwrap_or((1.0, 0.0));
            p.with_absorption((p.absorption - offset) / scale)
        })
        .collect();

    let total_points: f64 = calibrations.iter().map(|c| c.points as f64).sum();
    let scale = calibrations
        .iter()
        .map(|c| c.scale * c.points as f64)
        .sum::<f64>()
        / total_points;
    let offset = calibrations
        .iter()
        .map(|c| c.offset * c.points as f64)
        .sum::<f64>()
        / total_points;

    debug!(
        "Bare-atom normalization over {} geometry groups: scale {:.6}, offset {:.6}",
        calibrations.len(),
        scale,
        offset
    );

    Ok(NormalizationResult {
        points: normalized,
        scale,
        offset,
        pre_range,
        post_range,
        groups: calibrations,
    })
}

/// Least-squares `(scale, offset, degenerate)` of measured on theoretical
fn fit_group(theoretical: &[f64], measured: &[f64]) -> Result<(f64, f64, bool)> {
    let fit = linear_fit(theoretical, measured)?;
    if fit.degenerate {
        return Ok((fit.slope, fit.intercept, true));
    }

    // A vanishing slope cannot be inverted; treat it like a flat regression
    if !fit.slope.is_finite() || fit.slope.abs() < REGRESSION_EPSILON {
        let offset = mean(measured).unwrap_or(0.0) - mean(theoretical).unwrap_or(0.0);
        return Ok((1.0, offset, true));
    }

    Ok((fit.slope, fit.intercept, false))
}
