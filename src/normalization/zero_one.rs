/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Zero-one edge-step normalization

use super::errors::{NormalizationError, Result};
use super::range::EnergyRange;
use super::NormalizationResult;
use crate::spectrum::SpectrumPoint;
use crate::utils::mean;
use log::debug;

/// Smallest edge step (post-edge minus pre-edge average) that is accepted
pub const EDGE_STEP_EPSILON: f64 = 1e-10;

fn edge_average(
    points: &[SpectrumPoint],
    range: EnergyRange,
    edge: &'static str,
) -> Result<f64> {
    let selected: Vec<f64> = points
        .iter()
        .filter(|p| range.contains(p.energy))
        .map(|p| p.absorption)
        .collect();
    mean(&selected).ok_or(NormalizationError::EmptyEdgeSelection { edge, range })
}

/// Map the pre-edge average to 0 and the post-edge average to 1
///
/// The same linear map `absorption · scale + offset` with
/// `scale = 1 / (post − pre)` and `offset = −pre · scale` is applied to every
/// point, regardless of geometry. Output keeps the input order.
pub fn normalize_zero_one(
    points: &[SpectrumPoint],
    pre_range: EnergyRange,
    post_range: EnergyRange,
) -> Result<NormalizationResult> {
    if points.is_empty() {
        return Err(NormalizationError::EmptyInput);
    }

    let pre_average = edge_average(points, pre_range, "pre")?;
    let post_average = edge_average(points, post_range, "post")?;

    let step = post_average - pre_average;
    if step.abs() < EDGE_STEP_EPSILON {
        return Err(NormalizationError::DegenerateEdgeStep {
            pre_average,
            post_average,
        });
    }

    let scale = 1.0 / step;
    let offset = -pre_average * scale;
    debug!(
        "Zero-one normalization: pre {:.6}, post {:.6}, scale {:.6}",
        pre_average, post_average, scale
    );

    let normalized = points
        .iter()
        .map(|p| p.with_absorption(p.absorption * scale + offset))
        .collect();

    Ok(NormalizationResult {
        points: normalized,
        scale,
        offset,
        pre_range,
        post_range,
        groups: Vec::new(),
    })
}
