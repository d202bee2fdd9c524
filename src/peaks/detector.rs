/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Prominence-based peak detection
//!
//! # Algorithm
//!
//! 1. Sort points by energy
//! 2. Find local maxima; a flat plateau bounded by strictly lower neighbours
//!    counts once, at its midpoint
//! 3. Prominence: walk outward (at most `min(N/10, 100)` samples per side)
//!    tracking the lowest value until a higher sample is met; prominence is the
//!    peak height minus the higher of the two side minima
//! 4. Filter by prominence, then height, then threshold (the drop to the
//!    samples just outside a plateau)
//! 5. Accept candidates greedily by descending intensity, rejecting any within
//!    `min_distance` eV of an accepted peak or narrower than `width`
//! 6. Return accepted peaks by ascending energy
//!
//! Relative thresholds are fractions of the global maximum intensity.

use crate::spectrum::{sort_by_energy, SpectrumPoint};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_PROMINENCE: f64 = 0.05;
/// Lower bound of the default minimum peak separation, eV
pub const MIN_DISTANCE_FLOOR: f64 = 0.05;
/// Default minimum separation as a fraction of the energy range
pub const MIN_DISTANCE_FRACTION: f64 = 0.01;
/// Upper bound on the prominence walk, samples per side
pub const MAX_PROMINENCE_WINDOW: usize = 100;

/// A detected absorption peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedPeak {
    /// eV
    pub energy: f64,
    pub intensity: f64,
    pub prominence: f64,
    /// Position in the energy-sorted input
    pub index: usize,
    /// Samples at or above half prominence around the peak
    pub width: usize,
}

/// Peak detection filters
///
/// Fractions refer to the global maximum intensity of the spectrum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PeakOptions {
    /// Minimum prominence as a fraction of the global maximum
    pub min_prominence: f64,
    /// Minimum separation between accepted peaks in eV; defaults to
    /// `max(0.05, 1% of the energy range)`
    pub min_distance: Option<f64>,
    /// Minimum half-prominence width in samples
    pub width: Option<usize>,
    /// Minimum intensity as a fraction of the global maximum
    pub height: Option<f64>,
    /// Minimum drop to the nearer immediate neighbour, as a fraction of the
    /// global maximum
    pub threshold: Option<f64>,
}

impl Default for PeakOptions {
    fn default() -> Self {
        Self {
            min_prominence: DEFAULT_MIN_PROMINENCE,
            min_distance: None,
            width: None,
            height: None,
            threshold: None,
        }
    }
}

/// A local maximum: reported index plus the first and last sample of its
/// plateau (equal to `index` for a strict maximum)
#[derive(Debug, Clone, Copy, PartialEq)]
struct LocalMaximum {
    index: usize,
    left: usize,
    right: usize,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    maximum: LocalMaximum,
    prominence: f64,
}

impl Candidate {
    fn index(&self) -> usize {
        self.maximum.index
    }
}

/// Detect peaks in a spectrum
///
/// Never fails: fewer than three points, or no maximum passing the filters,
/// yields an empty vector.
pub fn detect_peaks(points: &[SpectrumPoint], options: &PeakOptions) -> Vec<DetectedPeak> {
    if points.len() < 3 {
        return Vec::new();
    }

    let sorted = sort_by_energy(points);
    let energies: Vec<f64> = sorted.iter().map(|p| p.energy).collect();
    let intensities: Vec<f64> = sorted.iter().map(|p| p.absorption).collect();
    let n = intensities.len();

    let global_max = intensities.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !global_max.is_finite() {
        return Vec::new();
    }
    let reference = global_max.abs();

    let energy_range = energies[n - 1] - energies[0];
    let min_distance = options
        .min_distance
        .unwrap_or_else(|| (MIN_DISTANCE_FRACTION * energy_range).max(MIN_DISTANCE_FLOOR));
    let window = (n / 10).clamp(1, MAX_PROMINENCE_WINDOW);

    let mut candidates: Vec<Candidate> = local_maxima(&intensities)
        .into_iter()
        .map(|maximum| Candidate {
            maximum,
            prominence: prominence(&intensities, maximum.index, window),
        })
        .collect();

    let min_prominence = options.min_prominence * reference;
    candidates.retain(|c| c.prominence >= min_prominence);

    if let Some(height) = options.height {
        let min_height = height * global_max;
        candidates.retain(|c| intensities[c.index()] >= min_height);
    }

    if let Some(threshold) = options.threshold {
        let min_drop = threshold * reference;
        candidates.retain(|c| neighbour_drop(&intensities, c.maximum) >= min_drop);
    }

    candidates.sort_by(|a, b| {
        intensities[b.index()]
            .total_cmp(&intensities[a.index()])
            .then(a.index().cmp(&b.index()))
    });

    let mut accepted: Vec<DetectedPeak> = Vec::new();
    for candidate in candidates {
        let energy = energies[candidate.index()];
        if accepted
            .iter()
            .any(|peak| (peak.energy - energy).abs() < min_distance)
        {
            continue;
        }

        let width = half_prominence_width(&intensities, candidate.index(), candidate.prominence);
        if options.width.is_some_and(|min_width| width < min_width) {
            continue;
        }

        accepted.push(DetectedPeak {
            energy,
            intensity: intensities[candidate.index()],
            prominence: candidate.prominence,
            index: candidate.index(),
            width,
        });
    }

    accepted.sort_by(|a, b| a.energy.total_cmp(&b.energy));
    accepted
}

/// Strict local maxima and plateau midpoints, excluding the ends
#[allow(clippy::float_cmp)] // plateaus are runs of exactly equal samples
fn local_maxima(data: &[f64]) -> Vec<LocalMaximum> {
    let n = data.len();
    let mut maxima = Vec::new();
    let mut i = 1;

    while i + 1 < n {
        if data[i] > data[i - 1] {
            let start = i;
            let mut end = i;
            while end + 1 < n && data[end + 1] == data[start] {
                end += 1;
            }
            if end + 1 < n && data[end + 1] < data[start] {
                maxima.push(LocalMaximum {
                    index: (start + end) / 2,
                    left: start,
                    right: end,
                });
            }
            i = end + 1;
        } else {
            i += 1;
        }
    }
    maxima
}

/// Height above the higher of the two bounded side minima
fn prominence(data: &[f64], peak_idx: usize, window: usize) -> f64 {
    let height = data[peak_idx];

    let mut left_min = height;
    for &value in data[peak_idx.saturating_sub(window)..peak_idx].iter().rev() {
        if value > height {
            break;
        }
        left_min = left_min.min(value);
    }

    let right_end = (peak_idx + window).min(data.len() - 1);
    let mut right_min = height;
    for &value in &data[peak_idx + 1..=right_end] {
        if value > height {
            break;
        }
        right_min = right_min.min(value);
    }

    height - left_min.max(right_min)
}

/// Vertical drop to the nearer (in value) of the samples just outside the
/// peak's plateau
fn neighbour_drop(data: &[f64], maximum: LocalMaximum) -> f64 {
    let height = data[maximum.index];
    (height - data[maximum.left - 1]).min(height - data[maximum.right + 1])
}

/// Number of contiguous samples around the peak at or above half prominence
fn half_prominence_width(data: &[f64], peak_idx: usize, prominence: f64) -> usize {
    let level = data[peak_idx] - prominence / 2.0;

    let mut left = peak_idx;
    while left > 0 && data[left - 1] >= level {
        left -= 1;
    }
    let mut right = peak_idx;
    while right + 1 < data.len() && data[right + 1] >= level {
        right += 1;
    }
    right - left + 1
}
