/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Geometry grouping
//!
//! Spectra measured at different sample orientations have to be calibrated
//! independently. Points are partitioned by their exact `(theta, phi)` pair;
//! points lacking either angle share a single ungrouped bucket.

use super::point::SpectrumPoint;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Orientation a spectrum point was measured under
///
/// Angles compare by exact value (`-0.0` equals `0.0`). Oriented keys order
/// before the ungrouped key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryKey {
    Oriented { theta: f64, phi: f64 },
    Ungrouped,
}

/// Geometry key → points of that geometry, in input order
///
/// Unordered; sort the keys when a stable group order matters.
pub type GeometryGroups = HashMap<GeometryKey, Vec<SpectrumPoint>>;

impl GeometryKey {
    /// Key for a pair of optional angles; missing or non-finite angles yield
    /// [`GeometryKey::Ungrouped`]
    pub fn from_angles(theta: Option<f64>, phi: Option<f64>) -> Self {
        match (theta, phi) {
            (Some(theta), Some(phi)) if theta.is_finite() && phi.is_finite() => {
                GeometryKey::Oriented {
                    theta: canonical(theta),
                    phi: canonical(phi),
                }
            }
            _ => GeometryKey::Ungrouped,
        }
    }

    pub fn is_ungrouped(&self) -> bool {
        matches!(self, GeometryKey::Ungrouped)
    }
}

// Folds -0.0 onto 0.0 so that bitwise hashing agrees with value equality
fn canonical(angle: f64) -> f64 {
    if angle == 0.0 {
        0.0
    } else {
        angle
    }
}

impl Ord for GeometryKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                GeometryKey::Oriented { theta: t1, phi: p1 },
                GeometryKey::Oriented { theta: t2, phi: p2 },
            ) => canonical(*t1)
                .total_cmp(&canonical(*t2))
                .then_with(|| canonical(*p1).total_cmp(&canonical(*p2))),
            (GeometryKey::Oriented { .. }, GeometryKey::Ungrouped) => Ordering::Less,
            (GeometryKey::Ungrouped, GeometryKey::Oriented { .. }) => Ordering::Greater,
            (GeometryKey::Ungrouped, GeometryKey::Ungrouped) => Ordering::Equal,
        }
    }
}

impl PartialOrd for GeometryKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GeometryKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GeometryKey {}

impl Hash for GeometryKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            GeometryKey::Oriented { theta, phi } => {
                0u8.hash(state);
                canonical(*theta).to_bits().hash(state);
                canonical(*phi).to_bits().hash(state);
            }
            GeometryKey::Ungrouped => 1u8.hash(state),
        }
    }
}

impl fmt::Display for GeometryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryKey::Oriented { theta, phi } => write!(f, "theta={theta}°, phi={phi}°"),
            GeometryKey::Ungrouped => write!(f, "ungrouped"),
        }
    }
}

/// Partition points by orientation
///
/// Every input point lands in exactly one group and keeps its relative order
/// within that group. An empty input yields an empty map.
pub fn group_by_geometry(points: &[SpectrumPoint]) -> GeometryGroups {
    let mut groups = GeometryGroups::new();
    for point in points {
        groups.entry(point.geometry_key()).or_default().push(*point);
    }
    groups
}
