/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Canonical spectrum point

use super::geometry::GeometryKey;
use serde::{Deserialize, Serialize};

/// One measured sample: absorption at a photon energy, optionally tagged with
/// the sample orientation it was measured under
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectrumPoint {
    /// Photon energy in eV
    pub energy: f64,
    /// Measured (or normalized) absorption
    pub absorption: f64,
    /// Polar angle in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
    /// Azimuthal angle in degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phi: Option<f64>,
}

impl SpectrumPoint {
    /// Create a point without orientation information
    pub fn new(energy: f64, absorption: f64) -> Self {
        Self {
            energy,
            absorption,
            theta: None,
            phi: None,
        }
    }

    /// Copy of this point with the given orientation
    pub fn with_geometry(self, theta: Option<f64>, phi: Option<f64>) -> Self {
        Self { theta, phi, ..self }
    }

    /// Copy of this point carrying a new absorption value
    pub fn with_absorption(&self, absorption: f64) -> Self {
        Self {
            absorption,
            ..*self
        }
    }

    /// Geometry group this point belongs to
    pub fn geometry_key(&self) -> GeometryKey {
        GeometryKey::from_angles(self.theta, self.phi)
    }
}

/// Copy of `points` ordered by ascending energy
pub fn sort_by_energy(points: &[SpectrumPoint]) -> Vec<SpectrumPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.energy.total_cmp(&b.energy));
    sorted
}
