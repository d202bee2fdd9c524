/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Normalization module
//!
//! Two interchangeable strategies rescale measured absorption:
//!
//! * [`normalize_bare_atom`] regresses each geometry group against a
//!   theoretical bare-atom curve over the pre- and post-edge regions and maps
//!   the group into bare-atom units.
//! * [`normalize_zero_one`] maps the pre-edge average to 0 and the post-edge
//!   average to 1.
//!
//! Both return new points; the input is never modified.

pub mod bare_atom;
pub mod errors;
pub mod range;
pub mod zero_one;

pub use bare_atom::normalize_bare_atom;
pub use errors::{NormalizationError, Result};
pub use range::EnergyRange;
pub use zero_one::normalize_zero_one;

use crate::bare_atom::BareAtomPoint;
use crate::spectrum::{GeometryKey, SpectrumPoint};
use serde::{Deserialize, Serialize};

/// Linear coefficients one geometry group was calibrated with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupCalibration {
    pub geometry: GeometryKey,
    pub scale: f64,
    pub offset: f64,
    /// Points in the group
    pub points: usize,
    /// Points of the group that fell inside the edge ranges
    pub calibration_points: usize,
    /// The regression was degenerate and fell back to unit scale
    pub degenerate: bool,
}

/// Output of either normalization strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub points: Vec<SpectrumPoint>,
    /// For bare-atom regression, the point-count-weighted mean of the group
    /// scales (informational; `groups` governs the transform)
    pub scale: f64,
    pub offset: f64,
    pub pre_range: EnergyRange,
    pub post_range: EnergyRange,
    /// Per-geometry coefficients; empty when one global transform was applied
    pub groups: Vec<GroupCalibration>,
}

/// Strategy selection for [`normalize`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum NormalizationMethod {
    BareAtom {
        reference: Vec<BareAtomPoint>,
        pre_edge_count: usize,
        post_edge_count: usize,
    },
    ZeroOne {
        pre_range: EnergyRange,
        post_range: EnergyRange,
    },
}

/// Run the selected strategy
pub fn normalize(points: &[SpectrumPoint], method: &NormalizationMethod) -> Result<NormalizationResult> {
    match method {
        NormalizationMethod::BareAtom {
            reference,
            pre_edge_count,
            post_edge_count,
        } => normalize_bare_atom(points, reference, *pre_edge_count, *post_edge_count),
        NormalizationMethod::ZeroOne {
            pre_range,
            post_range,
        } => normalize_zero_one(points, *pre_range, *post_range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dispatch_zero_one() {
        let points: Vec<SpectrumPoint> = (0..10)
            .map(|i| SpectrumPoint::new(280.0 + i as f64, if i < 5 { 2.0 } else { 6.0 }))
            .collect();
        let method = NormalizationMethod::ZeroOne {
            pre_range: EnergyRange::new(280.0, 282.0),
            post_range: EnergyRange::new(287.0, 289.0),
        };
        let result = normalize(&points, &method).unwrap();
        assert_relative_eq!(result.points[0].absorption, 0.0);
        assert_relative_eq!(result.points[9].absorption, 1.0);
    }

    #[test]
    fn test_method_deserializes_from_tagged_json() {
        let json = r#"{"method":"zero_one","pre_range":{"start":280.0,"end":283.0},"post_range":{"start":310.0,"end":320.0}}"#;
        let method: NormalizationMethod = serde_json::from_str(json).unwrap();
        assert_eq!(
            method,
            NormalizationMethod::ZeroOne {
                pre_range: EnergyRange::new(280.0, 283.0),
                post_range: EnergyRange::new(310.0, 320.0),
            }
        );
    }
}
