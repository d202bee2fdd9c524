/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the normalization module
//!
//! Every variant is an expected "insufficient data" outcome; callers decide
//! whether to fall back to another strategy or to the raw spectrum.

use super::range::EnergyRange;
use crate::spectrum::GeometryKey;
use crate::utils::UtilsError;
use thiserror::Error;

/// Reasons a normalization strategy could not produce a result
#[derive(Error, Debug)]
pub enum NormalizationError {
    #[error("Normalization unavailable: no spectrum points")]
    EmptyInput,

    #[error("Normalization unavailable: {0}-edge range is empty")]
    EmptyEdgeRange(&'static str),

    #[error("Normalization unavailable: bare-atom reference curve is empty")]
    EmptyReference,

    #[error(
        "Normalization unavailable: geometry group ({group}) has {found} calibration points, at least 2 are needed"
    )]
    InsufficientCalibrationPoints { group: GeometryKey, found: usize },

    #[error("Normalization unavailable: no points inside the {edge}-edge range {range}")]
    EmptyEdgeSelection {
        edge: &'static str,
        range: EnergyRange,
    },

    #[error(
        "Normalization unavailable: edge step between pre-edge average {pre_average} and post-edge average {post_average} is too small"
    )]
    DegenerateEdgeStep { pre_average: f64, post_average: f64 },

    #[error("Normalization unavailable: {0}")]
    Numerical(#[from] UtilsError),
}

/// Result type for normalization operations
pub type Result<T> = std::result::Result<T, NormalizationError>;
