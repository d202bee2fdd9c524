/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the bare-atom module

use crate::chemistry::FormulaError;
use crate::utils::UtilsError;
use std::time::Duration;
use thiserror::Error;

/// Failure reported by a form-factor provider for one element
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("No form-factor table for element '{0}'")]
    NotFound(String),

    #[error("Form-factor fetch for '{symbol}' timed out after {timeout:?}")]
    Timeout { symbol: String, timeout: Duration },

    #[error("Form-factor provider unavailable for '{symbol}': {reason}")]
    Unavailable { symbol: String, reason: String },
}

/// Why a single element did not contribute to a bare-atom curve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementFailure {
    #[error("fetch failed: {0}")]
    Fetch(#[from] ProviderError),

    #[error("no valid form-factor samples ({discarded} discarded)")]
    NoValidSamples { discarded: usize },
}

/// Errors that abort a bare-atom curve computation
#[derive(Error, Debug)]
pub enum BareAtomError {
    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),

    #[error("All {} elements failed to provide form factors", .failures.len())]
    AllElementsFailed {
        failures: Vec<(String, ElementFailure)>,
    },

    #[error("Target energy #{index} is not finite: {energy}")]
    NonFiniteEnergy { index: usize, energy: f64 },

    #[error("Interpolation error: {0}")]
    Interpolation(#[from] UtilsError),

    #[error("Failed to start form-factor workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for bare-atom operations
pub type Result<T> = std::result::Result<T, BareAtomError>;
