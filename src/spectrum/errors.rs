/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Error types for the spectrum module

use thiserror::Error;

/// Errors that can occur while ingesting spectral rows
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    #[error("Ingestion produced no valid spectrum points ({dropped} rows dropped)")]
    EmptySpectrum { dropped: usize },

    #[error("No column mapped for required role '{0}'")]
    UnmappedColumn(&'static str),
}

/// Result type for spectrum operations
pub type Result<T> = std::result::Result<T, SpectrumError>;
