/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Utility functions shared across the crate
//!
//! Physical constants, unit conversions and the small numerical kernels
//! (interpolation, straight-line fitting) the spectral algorithms rely on.

pub mod constants;
pub mod conversions;
pub mod errors;
pub mod math;

pub use conversions::{angstrom_to_cm, energy_to_wavelength, wavelength_to_energy};
pub use errors::{Result, UtilsError};
pub use math::{interpolate_onto, interpolate_table, linear_fit, linear_interpolate, mean, LinearFit};
