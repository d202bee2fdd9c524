/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Physical constants used in bare-atom absorption calculations
//!
//! Values are CODATA 2018.

/// Classical electron radius in cm
pub const CLASSICAL_ELECTRON_RADIUS_CM: f64 = 2.817_940_326_2e-13;

/// Avogadro constant in 1/mol
pub const AVOGADRO: f64 = 6.022_140_76e23;

/// Planck constant times speed of light in eV·Å
pub const PLANCK_HC: f64 = 12_398.419_843_320_026;

/// Angstroms per centimetre
pub const ANGSTROM_PER_CM: f64 = 1.0e8;
