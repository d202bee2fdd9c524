/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Bare-atom absorption module
//!
//! Theoretical (non-interacting atom) absorption of a molecule, used as the
//! physically grounded calibration target for measured NEXAFS spectra.

pub mod errors;
pub mod model;
pub mod provider;

pub use errors::{BareAtomError, ElementFailure, ProviderError, Result};
pub use model::{
    compute_bare_atom_curve, element_mass_absorption, mass_absorption, validate_samples,
    BareAtomCurve, BareAtomPoint, ElementOutcome, ElementReport,
};
pub use provider::{FormFactorProvider, FormFactorSample, TableProvider, TimeoutProvider};
