/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! # nexafs-rs
//!
//! Spectral processing core for Near-Edge X-ray Absorption Fine Structure
//! (NEXAFS) data.
//!
//! The crate turns already-parsed tabular rows into calibrated,
//! geometry-aware spectra, detects absorption peaks, and computes theoretical
//! bare-atom reference absorption from a chemical formula:
//!
//! ```text
//! rows ──ingest──▶ points ──group_by_geometry──▶ groups
//!                    │                              │
//!                    │          compute_bare_atom_curve(formula)
//!                    │                              ▼
//!                    ├──────────▶ normalize_bare_atom / normalize_zero_one
//!                    └──────────▶ detect_peaks
//! ```
//!
//! All computations are pure functions over immutable inputs. The only
//! external collaborator is a [`bare_atom::FormFactorProvider`], queried
//! concurrently for each element of a formula.

pub mod bare_atom;
pub mod chemistry;
pub mod normalization;
pub mod peaks;
pub mod spectrum;
pub mod utils;

pub use bare_atom::{compute_bare_atom_curve, BareAtomCurve, BareAtomPoint, FormFactorProvider};
pub use chemistry::{compute_molecular_weight, parse_formula, ElementCountMap};
pub use normalization::{
    normalize, normalize_bare_atom, normalize_zero_one, EnergyRange, NormalizationMethod,
    NormalizationResult,
};
pub use peaks::{detect_peaks, DetectedPeak, PeakOptions};
pub use spectrum::{group_by_geometry, ingest, ColumnMapping, GeometryKey, SpectrumPoint};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
