/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Chemistry module
//!
//! Static atomic-weight table and the chemical formula parser used to build
//! molecular bare-atom reference curves.

pub mod database;
pub mod errors;
pub mod formula;

pub use database::{atomic_number, atomic_weight, element_symbol, is_element};
pub use errors::{FormulaError, Result};
pub use formula::{compute_molecular_weight, parse_formula, ElementCountMap};
