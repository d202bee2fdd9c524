/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Spectrum module
//!
//! Canonical spectrum points, row ingestion and partitioning by measurement
//! geometry.

pub mod errors;
pub mod geometry;
pub mod ingest;
pub mod point;

pub use errors::{Result, SpectrumError};
pub use geometry::{group_by_geometry, GeometryGroups, GeometryKey};
pub use ingest::{coerce_number, ingest, ColumnMapping, Ingested, Row};
pub use point::{sort_by_energy, SpectrumPoint};
