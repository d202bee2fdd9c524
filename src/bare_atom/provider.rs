/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Form-factor providers
//!
//! The bare-atom model asks a [`FormFactorProvider`] for the tabulated
//! `(energy, f1, f2)` samples of each element. Where the data comes from
//! (a network service, files, an embedded table) is up to the implementor;
//! retries belong there too.

use super::errors::ProviderError;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// One tabulated atomic scattering factor sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormFactorSample {
    /// Photon energy in eV
    pub energy: f64,
    pub f1: f64,
    pub f2: f64,
}

impl FormFactorSample {
    pub fn new(energy: f64, f1: f64, f2: f64) -> Self {
        Self { energy, f1, f2 }
    }

    /// Finite values, positive energy and non-negative `f2`
    pub fn is_valid(&self) -> bool {
        self.energy.is_finite()
            && self.energy > 0.0
            && self.f1.is_finite()
            && self.f2.is_finite()
            && self.f2 >= 0.0
    }

    /// Complex atomic scattering factor `f1 + i·f2`
    pub fn scattering_factor(&self) -> Complex64 {
        Complex64::new(self.f1, self.f2)
    }
}

/// Source of tabulated form factors, queried once per element
///
/// Implementations must be `Sync`: elements are fetched concurrently.
pub trait FormFactorProvider: Sync {
    /// Samples for `symbol`, in any order
    fn form_factors(&self, symbol: &str) -> Result<Vec<FormFactorSample>, ProviderError>;
}

impl<F> FormFactorProvider for F
where
    F: Fn(&str) -> Result<Vec<FormFactorSample>, ProviderError> + Sync,
{
    fn form_factors(&self, symbol: &str) -> Result<Vec<FormFactorSample>, ProviderError> {
        self(symbol)
    }
}

/// In-memory provider backed by a symbol → samples table
#[derive(Debug, Clone, Default)]
pub struct TableProvider {
    tables: HashMap<String, Vec<FormFactorSample>>,
}

impl TableProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`TableProvider::insert`]
    pub fn with_element(mut self, symbol: &str, samples: Vec<FormFactorSample>) -> Self {
        self.insert(symbol, samples);
        self
    }

    /// Register (or replace) the table for an element
    pub fn insert(&mut self, symbol: &str, samples: Vec<FormFactorSample>) {
        self.tables.insert(symbol.to_string(), samples);
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.tables.contains_key(symbol)
    }
}

impl FormFactorProvider for TableProvider {
    fn form_factors(&self, symbol: &str) -> Result<Vec<FormFactorSample>, ProviderError> {
        self.tables
            .get(symbol)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(symbol.to_string()))
    }
}

/// Wraps a provider so that every fetch gives up after `timeout`
///
/// Each fetch runs on its own thread. A fetch that misses the deadline is
/// reported as [`ProviderError::Timeout`]; its thread is left to finish in the
/// background and its result is discarded.
#[derive(Debug)]
pub struct TimeoutProvider<P> {
    inner: Arc<P>,
    timeout: Duration,
}

impl<P> TimeoutProvider<P>
where
    P: FormFactorProvider + Send + 'static,
{
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self::from_arc(Arc::new(inner), timeout)
    }

    pub fn from_arc(inner: Arc<P>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<P> FormFactorProvider for TimeoutProvider<P>
where
    P: FormFactorProvider + Send + 'static,
{
    fn form_factors(&self, symbol: &str) -> Result<Vec<FormFactorSample>, ProviderError> {
        let (sender, receiver) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let owned_symbol = symbol.to_string();

        thread::Builder::new()
            .name(format!("form-factors-{symbol}"))
            .spawn(move || {
                // The receiver is gone once the deadline passed
                let _ = sender.send(inner.form_factors(&owned_symbol));
            })
            .map_err(|err| ProviderError::Unavailable {
                symbol: symbol.to_string(),
                reason: err.to_string(),
            })?;

        match receiver.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(ProviderError::Timeout {
                symbol: symbol.to_string(),
                timeout: self.timeout,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(ProviderError::Unavailable {
                symbol: symbol.to_string(),
                reason: "fetch thread terminated without a result".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_validation() {
        assert!(FormFactorSample::new(280.0, 1.0, 0.5).is_valid());
        assert!(FormFactorSample::new(280.0, -3.0, 0.0).is_valid());
        assert!(!FormFactorSample::new(0.0, 1.0, 0.5).is_valid());
        assert!(!FormFactorSample::new(280.0, 1.0, -0.1).is_valid());
        assert!(!FormFactorSample::new(280.0, f64::NAN, 0.5).is_valid());
        assert!(!FormFactorSample::new(f64::INFINITY, 1.0, 0.5).is_valid());
    }

    #[test]
    fn test_scattering_factor() {
        let factor = FormFactorSample::new(300.0, 2.0, 0.25).scattering_factor();
        assert_eq!(factor.re, 2.0);
        assert_eq!(factor.im, 0.25);
    }

    #[test]
    fn test_table_provider() {
        let provider =
            TableProvider::new().with_element("C", vec![FormFactorSample::new(280.0, 1.0, 0.5)]);
        assert!(provider.contains("C"));
        assert_eq!(provider.form_factors("C").unwrap().len(), 1);
        assert_eq!(
            provider.form_factors("N"),
            Err(ProviderError::NotFound("N".to_string()))
        );
    }

    #[test]
    fn test_closure_provider() {
        let provider = |symbol: &str| -> Result<Vec<FormFactorSample>, ProviderError> {
            match symbol {
                "O" => Ok(vec![FormFactorSample::new(530.0, 4.0, 1.0)]),
                other => Err(ProviderError::NotFound(other.to_string())),
            }
        };
        assert!(provider.form_factors("O").is_ok());
        assert!(provider.form_factors("H").is_err());
    }

    #[test]
    fn test_timeout_provider() {
        let slow = |symbol: &str| -> Result<Vec<FormFactorSample>, ProviderError> {
            if symbol == "Fe" {
                thread::sleep(Duration::from_millis(1000));
            }
            Ok(vec![FormFactorSample::new(700.0, 10.0, 2.0)])
        };
        let provider = TimeoutProvider::new(slow, Duration::from_millis(200));

        assert!(provider.form_factors("C").is_ok());
        assert!(matches!(
            provider.form_factors("Fe"),
            Err(ProviderError::Timeout { .. })
        ));
    }
}
