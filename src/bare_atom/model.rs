/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Bare-atom absorption model
//!
//! The theoretical mass-absorption coefficient of a molecule, built from the
//! tabulated `f2` of each constituent element:
//!
//! ```text
//! μ/ρ (E) = 2 · r_e · λ(E) · N_A · f2(E) / A        λ = hc / E
//! ```
//!
//! Each element curve is interpolated onto the requested energy grid
//! (clamped at the tabulated boundaries) and the molecular curve is the
//! weight-fraction mix `Σ (count·A / MW) · μ_element`.

use super::errors::{BareAtomError, ElementFailure, Result};
use super::provider::{FormFactorProvider, FormFactorSample};
use crate::chemistry::{atomic_weight, compute_molecular_weight, parse_formula, FormulaError};
use crate::utils::constants::{AVOGADRO, CLASSICAL_ELECTRON_RADIUS_CM};
use crate::utils::{angstrom_to_cm, energy_to_wavelength, interpolate_onto};
use log::{debug, warn};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};

/// Theoretical molecular mass-absorption coefficient (cm²/g) at one energy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BareAtomPoint {
    pub energy: f64,
    pub absorption: f64,
}

/// Whether an element made it into the combined curve
#[derive(Debug, Clone, PartialEq)]
pub enum ElementOutcome {
    Used,
    Failed(ElementFailure),
}

/// Per-element diagnostics of a bare-atom computation
#[derive(Debug, Clone, PartialEq)]
pub struct ElementReport {
    pub symbol: String,
    pub count: u32,
    /// g/mol
    pub atomic_weight: f64,
    /// `count · atomic_weight / molecular_weight`
    pub weight_fraction: f64,
    pub valid_samples: usize,
    pub discarded_samples: usize,
    pub outcome: ElementOutcome,
}

impl ElementReport {
    pub fn is_used(&self) -> bool {
        self.outcome == ElementOutcome::Used
    }
}

/// Molecular bare-atom curve together with how each element fared
#[derive(Debug, Clone, PartialEq)]
pub struct BareAtomCurve {
    pub points: Vec<BareAtomPoint>,
    /// g/mol
    pub molecular_weight: f64,
    pub elements: Vec<ElementReport>,
}

impl BareAtomCurve {
    pub fn energies(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.energy).collect()
    }

    pub fn absorptions(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.absorption).collect()
    }

    /// Elements that were skipped
    pub fn failed_elements(&self) -> Vec<&ElementReport> {
        self.elements.iter().filter(|e| !e.is_used()).collect()
    }

    /// True when every element contributed
    pub fn is_complete(&self) -> bool {
        self.elements.iter().all(ElementReport::is_used)
    }
}

/// Mass-absorption coefficient in cm²/g from `f2` at `energy` (eV) for an
/// element of atomic weight `atomic_weight` (g/mol)
pub fn mass_absorption(f2: f64, energy: f64, atomic_weight: f64) -> f64 {
    let wavelength_cm = angstrom_to_cm(energy_to_wavelength(energy));
    2.0 * CLASSICAL_ELECTRON_RADIUS_CM * wavelength_cm * AVOGADRO * f2 / atomic_weight
}

/// Drop invalid samples and order the rest by energy
///
/// Returns the kept samples and how many were discarded.
pub fn validate_samples(samples: Vec<FormFactorSample>) -> (Vec<FormFactorSample>, usize) {
    let total = samples.len();
    let mut valid: Vec<FormFactorSample> =
        samples.into_iter().filter(FormFactorSample::is_valid).collect();
    valid.sort_by(|a, b| a.energy.total_cmp(&b.energy));
    let discarded = total - valid.len();
    (valid, discarded)
}

/// Mass-absorption curve of a single element at its tabulated energies
pub fn element_mass_absorption(
    samples: &[FormFactorSample],
    atomic_weight: f64,
) -> Vec<BareAtomPoint> {
    samples
        .iter()
        .map(|s| BareAtomPoint {
            energy: s.energy,
            absorption: mass_absorption(s.f2, s.energy, atomic_weight),
        })
        .collect()
}

struct Contribution {
    report: ElementReport,
    values: Option<Vec<f64>>,
}

fn element_contribution<P: FormFactorProvider + ?Sized>(
    provider: &P,
    symbol: &str,
    count: u32,
    molecular_weight: f64,
    target_energies: &[f64],
) -> Result<Contribution> {
    let weight = atomic_weight(symbol)
        .ok_or_else(|| FormulaError::MissingWeight(symbol.to_string()))?;
    let mut report = ElementReport {
        symbol: symbol.to_string(),
        count,
        atomic_weight: weight,
        weight_fraction: count as f64 * weight / molecular_weight,
        valid_samples: 0,
        discarded_samples: 0,
        outcome: ElementOutcome::Used,
    };

    let samples = match provider.form_factors(symbol) {
        Ok(samples) => samples,
        Err(err) => {
            warn!("Skipping {} in bare-atom curve: {}", symbol, err);
            report.outcome = ElementOutcome::Failed(err.into());
            return Ok(Contribution {
                report,
                values: None,
            });
        }
    };

    let (valid, discarded) = validate_samples(samples);
    report.valid_samples = valid.len();
    report.discarded_samples = discarded;

    if valid.is_empty() {
        warn!(
            "Skipping {} in bare-atom curve: all {} samples invalid",
            symbol, discarded
        );
        report.outcome = ElementOutcome::Failed(ElementFailure::NoValidSamples { discarded });
        return Ok(Contribution {
            report,
            values: None,
        });
    }

    let curve = element_mass_absorption(&valid, weight);
    let energies: Vec<f64> = curve.iter().map(|p| p.energy).collect();
    let absorptions: Vec<f64> = curve.iter().map(|p| p.absorption).collect();
    let values = interpolate_onto(target_energies, &energies, &absorptions)?;

    debug!(
        "{}: {} samples ({} discarded), weight fraction {:.4}",
        symbol, report.valid_samples, discarded, report.weight_fraction
    );

    Ok(Contribution {
        report,
        values: Some(values),
    })
}

/// Compute the molecular bare-atom curve for `formula` on `target_energies`
///
/// Form factors for distinct elements are fetched concurrently, one worker
/// per element, so slow fetches overlap instead of queueing; the combination
/// waits for every fetch to settle. Elements whose fetch fails, or whose
/// samples are all invalid, are skipped and reported in
/// [`BareAtomCurve::elements`].
///
/// # Errors
///
/// * [`BareAtomError::Formula`] if the formula does not parse or weigh
/// * [`BareAtomError::NonFiniteEnergy`] if a target energy is NaN or infinite
/// * [`BareAtomError::AllElementsFailed`] if no element contributed
/// * [`BareAtomError::WorkerPool`] if the fetch workers cannot be started
pub fn compute_bare_atom_curve<P: FormFactorProvider + ?Sized>(
    formula: &str,
    target_energies: &[f64],
    provider: &P,
) -> Result<BareAtomCurve> {
    let counts = parse_formula(formula)?;
    let molecular_weight = compute_molecular_weight(&counts)?;

    if let Some((index, &energy)) = target_energies
        .iter()
        .enumerate()
        .find(|(_, e)| !e.is_finite())
    {
        return Err(BareAtomError::NonFiniteEnergy { index, energy });
    }

    let elements: Vec<(&String, u32)> = counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(symbol, &count)| (symbol, count))
        .collect();

    // One worker per distinct element
    let pool = ThreadPoolBuilder::new()
        .num_threads(elements.len().max(1))
        .thread_name(|i| format!("bare-atom-fetch-{i}"))
        .build()?;

    let contributions: Vec<Contribution> = pool.install(|| {
        elements
            .into_par_iter()
            .with_max_len(1)
            .map(|(symbol, count)| {
                element_contribution(provider, symbol, count, molecular_weight, target_energies)
            })
            .collect::<Result<Vec<_>>>()
    })?;

    if contributions.iter().all(|c| c.values.is_none()) {
        let failures = contributions
            .into_iter()
            .filter_map(|c| match c.report.outcome {
                ElementOutcome::Failed(failure) => Some((c.report.symbol, failure)),
                ElementOutcome::Used => None,
            })
            .collect();
        return Err(BareAtomError::AllElementsFailed { failures });
    }

    let mut total = vec![0.0; target_energies.len()];
    for contribution in &contributions {
        if let Some(values) = &contribution.values {
            let fraction = contribution.report.weight_fraction;
            for (acc, value) in total.iter_mut().zip(values) {
                *acc += fraction * value;
            }
        }
    }

    let points = target_energies
        .iter()
        .zip(total)
        .map(|(&energy, absorption)| BareAtomPoint { energy, absorption })
        .collect();

    Ok(BareAtomCurve {
        points,
        molecular_weight,
        elements: contributions.into_iter().map(|c| c.report).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bare_atom::errors::ProviderError;
    use crate::bare_atom::provider::TableProvider;
    use approx::assert_relative_eq;

    #[test]
    fn test_mass_absorption_scales_with_f2_and_energy() {
        let base = mass_absorption(1.0, 300.0, 12.011);
        assert!(base > 0.0);
        assert_relative_eq!(mass_absorption(2.0, 300.0, 12.011), 2.0 * base, max_relative = 1e-12);
        assert_relative_eq!(mass_absorption(1.0, 600.0, 12.011), 0.5 * base, max_relative = 1e-12);
        assert_relative_eq!(mass_absorption(1.0, 300.0, 24.022), 0.5 * base, max_relative = 1e-12);
    }

    #[test]
    fn test_mass_absorption_magnitude() {
        // 2·r_e·N_A·hc = 2 · 2.818e-13 cm · 6.022e23 /mol · 1.2398e-4 eV·cm
        let expected = 2.0 * 2.817_940_326_2e-13 * 6.022_140_76e23 * 12_398.419_843_320_026e-8
            / 1000.0
            / 12.011;
        assert_relative_eq!(mass_absorption(1.0, 1000.0, 12.011), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_validate_samples() {
        let samples = vec![
            FormFactorSample::new(300.0, 1.0, 2.0),
            FormFactorSample::new(-1.0, 1.0, 2.0),
            FormFactorSample::new(290.0, 1.0, 1.0),
            FormFactorSample::new(295.0, 1.0, -1.0),
        ];
        let (valid, discarded) = validate_samples(samples);
        assert_eq!(discarded, 2);
        assert_eq!(valid[0].energy, 290.0);
        assert_eq!(valid[1].energy, 300.0);
    }

    #[test]
    fn test_partial_failure_is_reported() {
        let provider = TableProvider::new()
            .with_element("C", vec![FormFactorSample::new(280.0, 1.0, 1.0)])
            .with_element("O", vec![FormFactorSample::new(f64::NAN, 1.0, 1.0)]);

        let curve = compute_bare_atom_curve("CO2H", &[280.0, 290.0], &provider).unwrap();
        assert_eq!(curve.points.len(), 2);
        assert!(!curve.is_complete());

        let failed: Vec<&str> = curve
            .failed_elements()
            .iter()
            .map(|e| e.symbol.as_str())
            .collect();
        assert_eq!(failed, vec!["H", "O"]);

        let oxygen = curve.elements.iter().find(|e| e.symbol == "O").unwrap();
        assert_eq!(
            oxygen.outcome,
            ElementOutcome::Failed(ElementFailure::NoValidSamples { discarded: 1 })
        );
        let hydrogen = curve.elements.iter().find(|e| e.symbol == "H").unwrap();
        assert_eq!(
            hydrogen.outcome,
            ElementOutcome::Failed(ElementFailure::Fetch(ProviderError::NotFound(
                "H".to_string()
            )))
        );
    }

    #[test]
    fn test_all_elements_failed() {
        let provider = TableProvider::new();
        match compute_bare_atom_curve("H2O", &[500.0], &provider) {
            Err(BareAtomError::AllElementsFailed { failures }) => assert_eq!(failures.len(), 2),
            other => panic!("expected AllElementsFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_target_energy_is_rejected() {
        let provider =
            TableProvider::new().with_element("C", vec![FormFactorSample::new(280.0, 1.0, 1.0)]);
        match compute_bare_atom_curve("C", &[280.0, f64::NAN, 290.0], &provider) {
            Err(BareAtomError::NonFiniteEnergy { index, energy }) => {
                assert_eq!(index, 1);
                assert!(energy.is_nan());
            }
            other => panic!("expected NonFiniteEnergy, got {:?}", other),
        }
        assert!(matches!(
            compute_bare_atom_curve("C", &[f64::INFINITY], &provider),
            Err(BareAtomError::NonFiniteEnergy { index: 0, .. })
        ));
    }

    #[test]
    fn test_formula_error_propagates() {
        let provider = TableProvider::new();
        assert!(matches!(
            compute_bare_atom_curve("Qq", &[500.0], &provider),
            Err(BareAtomError::Formula(_))
        ));
    }
}
