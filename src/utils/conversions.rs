/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/

//! Unit conversion utilities

use super::constants;

/// Convert photon energy in eV to wavelength in Angstroms
pub fn energy_to_wavelength(energy: f64) -> f64 {
    constants::PLANCK_HC / energy
}

/// Convert photon wavelength in Angstroms to energy in eV
pub fn wavelength_to_energy(wavelength: f64) -> f64 {
    constants::PLANCK_HC / wavelength
}

/// Convert from Angstroms to centimetres
pub fn angstrom_to_cm(angstrom: f64) -> f64 {
    angstrom / constants::ANGSTROM_PER_CM
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_conversions() {
        let energy = 285.0;
        let wavelength = energy_to_wavelength(energy);
        assert_relative_eq!(wavelength_to_energy(wavelength), energy, epsilon = 1e-10);

        // 1 keV photons sit close to 12.4 Å
        assert_relative_eq!(energy_to_wavelength(1000.0), 12.398, epsilon = 1e-3);
        assert_relative_eq!(angstrom_to_cm(1.0e8), 1.0, epsilon = 1e-12);
    }
}
