/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Thermal weighting of harmonic vibrations
//!
//! This module implements the quantum statistics of a single harmonic
//! oscillator in thermal equilibrium. The position distribution of a
//! harmonic oscillator at temperature T is a Gaussian whose variance is the
//! zero-point variance ħ/(2mω) broadened by the Bose occupation factor
//! coth(ħω / 2k_BT). Both displacement schemes draw their widths and their
//! weights from here.

use std::f64::consts::PI;

use super::constants::{BOLTZMANN_CONSTANT, HBAR};
use super::conversions::{amu_to_kg, m2_to_angstrom2, wavenumber_to_angular, wavenumber_to_joule};

/// Trait for thermal models describing the position distribution of a vibration
pub trait ThermalModel {
    /// Calculate the mean-square displacement (σ²) at a given temperature
    ///
    /// # Arguments
    ///
    /// * `temperature` - Temperature in Kelvin
    ///
    /// # Returns
    ///
    /// Mean-square displacement in Å²
    fn mean_square_displacement(&self, temperature: f64) -> f64;

    /// Probability density of finding the oscillator at displacement `x` (Å)
    fn density(&self, x: f64, temperature: f64) -> f64 {
        gaussian_density(x, self.mean_square_displacement(temperature))
    }

    /// Natural logarithm of [`ThermalModel::density`]
    fn log_density(&self, x: f64, temperature: f64) -> f64 {
        gaussian_log_density(x, self.mean_square_displacement(temperature))
    }
}

/// Quantum harmonic oscillator for a single vibrational mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicOscillator {
    /// Mode frequency in cm⁻¹
    frequency: f64,
    /// (Reduced) mass in atomic mass units
    mass: f64,
}

impl HarmonicOscillator {
    /// Create a new harmonic oscillator
    ///
    /// # Arguments
    ///
    /// * `frequency` - Mode frequency in cm⁻¹, must be positive
    /// * `mass` - Oscillating (reduced) mass in amu, must be positive
    pub fn new(frequency: f64, mass: f64) -> Self {
        Self { frequency, mass }
    }

    /// Mode frequency in cm⁻¹
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Oscillating mass in amu
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Ground state variance ħ/(2mω) in Å²
    pub fn zero_point_variance(&self) -> f64 {
        let omega = wavenumber_to_angular(self.frequency);
        m2_to_angstrom2(HBAR / (2.0 * amu_to_kg(self.mass) * omega))
    }

    /// Ground state standard deviation in Å
    pub fn zero_point_sigma(&self) -> f64 {
        self.zero_point_variance().sqrt()
    }

    /// Bose occupation factor coth(ħω / 2k_BT), equal to 2n + 1
    ///
    /// Returns exactly 1 at T = 0.
    pub fn occupation_factor(&self, temperature: f64) -> f64 {
        occupation_factor(self.frequency, temperature)
    }

    /// Thermal standard deviation in Å
    pub fn sigma(&self, temperature: f64) -> f64 {
        self.mean_square_displacement(temperature).sqrt()
    }
}

impl ThermalModel for HarmonicOscillator {
    fn mean_square_displacement(&self, temperature: f64) -> f64 {
        self.zero_point_variance() * self.occupation_factor(temperature)
    }
}

/// Bose occupation factor coth(ħω / 2k_BT) for a mode of the given wavenumber
///
/// The zero temperature limit is taken directly: for T ≤ 0 the factor is 1.
pub fn occupation_factor(frequency: f64, temperature: f64) -> f64 {
    if temperature <= 0.0 {
        return 1.0;
    }

    let x = wavenumber_to_joule(frequency) / (2.0 * BOLTZMANN_CONSTANT * temperature);
    1.0 / x.tanh()
}

/// Normal probability density with zero mean
pub fn gaussian_density(x: f64, variance: f64) -> f64 {
    (-x * x / (2.0 * variance)).exp() / (2.0 * PI * variance).sqrt()
}

/// Natural logarithm of the zero-mean normal probability density
pub fn gaussian_log_density(x: f64, variance: f64) -> f64 {
    -x * x / (2.0 * variance) - 0.5 * (2.0 * PI * variance).ln()
}
