/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Phonon modes as delivered by a lattice-dynamics code
//!
//! A lattice-dynamics calculation usually reports modes on a list of
//! wavevectors. Only the gamma point is meaningful for displacing a single
//! periodic cell, so [`PhononSpectrum::gamma`] picks it out.

use ndarray::{Array1, Array3};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::errors::{PhononError, Result};

/// Absolute tolerance on each component when testing for the zero wavevector
pub const GAMMA_TOLERANCE: f64 = 1e-8;

/// Eigenfrequencies and eigenvectors at a single wavevector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QPointModes {
    /// Wavevector in fractional reciprocal coordinates
    pub qpoint: [f64; 3],
    /// Mode frequencies in cm⁻¹
    pub frequencies: Array1<f64>,
    /// Eigenvectors, shape (modes, atoms, 3)
    pub eigenvectors: Array3<Complex64>,
}

impl QPointModes {
    /// Create the modes of a single wavevector
    pub fn new(qpoint: [f64; 3], frequencies: Array1<f64>, eigenvectors: Array3<Complex64>) -> Self {
        Self {
            qpoint,
            frequencies,
            eigenvectors,
        }
    }

    /// Whether this entry sits at the zero wavevector
    pub fn is_gamma(&self) -> bool {
        self.qpoint.iter().all(|q| q.abs() <= GAMMA_TOLERANCE)
    }
}

/// Phonon modes over a list of wavevectors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhononSpectrum {
    pub qpoints: Vec<QPointModes>,
}

impl PhononSpectrum {
    /// Create a spectrum from its wavevector entries
    pub fn new(qpoints: Vec<QPointModes>) -> Self {
        Self { qpoints }
    }

    /// Create a spectrum holding only gamma point modes
    pub fn gamma_only(frequencies: Array1<f64>, eigenvectors: Array3<Complex64>) -> Self {
        Self::new(vec![QPointModes::new([0.0; 3], frequencies, eigenvectors)])
    }

    /// The first entry at the zero wavevector
    pub fn gamma(&self) -> Result<&QPointModes> {
        self.qpoints
            .iter()
            .find(|modes| modes.is_gamma())
            .ok_or(PhononError::MissingGammaPoint(self.qpoints.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modes_at(qpoint: [f64; 3]) -> QPointModes {
        QPointModes::new(qpoint, Array1::zeros(3), Array3::zeros((3, 1, 3)))
    }

    #[test]
    fn test_gamma_lookup() {
        let spectrum = PhononSpectrum::new(vec![
            modes_at([0.5, 0.0, 0.0]),
            modes_at([0.0, 1e-10, 0.0]),
            modes_at([0.0, 0.0, 0.0]),
        ]);
        let gamma = spectrum.gamma().unwrap();
        assert_eq!(gamma.qpoint, [0.0, 1e-10, 0.0]);
    }

    #[test]
    fn test_missing_gamma() {
        let spectrum = PhononSpectrum::new(vec![modes_at([0.5, 0.5, 0.0]), modes_at([0.0, 0.0, 0.25])]);
        assert_eq!(spectrum.gamma(), Err(PhononError::MissingGammaPoint(2)));
        assert_eq!(
            PhononSpectrum::default().gamma(),
            Err(PhononError::MissingGammaPoint(0))
        );
    }
}
