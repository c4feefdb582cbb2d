/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Gamma point phonon data of a structure with an implanted particle

use ndarray::{Array1, Array2, Array3, ArrayView2, Axis};
use num_complex::Complex64;

use super::errors::{PhononError, Result};
use super::masses::AtomicMasses;
use super::spectrum::{PhononSpectrum, QPointModes};
use crate::utils::thermal::HarmonicOscillator;

/// Eigenfrequencies, eigenvectors and masses of a single structure
///
/// Mode `m` has frequency `frequencies[m]` (cm⁻¹) and per-atom eigenvector
/// `eigenvectors[[m, a, ..]]`. Atom indices follow the ordering of the
/// structure the displacements are applied to.
///
/// Gamma point eigenvectors are only defined up to a global phase e^{iφ}.
/// Each mode is rotated on construction so that its largest component is
/// real and positive, which makes the real parts used for displacements
/// independent of the phase convention of the phonon code.
#[derive(Debug, Clone)]
pub struct PhononData {
    frequencies: Array1<f64>,
    eigenvectors: Array3<Complex64>,
    masses: AtomicMasses,
}

impl PhononData {
    /// Create phonon data, checking that all arrays describe the same system
    ///
    /// # Arguments
    ///
    /// * `frequencies` - Mode frequencies in cm⁻¹, one per mode (3N in total)
    /// * `eigenvectors` - Eigenvectors with shape (3N, N, 3)
    /// * `masses` - Masses with the implant already substituted
    pub fn new(
        frequencies: Array1<f64>,
        mut eigenvectors: Array3<Complex64>,
        masses: AtomicMasses,
    ) -> Result<Self> {
        let atoms = masses.len();
        let modes = frequencies.len();

        if modes != 3 * atoms {
            return Err(PhononError::Shape(format!(
                "{} frequencies given for {} atoms, expected {}",
                modes,
                atoms,
                3 * atoms
            )));
        }
        if eigenvectors.dim() != (modes, atoms, 3) {
            return Err(PhononError::Shape(format!(
                "eigenvectors have shape {:?}, expected {:?}",
                eigenvectors.dim(),
                (modes, atoms, 3)
            )));
        }
        if let Some((index, &frequency)) = frequencies.iter().enumerate().find(|(_, f)| !f.is_finite()) {
            return Err(PhononError::InvalidMode {
                index,
                frequency,
                reason: "frequency is not finite".to_string(),
            });
        }

        for mut mode in eigenvectors.outer_iter_mut() {
            if let Some(phase) = global_phase(mode.iter()) {
                mode.mapv_inplace(|c| c * phase.conj());
            }
        }

        Ok(Self {
            frequencies,
            eigenvectors,
            masses,
        })
    }

    /// Create phonon data from the modes of a single wavevector
    pub fn from_modes(modes: &QPointModes, masses: AtomicMasses) -> Result<Self> {
        Self::new(modes.frequencies.clone(), modes.eigenvectors.clone(), masses)
    }

    /// Create phonon data from the gamma point of a spectrum
    pub fn from_spectrum(spectrum: &PhononSpectrum, masses: AtomicMasses) -> Result<Self> {
        Self::from_modes(spectrum.gamma()?, masses)
    }

    /// Number of modes
    pub fn mode_count(&self) -> usize {
        self.frequencies.len()
    }

    /// Number of atoms
    pub fn atom_count(&self) -> usize {
        self.masses.len()
    }

    /// All mode frequencies in cm⁻¹
    pub fn frequencies(&self) -> &Array1<f64> {
        &self.frequencies
    }

    /// Frequency of mode `m` in cm⁻¹
    pub fn frequency(&self, m: usize) -> f64 {
        self.frequencies[m]
    }

    /// Masses with the implant substituted
    pub fn masses(&self) -> &AtomicMasses {
        &self.masses
    }

    /// Index of the implanted atom
    pub fn target(&self) -> usize {
        self.masses.target()
    }

    /// Phase-fixed eigenvector of mode `m`, shape (N, 3)
    pub fn eigenvector(&self, m: usize) -> ArrayView2<'_, Complex64> {
        self.eigenvectors.index_axis(Axis(0), m)
    }

    /// Real part of the phase-fixed eigenvector of mode `m` at the target atom
    pub fn target_component(&self, m: usize) -> [f64; 3] {
        let target = self.target();
        [
            self.eigenvectors[[m, target, 0]].re,
            self.eigenvectors[[m, target, 1]].re,
            self.eigenvectors[[m, target, 2]].re,
        ]
    }

    /// Cartesian displacement pattern of mode `m` per unit zero-point amplitude
    ///
    /// Atom `a` moves by Re(e_ma)·√(ħ / 2 m_a ω_m) Å, the mass-weighted
    /// normal-mode-to-Cartesian conversion. Non-positive frequencies carry no
    /// vibration and return zeros.
    pub fn mode_displacement(&self, m: usize) -> Array2<f64> {
        let atoms = self.atom_count();
        let frequency = self.frequency(m);
        let mut displacement = Array2::zeros((atoms, 3));
        if frequency <= 0.0 {
            return displacement;
        }

        for (a, &mass) in self.masses.masses().iter().enumerate() {
            let scale = HarmonicOscillator::new(frequency, mass).zero_point_sigma();
            for k in 0..3 {
                displacement[[a, k]] = self.eigenvectors[[m, a, k]].re * scale;
            }
        }
        displacement
    }
}

/// Unit phase of the largest component, or `None` for a null vector
fn global_phase<'a>(components: impl Iterator<Item = &'a Complex64>) -> Option<Complex64> {
    let largest = components.fold(Complex64::new(0.0, 0.0), |best, &c| {
        if c.norm_sqr() > best.norm_sqr() {
            c
        } else {
            best
        }
    });
    let norm = largest.norm();
    (norm > 0.0).then(|| largest / norm)
}
