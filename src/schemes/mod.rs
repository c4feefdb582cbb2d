/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Displacement schemes
//!
//! A displacement scheme turns the phonon modes of a structure into a set of
//! displaced configurations sampling the vibrational wavefunction, together
//! with the statistical weight of each configuration. Generating geometry and
//! computing weights are separate operations: displacements are generated
//! once, before the expensive property calculations, while weights can be
//! recomputed later at any temperature from the same geometry.

pub mod config;
pub mod errors;
pub mod independent;
pub mod montecarlo;

use std::fmt;

use ndarray::{Array1, Array2};

use crate::phonons::{AtomicMasses, PhononData, PhononError, PhononSpectrum};

pub use config::{ModeCombination, SchemeKind, SchemeOptions};
pub use errors::{Result, SchemeError};
pub use independent::IndependentModeScheme;
pub use montecarlo::MonteCarloScheme;

/// Common interface of the displacement schemes
pub trait DisplacementScheme {
    /// Which scheme this is
    fn kind(&self) -> SchemeKind;

    /// Phonon data the scheme samples
    fn phonons(&self) -> &PhononData;

    /// (Re)generate the displaced configurations and their weights
    ///
    /// # Arguments
    ///
    /// * `n` - Sample size: grid points per mode or number of configurations
    /// * `temperature` - Temperature of the sampled distribution in Kelvin
    fn generate_displacements(&mut self, n: usize, temperature: f64) -> Result<()>;

    /// Recompute the weights at `temperature` without touching the geometry
    fn recompute_weights(&mut self, temperature: f64) -> Result<()>;

    /// Cartesian displacements in Å, one (N, 3) array per configuration
    fn displacements(&self) -> &[Array2<f64>];

    /// Weight of each configuration, in the order of [`DisplacementScheme::displacements`]
    fn weights(&self) -> &Array1<f64>;

    /// Number of modes of the phonon data
    fn mode_count(&self) -> usize {
        self.phonons().mode_count()
    }

    /// Number of atoms of the phonon data
    fn atom_count(&self) -> usize {
        self.phonons().atom_count()
    }

    /// Number of generated configurations
    fn configuration_count(&self) -> usize {
        self.displacements().len()
    }
}

/// A displacement scheme of either kind
#[derive(Debug, Clone)]
pub enum Scheme {
    Independent(IndependentModeScheme),
    MonteCarlo(MonteCarloScheme),
}

impl Scheme {
    /// Build a scheme of the given kind
    pub fn new(kind: SchemeKind, phonons: PhononData, options: &SchemeOptions) -> Result<Self> {
        Ok(match kind {
            SchemeKind::Independent => Scheme::Independent(IndependentModeScheme::new(phonons, options)?),
            SchemeKind::MonteCarlo => Scheme::MonteCarlo(MonteCarloScheme::new(phonons, options)?),
        })
    }

    /// Build a scheme from the gamma point modes of a phonon spectrum
    pub fn from_spectrum(
        kind: SchemeKind,
        spectrum: &PhononSpectrum,
        masses: AtomicMasses,
        options: &SchemeOptions,
    ) -> Result<Self> {
        let phonons = PhononData::from_spectrum(spectrum, masses)?;
        Self::new(kind, phonons, options)
    }

    fn inner(&self) -> &dyn DisplacementScheme {
        match self {
            Scheme::Independent(scheme) => scheme,
            Scheme::MonteCarlo(scheme) => scheme,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn DisplacementScheme {
        match self {
            Scheme::Independent(scheme) => scheme,
            Scheme::MonteCarlo(scheme) => scheme,
        }
    }
}

impl DisplacementScheme for Scheme {
    fn kind(&self) -> SchemeKind {
        self.inner().kind()
    }

    fn phonons(&self) -> &PhononData {
        self.inner().phonons()
    }

    fn generate_displacements(&mut self, n: usize, temperature: f64) -> Result<()> {
        self.inner_mut().generate_displacements(n, temperature)
    }

    fn recompute_weights(&mut self, temperature: f64) -> Result<()> {
        self.inner_mut().recompute_weights(temperature)
    }

    fn displacements(&self) -> &[Array2<f64>] {
        self.inner().displacements()
    }

    fn weights(&self) -> &Array1<f64> {
        self.inner().weights()
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Independent(scheme) => fmt::Display::fmt(scheme, f),
            Scheme::MonteCarlo(scheme) => fmt::Display::fmt(scheme, f),
        }
    }
}

/// Reject negative and non-finite temperatures
pub(crate) fn check_temperature(temperature: f64) -> Result<()> {
    if temperature.is_finite() && temperature >= 0.0 {
        Ok(())
    } else {
        Err(SchemeError::InvalidTemperature(temperature))
    }
}

/// Indices of the modes that vibrate
///
/// Modes with |ν| below `min_frequency` are rigid-body motions and are
/// skipped. A frequency at or below `-min_frequency` is an unstable mode.
pub(crate) fn vibrational_modes(phonons: &PhononData, min_frequency: f64) -> Result<Vec<usize>> {
    if !min_frequency.is_finite() || min_frequency <= 0.0 {
        return Err(SchemeError::InvalidParameter(format!(
            "minimum frequency must be positive, got {}",
            min_frequency
        )));
    }

    let mut modes = Vec::new();
    for (index, &frequency) in phonons.frequencies().iter().enumerate() {
        if frequency >= min_frequency {
            modes.push(index);
        } else if frequency <= -min_frequency {
            return Err(PhononError::InvalidMode {
                index,
                frequency,
                reason: "imaginary mode, the structure is not at a minimum".to_string(),
            }
            .into());
        } else {
            log::debug!("Skipping rigid-body mode {} ({:.4} cm⁻¹)", index, frequency);
        }
    }
    Ok(modes)
}

/// Equal weights summing to one
pub(crate) fn uniform_weights(n: usize) -> Array1<f64> {
    Array1::from_elem(n, 1.0 / n as f64)
}

/// Write an optional temperature for scheme descriptions
pub(crate) fn format_temperature(temperature: Option<f64>) -> String {
    temperature.map_or_else(|| "not set".to_string(), |t| format!("{} K", t))
}
