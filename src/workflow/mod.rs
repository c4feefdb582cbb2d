/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Vibrational averaging workflow
//!
//! A vibrational average runs in two stages with an external calculation in
//! between. The write stage substitutes the muon mass, builds the displacement
//! scheme from the gamma point phonons and produces the displaced
//! configurations. The external property calculator then evaluates each of
//! them. The read stage collects those values by configuration index,
//! recomputes the weights at the averaging temperature and reduces them.

pub mod config;
pub mod errors;

use ndarray::Array2;

use crate::average::{AverageError, AverageReducer, AverageReport, ConfigurationResults};
use crate::phonons::{AtomicMasses, PhononData, PhononSpectrum};
use crate::schemes::{DisplacementScheme, Scheme};

pub use config::AverageParameters;
pub use errors::{Result, WorkflowError};

/// A vibrational average of a property on the muon
#[derive(Debug, Clone)]
pub struct VibrationalAverage {
    params: AverageParameters,
    scheme: Scheme,
}

impl VibrationalAverage {
    /// Build the displacement scheme and generate the configurations
    ///
    /// # Arguments
    ///
    /// * `params` - Parameters of the average
    /// * `spectrum` - Phonon modes; only the gamma point is used
    /// * `host_masses` - Masses of the structure as read, in amu; the mass at
    ///   the muon site is replaced by `params.muon_mass`
    pub fn new(params: AverageParameters, spectrum: &PhononSpectrum, host_masses: &[f64]) -> Result<Self> {
        let masses = AtomicMasses::with_implant(host_masses, params.mu_index, params.muon_mass)?;
        let phonons = PhononData::from_spectrum(spectrum, masses)?;
        let mut scheme = Scheme::new(params.method, phonons, &params.scheme)?;
        scheme.generate_displacements(params.grid_n, params.displace_t)?;

        log::info!(
            "Generated {} {} configurations at {} K for muon {}",
            scheme.configuration_count(),
            params.method,
            params.displace_t,
            scheme.phonons().target()
        );

        Ok(Self { params, scheme })
    }

    /// Parameters of this average
    pub fn params(&self) -> &AverageParameters {
        &self.params
    }

    /// The displacement scheme
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Index of the muon
    pub fn muon_index(&self) -> usize {
        self.scheme.phonons().target()
    }

    /// Number of displaced configurations
    pub fn configuration_count(&self) -> usize {
        self.scheme.configuration_count()
    }

    /// Displacements in Å, one (N, 3) array per configuration
    pub fn displacements(&self) -> &[Array2<f64>] {
        self.scheme.displacements()
    }

    /// Positions of every displaced configuration
    ///
    /// `base` holds the equilibrium Cartesian positions in Å, with atoms in
    /// the same order as the phonon eigenvectors.
    pub fn displaced_positions(&self, base: &Array2<f64>) -> Result<Vec<Array2<f64>>> {
        let expected = (self.scheme.atom_count(), 3);
        if base.dim() != expected {
            return Err(WorkflowError::Shape(format!(
                "base positions have shape {:?}, phonons describe {:?}",
                base.dim(),
                expected
            )));
        }
        Ok(self.displacements().iter().map(|d| base + d).collect())
    }

    /// An empty result collection sized for this average
    pub fn results(&self) -> ConfigurationResults {
        ConfigurationResults::new(self.configuration_count())
    }

    /// Reduce the computed values to the vibrational average
    ///
    /// Weights are recomputed at the averaging temperature first. Every
    /// configuration needs a value of the shape of the averaged property.
    pub fn average(&mut self, results: ConfigurationResults) -> Result<AverageReport> {
        let temperature = self.params.average_temperature();
        self.scheme.recompute_weights(temperature)?;

        if results.expected() != self.configuration_count() {
            return Err(AverageError::LengthMismatch {
                values: results.expected(),
                weights: self.configuration_count(),
            }
            .into());
        }
        let values = results.into_ordered()?;

        let property = self.params.property;
        if let Some((index, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| v.shape() != property.expected_shape())
        {
            return Err(AverageError::Shape(format!(
                "{} of configuration {} has shape {:?}, expected {:?}",
                property,
                index,
                value.shape(),
                property.expected_shape()
            ))
            .into());
        }

        let weights = self.scheme.weights().to_vec();
        let mut report = AverageReducer::new(self.params.tolerance)?
            .reduce(&values, &weights)?
            .with_property(property)
            .with_scheme(&self.scheme)
            .with_temperature(temperature);
        if let Some(name) = &self.params.name {
            report = report.with_source(name.as_str());
        }

        log::info!("Averaged {} over {} configurations at {} K", property, values.len(), temperature);
        Ok(report)
    }
}
