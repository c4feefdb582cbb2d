/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Monte Carlo displacement scheme
//!
//! Every configuration draws an amplitude for every vibrational mode from
//! that mode's thermal distribution and displaces all atoms by the sum of
//! the mode patterns. Amplitudes are kept in units of the zero-point width,
//! where the distribution of mode m at temperature T is N(0, coth(ħω/2k_BT)).
//!
//! Since configurations are drawn from the distribution itself, their
//! weights are uniform at the temperature they were drawn at. At any other
//! temperature the weights are importance ratios p_T(q) / p_T₀(q) of the
//! stored amplitudes, normalized to one. No regeneration is needed, but the
//! estimate gets noisier the further T is from the drawing temperature; the
//! effective sample size is logged each time the weights change.

use std::fmt;

use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

use super::config::{SchemeKind, SchemeOptions};
use super::errors::{Result, SchemeError};
use super::{check_temperature, format_temperature, uniform_weights, vibrational_modes, DisplacementScheme};
use crate::phonons::PhononData;
use crate::utils::thermal::{gaussian_log_density, occupation_factor};

/// Effective sample sizes below this fraction of the configurations are reported
const LOW_EFFECTIVE_FRACTION: f64 = 0.1;

/// Stochastic sampling of all modes at once, displacing every atom
#[derive(Debug, Clone)]
pub struct MonteCarloScheme {
    phonons: PhononData,
    modes: Vec<usize>,
    /// Displacement pattern of each sampled mode per unit zero-point amplitude
    patterns: Vec<Array2<f64>>,
    seed: u64,
    /// Drawn amplitudes, shape (configurations, sampled modes)
    amplitudes: Array2<f64>,
    displace_temperature: Option<f64>,
    weight_temperature: Option<f64>,
    displacements: Vec<Array2<f64>>,
    weights: Array1<f64>,
}

impl MonteCarloScheme {
    /// Create a Monte Carlo scheme
    ///
    /// With `options.seed` unset a seed is drawn once here, so the
    /// configurations stay reproducible through [`MonteCarloScheme::seed`].
    pub fn new(phonons: PhononData, options: &SchemeOptions) -> Result<Self> {
        let modes = vibrational_modes(&phonons, options.min_frequency)?;
        if modes.is_empty() {
            return Err(SchemeError::NoVibrationalModes(options.min_frequency));
        }

        let patterns = modes.iter().map(|&m| phonons.mode_displacement(m)).collect();
        let seed = options.seed.unwrap_or_else(rand::random);
        log::info!(
            "Monte Carlo scheme samples {} of {} modes (seed {})",
            modes.len(),
            phonons.mode_count(),
            seed
        );

        Ok(Self {
            phonons,
            modes,
            patterns,
            seed,
            amplitudes: Array2::zeros((0, 0)),
            displace_temperature: None,
            weight_temperature: None,
            displacements: Vec::new(),
            weights: Array1::zeros(0),
        })
    }

    /// Seed of the random number generator
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Phonon mode indices that are sampled
    pub fn sampled_modes(&self) -> &[usize] {
        &self.modes
    }

    /// Drawn amplitudes in zero-point units, shape (configurations, sampled modes)
    pub fn amplitudes(&self) -> &Array2<f64> {
        &self.amplitudes
    }

    /// Temperature the configurations were drawn at
    pub fn displace_temperature(&self) -> Option<f64> {
        self.displace_temperature
    }

    /// Temperature of the current weights
    pub fn weight_temperature(&self) -> Option<f64> {
        self.weight_temperature
    }

    /// Kish effective sample size of the current weights, 1 / Σw²
    pub fn effective_sample_size(&self) -> f64 {
        1.0 / self.weights.iter().map(|w| w * w).sum::<f64>()
    }

    /// Amplitude variance of each sampled mode at `temperature`
    fn amplitude_variances(&self, temperature: f64) -> Vec<f64> {
        self.modes
            .iter()
            .map(|&m| occupation_factor(self.phonons.frequency(m), temperature))
            .collect()
    }
}

impl DisplacementScheme for MonteCarloScheme {
    fn kind(&self) -> SchemeKind {
        SchemeKind::MonteCarlo
    }

    fn phonons(&self) -> &PhononData {
        &self.phonons
    }

    fn generate_displacements(&mut self, n: usize, temperature: f64) -> Result<()> {
        if n == 0 {
            return Err(SchemeError::InvalidSampleCount(n));
        }
        check_temperature(temperature)?;

        let distributions = self
            .amplitude_variances(temperature)
            .into_iter()
            .map(|variance| {
                Normal::new(0.0, variance.sqrt())
                    .map_err(|e| SchemeError::InvalidParameter(format!("amplitude distribution: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        // Drawn in a fixed order so the seed alone fixes the configurations
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut amplitudes = Array2::zeros((n, self.modes.len()));
        for mut row in amplitudes.rows_mut() {
            for (q, distribution) in row.iter_mut().zip(&distributions) {
                *q = distribution.sample(&mut rng);
            }
        }

        let atoms = self.phonons.atom_count();
        let patterns = &self.patterns;
        self.displacements = amplitudes
            .axis_iter(Axis(0))
            .into_par_iter()
            .map(|row| {
                let mut displacement = Array2::zeros((atoms, 3));
                for (&q, pattern) in row.iter().zip(patterns) {
                    displacement.scaled_add(q, pattern);
                }
                displacement
            })
            .collect();

        log::debug!("Drew {} configurations at {} K", n, temperature);
        self.amplitudes = amplitudes;
        self.displace_temperature = Some(temperature);
        self.weights = uniform_weights(n);
        self.weight_temperature = Some(temperature);
        Ok(())
    }

    fn recompute_weights(&mut self, temperature: f64) -> Result<()> {
        let drawn_at = self.displace_temperature.ok_or(SchemeError::NotGenerated)?;
        check_temperature(temperature)?;

        let n = self.amplitudes.nrows();
        if temperature == drawn_at {
            self.weights = uniform_weights(n);
            self.weight_temperature = Some(temperature);
            return Ok(());
        }

        let target = self.amplitude_variances(temperature);
        let source = self.amplitude_variances(drawn_at);
        let log_ratios: Array1<f64> = self
            .amplitudes
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .zip(target.iter().zip(&source))
                    .map(|(&q, (&vt, &vs))| gaussian_log_density(q, vt) - gaussian_log_density(q, vs))
                    .sum::<f64>()
            })
            .collect();

        let max = log_ratios.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));
        let mut weights = log_ratios.mapv(|x| (x - max).exp());
        let total = weights.sum();
        weights /= total;
        self.weights = weights;
        self.weight_temperature = Some(temperature);

        let effective = self.effective_sample_size();
        log::debug!(
            "Reweighted {} configurations from {} K to {} K, effective sample size {:.1}",
            n,
            drawn_at,
            temperature,
            effective
        );
        if effective < LOW_EFFECTIVE_FRACTION * n as f64 {
            log::warn!(
                "Only {:.1} of {} configurations contribute at {} K; regenerate displacements closer to this temperature",
                effective,
                n,
                temperature
            );
        }
        Ok(())
    }

    fn displacements(&self) -> &[Array2<f64>] {
        &self.displacements
    }

    fn weights(&self) -> &Array1<f64> {
        &self.weights
    }
}

impl fmt::Display for MonteCarloScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Displacement scheme: {}", self.kind())?;
        writeln!(f, "Target atom: {}", self.phonons.target())?;
        writeln!(
            f,
            "Sampled modes: {} of {}",
            self.modes.len(),
            self.phonons.mode_count()
        )?;
        writeln!(f, "Configurations: {}", self.amplitudes.nrows())?;
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(f, "Displacement temperature: {}", format_temperature(self.displace_temperature))?;
        write!(
            f,
            "Weight temperature: {} (importance weights relative to the displacement temperature)",
            format_temperature(self.weight_temperature)
        )
    }
}
