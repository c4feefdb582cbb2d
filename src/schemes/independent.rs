/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Independent-mode displacement scheme
//!
//! Each vibrational mode is sampled on its own, on a regular grid spanning
//! a number of standard deviations of the mode's thermal Gaussian. Only the
//! target atom is displaced: along a mode it moves in the direction of its
//! own eigenvector component, with the oscillator width of the reduced mass
//! m / |e|². A configuration is one (mode, grid point) pair, ordered mode
//! first, so the scheme yields `modes × grid_n` configurations.

use std::fmt;

use ndarray::{Array1, Array2};
use rayon::prelude::*;

use super::config::{ModeCombination, SchemeKind, SchemeOptions};
use super::errors::{Result, SchemeError};
use super::{check_temperature, format_temperature, vibrational_modes, DisplacementScheme};
use crate::phonons::PhononData;
use crate::utils::thermal::{HarmonicOscillator, ThermalModel};

/// Eigenvector norms at the target below this do not move it
const MIN_TARGET_WEIGHT: f64 = 1e-8;

/// A mode sampled by the independent scheme
#[derive(Debug, Clone)]
struct SampledMode {
    /// Index into the phonon modes
    index: usize,
    /// Unit direction of the target atom's motion
    direction: [f64; 3],
    /// Norm of the eigenvector at the target atom
    target_weight: f64,
    /// Oscillator with the reduced mass seen by the target
    oscillator: HarmonicOscillator,
    /// Grid positions along `direction` in Å
    positions: Array1<f64>,
}

impl SampledMode {
    fn displacement(&self, atoms: usize, target: usize, x: f64) -> Array2<f64> {
        let mut displacement = Array2::zeros((atoms, 3));
        for (k, d) in self.direction.iter().enumerate() {
            displacement[[target, k]] = d * x;
        }
        displacement
    }

    /// Gaussian weights of the grid positions at `temperature`, summing to one
    fn weights(&self, temperature: f64) -> Array1<f64> {
        let variance = self.oscillator.mean_square_displacement(temperature);
        let mut weights = self.positions.mapv(|x| (-x * x / (2.0 * variance)).exp());
        let total = weights.sum();
        weights /= total;
        weights
    }
}

/// Deterministic grid sampling of each mode, displacing only the target atom
#[derive(Debug, Clone)]
pub struct IndependentModeScheme {
    phonons: PhononData,
    sigma_n: f64,
    combination: ModeCombination,
    modes: Vec<SampledMode>,
    grid_n: usize,
    displace_temperature: Option<f64>,
    weight_temperature: Option<f64>,
    displacements: Vec<Array2<f64>>,
    mode_weights: Array1<f64>,
    weights: Array1<f64>,
}

impl IndependentModeScheme {
    /// Create an independent-mode scheme
    ///
    /// Modes below `options.min_frequency` and modes that leave the target
    /// atom at rest are not sampled. With `options.max_modes` set, only the
    /// modes with the largest eigenvector weight on the target are kept.
    pub fn new(phonons: PhononData, options: &SchemeOptions) -> Result<Self> {
        if !options.sigma_n.is_finite() || options.sigma_n <= 0.0 {
            return Err(SchemeError::InvalidParameter(format!(
                "sigma_n must be positive, got {}",
                options.sigma_n
            )));
        }
        if options.max_modes == Some(0) {
            return Err(SchemeError::InvalidParameter(
                "max_modes must keep at least one mode".to_string(),
            ));
        }

        let target_mass = phonons.masses().target_mass();
        let mut modes = Vec::new();
        for index in vibrational_modes(&phonons, options.min_frequency)? {
            let component = phonons.target_component(index);
            let norm = component.iter().map(|c| c * c).sum::<f64>().sqrt();
            if norm < MIN_TARGET_WEIGHT {
                log::debug!("Mode {} leaves the target atom at rest, skipping", index);
                continue;
            }

            modes.push(SampledMode {
                index,
                direction: component.map(|c| c / norm),
                target_weight: norm,
                oscillator: HarmonicOscillator::new(phonons.frequency(index), target_mass / (norm * norm)),
                positions: Array1::zeros(0),
            });
        }

        if let Some(max_modes) = options.max_modes {
            if modes.len() > max_modes {
                modes.sort_by(|a, b| b.target_weight.total_cmp(&a.target_weight));
                modes.truncate(max_modes);
                modes.sort_by_key(|mode| mode.index);
            }
        }

        if modes.is_empty() {
            return Err(SchemeError::NoVibrationalModes(options.min_frequency));
        }

        log::info!(
            "Independent scheme samples {} of {} modes on atom {}",
            modes.len(),
            phonons.mode_count(),
            phonons.target()
        );

        Ok(Self {
            phonons,
            sigma_n: options.sigma_n,
            combination: options.combination,
            modes,
            grid_n: 0,
            displace_temperature: None,
            weight_temperature: None,
            displacements: Vec::new(),
            mode_weights: Array1::zeros(0),
            weights: Array1::zeros(0),
        })
    }

    /// Phonon mode indices that are sampled, in configuration order
    pub fn sampled_modes(&self) -> Vec<usize> {
        self.modes.iter().map(|mode| mode.index).collect()
    }

    /// Grid points per mode of the last generation
    pub fn grid_size(&self) -> usize {
        self.grid_n
    }

    /// Grid half-width in standard deviations
    pub fn sigma_n(&self) -> f64 {
        self.sigma_n
    }

    /// How per-mode averages combine in [`DisplacementScheme::weights`]
    pub fn combination(&self) -> ModeCombination {
        self.combination
    }

    /// Phonon mode sampled by configuration `configuration`
    pub fn configuration_mode(&self, configuration: usize) -> Option<usize> {
        if self.grid_n == 0 {
            return None;
        }
        self.modes.get(configuration / self.grid_n).map(|mode| mode.index)
    }

    /// Grid positions along the mode direction in Å, per sampled mode
    pub fn grid_positions(&self) -> Vec<&Array1<f64>> {
        self.modes.iter().map(|mode| &mode.positions).collect()
    }

    /// Weights normalized to one over each mode's grid
    pub fn mode_weights(&self) -> &Array1<f64> {
        &self.mode_weights
    }

    /// Temperature the grid was built at
    pub fn displace_temperature(&self) -> Option<f64> {
        self.displace_temperature
    }

    /// Temperature of the current weights
    pub fn weight_temperature(&self) -> Option<f64> {
        self.weight_temperature
    }
}

impl DisplacementScheme for IndependentModeScheme {
    fn kind(&self) -> SchemeKind {
        SchemeKind::Independent
    }

    fn phonons(&self) -> &PhononData {
        &self.phonons
    }

    fn generate_displacements(&mut self, n: usize, temperature: f64) -> Result<()> {
        if n == 0 {
            return Err(SchemeError::InvalidSampleCount(n));
        }
        check_temperature(temperature)?;
        if self.combination == ModeCombination::Additive && n % 2 == 0 {
            return Err(SchemeError::InvalidParameter(format!(
                "additive combination needs an odd grid to include the equilibrium point, got {}",
                n
            )));
        }

        let sigma_n = self.sigma_n;
        for mode in &mut self.modes {
            let span = sigma_n * mode.oscillator.sigma(temperature);
            mode.positions = if n == 1 {
                Array1::zeros(1)
            } else {
                Array1::from_shape_fn(n, |i| span * (2.0 * i as f64 / (n - 1) as f64 - 1.0))
            };
            log::debug!(
                "Mode {} ({:.2} cm⁻¹): grid of {} points over ±{:.5} Å",
                mode.index,
                mode.oscillator.frequency(),
                n,
                span
            );
        }

        let atoms = self.phonons.atom_count();
        let target = self.phonons.target();
        self.displacements = self
            .modes
            .par_iter()
            .map(|mode| {
                mode.positions
                    .iter()
                    .map(|&x| mode.displacement(atoms, target, x))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        self.grid_n = n;
        self.displace_temperature = Some(temperature);
        self.recompute_weights(temperature)
    }

    fn recompute_weights(&mut self, temperature: f64) -> Result<()> {
        if self.displacements.is_empty() {
            return Err(SchemeError::NotGenerated);
        }
        check_temperature(temperature)?;

        let per_mode: Vec<f64> = self
            .modes
            .iter()
            .flat_map(|mode| mode.weights(temperature).to_vec())
            .collect();
        self.mode_weights = Array1::from(per_mode);

        let modes = self.modes.len() as f64;
        self.weights = match self.combination {
            ModeCombination::Mean => &self.mode_weights / modes,
            ModeCombination::Additive => {
                // The central point of the first mode is the equilibrium geometry
                let mut weights = self.mode_weights.clone();
                weights[(self.grid_n - 1) / 2] += 1.0 - modes;
                weights
            }
        };
        self.weight_temperature = Some(temperature);
        Ok(())
    }

    fn displacements(&self) -> &[Array2<f64>] {
        &self.displacements
    }

    fn weights(&self) -> &Array1<f64> {
        &self.weights
    }
}

impl fmt::Display for IndependentModeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Displacement scheme: {}", self.kind())?;
        writeln!(f, "Target atom: {}", self.phonons.target())?;
        writeln!(f, "Sampled modes:")?;
        for mode in &self.modes {
            writeln!(
                f,
                "    mode {:>4}  {:>10.3} cm⁻¹  target weight {:.4}  reduced mass {:.5} amu",
                mode.index,
                mode.oscillator.frequency(),
                mode.target_weight,
                mode.oscillator.mass()
            )?;
        }
        writeln!(f, "Grid: {} points per mode over ±{} σ", self.grid_n, self.sigma_n)?;
        writeln!(f, "Mode combination: {}", self.combination)?;
        writeln!(f, "Displacement temperature: {}", format_temperature(self.displace_temperature))?;
        write!(f, "Weight temperature: {}", format_temperature(self.weight_temperature))
    }
}
