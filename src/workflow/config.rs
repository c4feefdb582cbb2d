/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Parameters of a vibrational average

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::Result;
use crate::average::{AveragedProperty, DEFAULT_WEIGHT_TOLERANCE};
use crate::schemes::{SchemeKind, SchemeOptions};
use crate::utils::constants::MUON_MASS_AMU;

/// Default number of grid points per mode, or of Monte Carlo configurations
///
/// Odd, so the independent grid contains the equilibrium point.
pub const DEFAULT_GRID_N: usize = 21;

/// Parameters of a vibrational average
///
/// Every field has a default, so a parameter file only lists what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AverageParameters {
    /// Name of the structure, used in reports
    pub name: Option<String>,
    /// Displacement scheme
    pub method: SchemeKind,
    /// Index of the muon; the last atom when unset
    pub mu_index: Option<usize>,
    /// Mass substituted at the muon site in amu
    pub muon_mass: f64,
    /// Grid points per mode (independent) or configurations (Monte Carlo)
    pub grid_n: usize,
    /// Temperature the displacements are generated at, in Kelvin
    #[serde(alias = "displace_T")]
    pub displace_t: f64,
    /// Temperature the weights are computed at; `displace_t` when unset
    #[serde(alias = "average_T")]
    pub average_t: Option<f64>,
    /// Property to average
    #[serde(alias = "avgprop")]
    pub property: AveragedProperty,
    /// Accepted deviation of the weight sum from one
    pub tolerance: f64,
    /// Scheme options
    #[serde(flatten)]
    pub scheme: SchemeOptions,
}

impl Default for AverageParameters {
    fn default() -> Self {
        Self {
            name: None,
            method: SchemeKind::Independent,
            mu_index: None,
            muon_mass: MUON_MASS_AMU,
            grid_n: DEFAULT_GRID_N,
            displace_t: 0.0,
            average_t: None,
            property: AveragedProperty::Hyperfine,
            tolerance: DEFAULT_WEIGHT_TOLERANCE,
            scheme: SchemeOptions::default(),
        }
    }
}

impl AverageParameters {
    /// Parse parameters from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read parameters from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Temperature the weights are computed at
    pub fn average_temperature(&self) -> f64 {
        self.average_t.unwrap_or(self.displace_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemes::ModeCombination;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let params = AverageParameters::from_json_str("{}").unwrap();
        assert_eq!(params, AverageParameters::default());
        assert_eq!(params.grid_n, 21);
        assert_eq!(params.grid_n % 2, 1);
        assert_eq!(params.scheme.sigma_n, 3.0);
        assert_eq!(params.average_temperature(), 0.0);
    }

    #[test]
    fn test_parameter_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "name": "ethyleneMu",
                "method": "montecarlo",
                "mu_index": 4,
                "grid_n": 50,
                "displace_T": 100.0,
                "avgprop": "charge",
                "combination": "additive",
                "seed": 12
            }}"#
        )
        .unwrap();

        let params = AverageParameters::from_file(file.path()).unwrap();
        assert_eq!(params.method, SchemeKind::MonteCarlo);
        assert_eq!(params.mu_index, Some(4));
        assert_eq!(params.displace_t, 100.0);
        assert_eq!(params.average_temperature(), 100.0);
        assert_eq!(params.property, AveragedProperty::Charge);
        assert_eq!(params.scheme.combination, ModeCombination::Additive);
        assert_eq!(params.scheme.seed, Some(12));
    }

    #[test]
    fn test_bad_parameters() {
        assert!(AverageParameters::from_json_str(r#"{"method": "harmonic"}"#).is_err());
        assert!(AverageParameters::from_file("/nonexistent/params.json").is_err());
    }
}
