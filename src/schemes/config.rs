/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Options shared by the displacement schemes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::SchemeError;

/// Default frequency below which a mode counts as a rigid-body motion (cm⁻¹)
pub const DEFAULT_MIN_FREQUENCY: f64 = 1.0;

/// Default half-width of the independent-mode grid in standard deviations
pub const DEFAULT_SIGMA_N: f64 = 3.0;

/// Available displacement schemes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeKind {
    /// Grid sampling of each mode separately, moving only the target atom
    #[default]
    Independent,
    /// Stochastic sampling of all modes at once, moving every atom
    MonteCarlo,
}

impl SchemeKind {
    /// Every scheme kind
    pub const ALL: [SchemeKind; 2] = [SchemeKind::Independent, SchemeKind::MonteCarlo];

    /// Names of the available schemes
    pub fn available() -> Vec<&'static str> {
        Self::ALL.iter().map(|kind| kind.name()).collect()
    }

    /// Name used in parameter files
    pub fn name(&self) -> &'static str {
        match self {
            SchemeKind::Independent => "independent",
            SchemeKind::MonteCarlo => "montecarlo",
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemeKind {
    type Err = SchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s.to_lowercase())
            .ok_or_else(|| {
                SchemeError::InvalidParameter(format!(
                    "unknown scheme '{}', available: {}",
                    s,
                    Self::available().join(", ")
                ))
            })
    }
}

/// How the per-mode averages of the independent scheme are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeCombination {
    /// Mean of the per-mode averages, A₀ + (1/M)·Σ(⟨A⟩ₘ − A₀)
    Mean,
    /// Equilibrium value plus the sum of per-mode shifts, ⟨A⟩ = A₀ + Σ(⟨A⟩ₘ − A₀)
    ///
    /// This is the harmonic average over all modes at once, the same quantity
    /// the Monte Carlo scheme samples. Needs an odd grid.
    #[default]
    Additive,
}

impl fmt::Display for ModeCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeCombination::Mean => f.write_str("mean of per-mode averages"),
            ModeCombination::Additive => f.write_str("equilibrium plus per-mode shifts"),
        }
    }
}

/// Options of the displacement schemes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeOptions {
    /// Modes below this frequency (cm⁻¹) are treated as rigid-body motions
    pub min_frequency: f64,
    /// Independent scheme: grid half-width in standard deviations
    pub sigma_n: f64,
    /// Independent scheme: keep only the modes moving the target atom most
    pub max_modes: Option<usize>,
    /// Independent scheme: how per-mode averages combine
    pub combination: ModeCombination,
    /// Monte Carlo scheme: random seed, drawn once when absent
    pub seed: Option<u64>,
}

impl Default for SchemeOptions {
    fn default() -> Self {
        Self {
            min_frequency: DEFAULT_MIN_FREQUENCY,
            sigma_n: DEFAULT_SIGMA_N,
            max_modes: None,
            combination: ModeCombination::Additive,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_schemes() {
        assert_eq!(SchemeKind::available(), vec!["independent", "montecarlo"]);
        assert_eq!("MonteCarlo".parse::<SchemeKind>().unwrap(), SchemeKind::MonteCarlo);
        assert!("harmonic".parse::<SchemeKind>().is_err());
    }

    #[test]
    fn test_options_from_json() {
        let options: SchemeOptions =
            serde_json::from_str(r#"{"sigma_n": 2.5, "combination": "mean"}"#).unwrap();
        assert_eq!(options.sigma_n, 2.5);
        assert_eq!(options.combination, ModeCombination::Mean);
        assert_eq!(SchemeOptions::default().combination, ModeCombination::Additive);
        assert_eq!(options.min_frequency, DEFAULT_MIN_FREQUENCY);
        assert_eq!(options.seed, None);

        let kind: SchemeKind = serde_json::from_str(r#""montecarlo""#).unwrap();
        assert_eq!(kind, SchemeKind::MonteCarlo);
    }
}
