/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! # muon-vibaverage
//!
//! Quantum vibrational averages of observables on an implanted muon.
//!
//! The phonon modes of a host structure containing a muon are turned into a
//! set of displaced configurations that sample the vibrational wavefunction
//! at a chosen temperature. Once an external electronic-structure code has
//! evaluated a property (hyperfine tensor, charge) on each configuration,
//! the values are recombined into a temperature-dependent weighted average.
//!
//! Two sampling schemes are provided: deterministic grid sampling of each
//! mode moving only the muon ([`schemes::IndependentModeScheme`]) and
//! stochastic sampling of all modes moving every atom
//! ([`schemes::MonteCarloScheme`]).

pub mod average;
pub mod phonons;
pub mod schemes;
pub mod utils;
pub mod workflow;

pub use average::{AverageReducer, AverageReport, AveragedProperty, ConfigurationResults};
pub use phonons::{AtomicMasses, PhononData, PhononSpectrum, QPointModes};
pub use schemes::{DisplacementScheme, Scheme, SchemeKind, SchemeOptions};
pub use workflow::{AverageParameters, VibrationalAverage};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_options() {
        assert_eq!(SchemeKind::available(), vec!["independent", "montecarlo"]);
        assert_eq!(AveragedProperty::available(), vec!["hyperfine", "charge"]);
        assert!(!VERSION.is_empty());
    }
}
