/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the phonons module

use thiserror::Error;

/// Errors raised while assembling phonon data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhononError {
    /// Frequency, eigenvector and mass arrays do not describe the same system
    #[error("Shape mismatch: {0}")]
    Shape(String),

    /// A mode frequency that cannot describe a stable vibration
    #[error("Invalid mode {index} with frequency {frequency} cm⁻¹: {reason}")]
    InvalidMode {
        index: usize,
        frequency: f64,
        reason: String,
    },

    /// Non-finite or non-positive atomic mass
    #[error("Invalid mass {mass} amu for atom {index}")]
    InvalidMass { index: usize, mass: f64 },

    /// Target atom index outside the structure
    #[error("Target atom {index} out of range for a system of {atoms} atoms")]
    InvalidTarget { index: usize, atoms: usize },

    /// The phonon source holds no zero wavevector entry
    #[error("Could not find gamma point phonons among {0} q-points")]
    MissingGammaPoint(usize),
}

/// Result type for phonon operations
pub type Result<T> = std::result::Result<T, PhononError>;
