/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the displacement schemes

use thiserror::Error;

use crate::phonons::PhononError;

/// Result type for displacement scheme operations
pub type Result<T> = std::result::Result<T, SchemeError>;

/// Errors raised while generating displacements or weights
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemeError {
    /// Error from the phonon data
    #[error("Phonon error: {0}")]
    Phonon(#[from] PhononError),

    /// Zero configurations requested
    #[error("Invalid sample count {0}: at least one configuration is required")]
    InvalidSampleCount(usize),

    /// Scheme option outside its allowed range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Negative or non-finite temperature
    #[error("Invalid temperature: {0} K")]
    InvalidTemperature(f64),

    /// No mode above the frequency threshold couples to the sampled atoms
    #[error("No vibrational modes above {0} cm⁻¹ to sample")]
    NoVibrationalModes(f64),

    /// Weights requested before any displacement was generated
    #[error("Displacements have not been generated yet")]
    NotGenerated,
}
