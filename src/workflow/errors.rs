/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the averaging workflow

use thiserror::Error;

use crate::average::AverageError;
use crate::phonons::PhononError;
use crate::schemes::SchemeError;

/// Result type for workflow operations
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Errors raised by the write and read stages of a vibrational average
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Error from the phonon data
    #[error("Phonon error: {0}")]
    Phonon(#[from] PhononError),

    /// Error from the displacement scheme
    #[error("Scheme error: {0}")]
    Scheme(#[from] SchemeError),

    /// Error from the reduction
    #[error("Average error: {0}")]
    Average(#[from] AverageError),

    /// Base structure does not match the phonon data
    #[error("Shape mismatch: {0}")]
    Shape(String),

    /// Parameter file could not be read
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// Parameter file could not be parsed
    #[error("Parameter error: {0}")]
    Config(#[from] serde_json::Error),
}
