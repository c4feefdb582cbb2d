/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Error types for the averaging module

use thiserror::Error;

/// Result type for averaging operations
pub type Result<T> = std::result::Result<T, AverageError>;

/// Errors raised while collecting and reducing per-configuration values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AverageError {
    /// Values and weights differ in number
    #[error("Got {values} values but {weights} weights")]
    LengthMismatch { values: usize, weights: usize },

    /// Tolerance on the weight sum is negative or not a number
    #[error("Weight tolerance must be a non-negative number, got {0}")]
    InvalidTolerance(f64),

    /// Weights do not sum to one
    #[error("Weights sum to {sum}, outside 1 ± {tolerance}")]
    WeightNormalization { sum: f64, tolerance: f64 },

    /// Some configurations have no value
    #[error("Missing results for configurations {missing:?} out of {expected}")]
    IncompleteResults { missing: Vec<usize>, expected: usize },

    /// Values of different shapes
    #[error("Shape mismatch: {0}")]
    Shape(String),

    /// Nothing to average
    #[error("No values to average")]
    Empty,

    /// Result keyed by an index no configuration has
    #[error("Configuration {index} does not exist, only {expected} were generated")]
    UnknownConfiguration { index: usize, expected: usize },

    /// Property name not in the catalogue
    #[error("Unknown property '{name}', available: {available}")]
    UnknownProperty { name: String, available: String },

    /// Second result for the same configuration
    #[error("Configuration {0} already has a result")]
    DuplicateResult(usize),
}
