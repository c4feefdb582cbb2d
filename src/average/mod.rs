/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Averaging module
//!
//! This module collects the property values computed on displaced
//! configurations and reduces them, with the weights of a displacement
//! scheme, to a vibrational average and a per-configuration report.

pub mod errors;
pub mod property;
pub mod reducer;
pub mod report;
pub mod results;

pub use errors::{AverageError, Result};
pub use property::AveragedProperty;
pub use reducer::{AverageReducer, DEFAULT_WEIGHT_TOLERANCE};
pub use report::{AverageReport, ConfigurationEntry};
pub use results::ConfigurationResults;
