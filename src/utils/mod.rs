/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Utility functions for vibrational averaging
//!
//! This module provides physical constants, unit conversions and the thermal
//! statistics of harmonic vibrations shared by the displacement schemes.

pub mod constants;
pub mod conversions;
pub mod thermal;

pub use conversions::{amu_to_kg, angular_to_wavenumber, m2_to_angstrom2, wavenumber_to_angular, wavenumber_to_joule};
pub use thermal::{HarmonicOscillator, ThermalModel};
