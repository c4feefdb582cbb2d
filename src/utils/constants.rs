/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Physical constants used in vibrational averaging
//!
//! Values from CODATA 2018, SI units unless stated otherwise.

/// Reduced Planck constant in J·s
pub const HBAR: f64 = 1.054_571_817e-34;

/// Boltzmann constant in J/K
pub const BOLTZMANN_CONSTANT: f64 = 1.380_649e-23;

/// Speed of light in cm/s
pub const SPEED_OF_LIGHT_CM: f64 = 2.997_924_58e10;

/// Atomic mass unit in kg
pub const AMU: f64 = 1.660_539_066_60e-27;

/// Square metres per square Angstrom
pub const ANGSTROM2_IN_M2: f64 = 1e-20;

/// Muon mass in atomic mass units
pub const MUON_MASS_AMU: f64 = 0.113_428_925_9;
