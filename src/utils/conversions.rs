/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Unit conversion utilities

use std::f64::consts::PI;

use super::constants;

/// Convert a wavenumber in cm⁻¹ to an angular frequency in rad/s
pub fn wavenumber_to_angular(wavenumber: f64) -> f64 {
    2.0 * PI * constants::SPEED_OF_LIGHT_CM * wavenumber
}

/// Convert an angular frequency in rad/s to a wavenumber in cm⁻¹
pub fn angular_to_wavenumber(omega: f64) -> f64 {
    omega / (2.0 * PI * constants::SPEED_OF_LIGHT_CM)
}

/// Convert a mass from atomic mass units to kg
pub fn amu_to_kg(amu: f64) -> f64 {
    amu * constants::AMU
}

/// Convert an area from m² to Å²
pub fn m2_to_angstrom2(m2: f64) -> f64 {
    m2 / constants::ANGSTROM2_IN_M2
}

/// Energy quantum ħω of a mode in J, from its wavenumber in cm⁻¹
pub fn wavenumber_to_joule(wavenumber: f64) -> f64 {
    constants::HBAR * wavenumber_to_angular(wavenumber)
}
