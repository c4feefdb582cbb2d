/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Phonon data module
//!
//! This module holds the gamma point normal modes of a structure together
//! with its atomic masses, after the mass of the implanted particle has been
//! substituted in.

pub mod data;
pub mod errors;
pub mod masses;
pub mod spectrum;

pub use data::PhononData;
pub use errors::{PhononError, Result};
pub use masses::AtomicMasses;
pub use spectrum::{PhononSpectrum, QPointModes};
