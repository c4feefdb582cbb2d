/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Atomic masses with the implanted particle substituted in

use ndarray::Array1;
use serde::Serialize;

use super::errors::{PhononError, Result};
use crate::utils::constants::MUON_MASS_AMU;

/// Per-atom masses in amu, with the target atom carrying the implant mass
///
/// The only way to build this type is through [`AtomicMasses::with_implant`]
/// (or [`AtomicMasses::with_muon`]), so any phonon data built from it has had
/// the host mass at the target site replaced before a displacement scheme
/// can see it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomicMasses {
    masses: Array1<f64>,
    target: usize,
}

impl AtomicMasses {
    /// Replace the mass of the target atom with `implant_mass`
    ///
    /// # Arguments
    ///
    /// * `host_masses` - Masses of the structure as read, in amu
    /// * `target` - Index of the implanted atom; `None` selects the last atom
    /// * `implant_mass` - Mass of the implanted particle in amu
    pub fn with_implant(host_masses: &[f64], target: Option<usize>, implant_mass: f64) -> Result<Self> {
        if host_masses.is_empty() {
            return Err(PhononError::Shape("no atomic masses given".to_string()));
        }

        let atoms = host_masses.len();
        let target = target.unwrap_or(atoms - 1);
        if target >= atoms {
            return Err(PhononError::InvalidTarget { index: target, atoms });
        }

        let mut masses = Array1::from(host_masses.to_vec());
        masses[target] = implant_mass;

        if let Some((index, &mass)) = masses
            .iter()
            .enumerate()
            .find(|(_, m)| !m.is_finite() || **m <= 0.0)
        {
            return Err(PhononError::InvalidMass { index, mass });
        }

        Ok(Self { masses, target })
    }

    /// Replace the mass of the target atom with the muon mass
    pub fn with_muon(host_masses: &[f64], target: Option<usize>) -> Result<Self> {
        Self::with_implant(host_masses, target, MUON_MASS_AMU)
    }

    /// Index of the implanted atom
    pub fn target(&self) -> usize {
        self.target
    }

    /// Mass of the implanted atom in amu
    pub fn target_mass(&self) -> f64 {
        self.masses[self.target]
    }

    /// All masses in amu
    pub fn masses(&self) -> &Array1<f64> {
        &self.masses
    }

    /// Number of atoms
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    /// Always false: construction rejects empty mass lists
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muon_substitution() {
        let masses = AtomicMasses::with_muon(&[12.011, 1.008], Some(1)).unwrap();
        assert_eq!(masses.target(), 1);
        assert_eq!(masses.target_mass(), MUON_MASS_AMU);
        assert_eq!(masses.masses()[0], 12.011);
    }

    #[test]
    fn test_default_target_is_last_atom() {
        let masses = AtomicMasses::with_implant(&[28.085, 28.085, 1.008], None, 0.5).unwrap();
        assert_eq!(masses.target(), 2);
        assert_eq!(masses.target_mass(), 0.5);
        assert_eq!(masses.len(), 3);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            AtomicMasses::with_muon(&[1.0, 2.0], Some(2)),
            Err(PhononError::InvalidTarget { index: 2, atoms: 2 })
        );
        assert!(matches!(
            AtomicMasses::with_muon(&[], None),
            Err(PhononError::Shape(_))
        ));
        assert!(matches!(
            AtomicMasses::with_muon(&[-1.0, 2.0], Some(1)),
            Err(PhononError::InvalidMass { index: 0, .. })
        ));
        // The host mass at the target site is replaced, so it is not checked
        assert!(AtomicMasses::with_muon(&[1.0, f64::NAN], Some(1)).is_ok());
    }
}
