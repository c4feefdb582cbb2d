/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Observables that can be averaged on the implanted atom

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::AverageError;

/// Property of the implanted atom to average
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AveragedProperty {
    /// Hyperfine coupling tensor, 3×3
    #[default]
    Hyperfine,
    /// Atomic charge, scalar
    Charge,
}

impl AveragedProperty {
    /// Every averaged property
    pub const ALL: [AveragedProperty; 2] = [AveragedProperty::Hyperfine, AveragedProperty::Charge];

    /// Names of the available properties
    pub fn available() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }

    /// Name used in parameter files
    pub fn name(&self) -> &'static str {
        match self {
            AveragedProperty::Hyperfine => "hyperfine",
            AveragedProperty::Charge => "charge",
        }
    }

    /// Name used in reports
    pub fn description(&self) -> &'static str {
        match self {
            AveragedProperty::Hyperfine => "hyperfine tensor",
            AveragedProperty::Charge => "charge",
        }
    }

    /// Shape of one value of this property
    pub fn expected_shape(&self) -> &'static [usize] {
        match self {
            AveragedProperty::Hyperfine => &[3, 3],
            AveragedProperty::Charge => &[],
        }
    }
}

impl fmt::Display for AveragedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for AveragedProperty {
    type Err = AverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s.to_lowercase())
            .ok_or_else(|| AverageError::UnknownProperty {
                name: s.to_string(),
                available: Self::available().join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_catalogue() {
        assert_eq!(AveragedProperty::available(), vec!["hyperfine", "charge"]);
        assert_eq!(AveragedProperty::Hyperfine.expected_shape(), &[3, 3]);
        assert!(AveragedProperty::Charge.expected_shape().is_empty());
        assert_eq!("Charge".parse::<AveragedProperty>().unwrap(), AveragedProperty::Charge);
        assert_eq!(AveragedProperty::Hyperfine.to_string(), "hyperfine tensor");
    }
}
