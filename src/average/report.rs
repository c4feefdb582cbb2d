/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Report of a vibrational average

use std::fmt;

use ndarray::ArrayD;
use serde::Serialize;

use super::property::AveragedProperty;

/// Weight and value of one configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigurationEntry {
    pub index: usize,
    pub weight: f64,
    pub value: ArrayD<f64>,
}

/// Averaged value together with the trace of the reduction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageReport {
    /// Averaged property, if known
    pub property: Option<AveragedProperty>,
    /// Structure the average was computed on
    pub source: Option<String>,
    /// Description of the displacement scheme
    pub scheme: Option<String>,
    /// Temperature the weights were computed at, in Kelvin
    pub temperature: Option<f64>,
    /// Weighted average
    pub average: ArrayD<f64>,
    /// Every configuration, in index order
    pub entries: Vec<ConfigurationEntry>,
}

impl AverageReport {
    /// Create a report from the average and its entries
    pub fn new(average: ArrayD<f64>, entries: Vec<ConfigurationEntry>) -> Self {
        Self {
            property: None,
            source: None,
            scheme: None,
            temperature: None,
            average,
            entries,
        }
    }

    pub fn with_property(mut self, property: AveragedProperty) -> Self {
        self.property = Some(property);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_scheme(mut self, scheme: impl fmt::Display) -> Self {
        self.scheme = Some(scheme.to_string());
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sum of the weights of all entries
    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }
}

impl fmt::Display for AverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let property = self.property.map_or("property", |p| p.description());
        write!(f, "Quantum average of {}", property)?;
        if let Some(source) = &self.source {
            write!(f, " calculated on {}", source)?;
        }
        writeln!(f, ".")?;
        if let Some(temperature) = self.temperature {
            writeln!(f, "Temperature: {} K", temperature)?;
        }
        if let Some(scheme) = &self.scheme {
            writeln!(f, "Scheme details:\n\n{}\n", scheme)?;
        }
        writeln!(f, "Averaged value:\n\n{}\n", self.average)?;
        writeln!(f, "All values, by configuration:\n")?;
        for entry in &self.entries {
            writeln!(f, "Conf: {} (Weight = {})\n{}\n", entry.index, entry.weight, entry.value)?;
        }
        Ok(())
    }
}
