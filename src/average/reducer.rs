/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Weighted reduction of per-configuration values

use ndarray::ArrayD;

use super::errors::{AverageError, Result};
use super::report::{AverageReport, ConfigurationEntry};
use super::results::ConfigurationResults;

/// Default tolerance on the weight sum
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 1e-6;

/// Computes Σ wᵢ vᵢ over configurations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageReducer {
    tolerance: f64,
}

impl Default for AverageReducer {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_WEIGHT_TOLERANCE,
        }
    }
}

impl AverageReducer {
    /// Create a reducer accepting weight sums within 1 ± `tolerance`
    ///
    /// The tolerance must be a non-negative number; an infinite tolerance
    /// accepts any finite weight sum.
    pub fn new(tolerance: f64) -> Result<Self> {
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(AverageError::InvalidTolerance(tolerance));
        }
        Ok(Self { tolerance })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Weighted average of `values`
    ///
    /// All values must share one shape (scalars are zero-dimensional arrays)
    /// and the weights must sum to one within the tolerance. The sum is taken
    /// relative to the first value, v₀ + Σ wᵢ (vᵢ − v₀) / Σ wᵢ, which equals
    /// Σ wᵢ vᵢ for normalized weights and returns constant inputs unchanged.
    ///
    /// Weights that pass the check but do not sum to exactly one are
    /// renormalized by the division by Σ wᵢ, so the result is the weighted
    /// mean rather than the raw Σ wᵢ vᵢ. The raw weights are kept in the
    /// report entries.
    pub fn reduce(&self, values: &[ArrayD<f64>], weights: &[f64]) -> Result<AverageReport> {
        if values.len() != weights.len() {
            return Err(AverageError::LengthMismatch {
                values: values.len(),
                weights: weights.len(),
            });
        }
        let pivot = values.first().ok_or(AverageError::Empty)?;

        let total: f64 = weights.iter().sum();
        // Written so that a NaN sum fails too
        if !((total - 1.0).abs() <= self.tolerance) {
            return Err(AverageError::WeightNormalization {
                sum: total,
                tolerance: self.tolerance,
            });
        }

        if let Some((index, value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| v.shape() != pivot.shape())
        {
            return Err(AverageError::Shape(format!(
                "value {} has shape {:?}, expected {:?}",
                index,
                value.shape(),
                pivot.shape()
            )));
        }

        let mut shift = ArrayD::zeros(pivot.raw_dim());
        for (value, &weight) in values.iter().zip(weights).skip(1) {
            shift.scaled_add(weight, &(value - pivot));
        }
        let average = pivot + &(shift / total);

        log::debug!("Reduced {} configurations, weight sum {}", values.len(), total);

        let entries = values
            .iter()
            .zip(weights)
            .enumerate()
            .map(|(index, (value, &weight))| ConfigurationEntry {
                index,
                weight,
                value: value.clone(),
            })
            .collect();

        Ok(AverageReport::new(average, entries))
    }

    /// Weighted average of results collected by configuration index
    ///
    /// Fails with [`AverageError::IncompleteResults`] if any configuration
    /// has no value.
    pub fn reduce_results(&self, results: ConfigurationResults, weights: &[f64]) -> Result<AverageReport> {
        if results.expected() != weights.len() {
            return Err(AverageError::LengthMismatch {
                values: results.expected(),
                weights: weights.len(),
            });
        }
        let values = results.into_ordered()?;
        self.reduce(&values, weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{arr0, arr2};

    fn scalars(values: &[f64]) -> Vec<ArrayD<f64>> {
        values.iter().map(|&x| arr0(x).into_dyn()).collect()
    }

    #[test]
    fn test_weighted_sum() {
        let report = AverageReducer::default()
            .reduce(&scalars(&[1.0, 2.0, 4.0]), &[0.5, 0.25, 0.25])
            .unwrap();
        assert_relative_eq!(report.average.first().copied().unwrap(), 2.0, epsilon = 1e-15);
        assert_eq!(report.entries.len(), 3);
        assert_eq!(report.entries[2].weight, 0.25);
    }

    #[test]
    fn test_tensor_values() {
        let values = vec![
            arr2(&[[1.0, 0.0], [0.0, 1.0]]).into_dyn(),
            arr2(&[[3.0, 2.0], [2.0, 3.0]]).into_dyn(),
        ];
        let report = AverageReducer::default().reduce(&values, &[0.5, 0.5]).unwrap();
        assert_eq!(report.average, arr2(&[[2.0, 1.0], [1.0, 2.0]]).into_dyn());
    }

    #[test]
    fn test_constant_values_are_exact() {
        for n in [1, 3, 7, 10] {
            let c = 0.1 + n as f64 / 3.0;
            let values = scalars(&vec![c; n]);
            let weights = vec![1.0 / n as f64; n];
            let report = AverageReducer::default().reduce(&values, &weights).unwrap();
            assert_eq!(report.average.first().copied().unwrap(), c);
        }
    }

    #[test]
    fn test_input_errors() {
        let reducer = AverageReducer::default();
        assert_eq!(
            reducer.reduce(&scalars(&[1.0, 2.0, 3.0]), &[0.25; 4]),
            Err(AverageError::LengthMismatch { values: 3, weights: 4 })
        );
        assert!(matches!(
            reducer.reduce(&scalars(&[1.0, 2.0, 3.0]), &[0.5, 0.5, 0.5]),
            Err(AverageError::WeightNormalization { sum, .. }) if sum == 1.5
        ));
        assert!(matches!(
            reducer.reduce(&scalars(&[1.0, 2.0]), &[f64::NAN, 1.0]),
            Err(AverageError::WeightNormalization { .. })
        ));
        assert_eq!(reducer.reduce(&[], &[]), Err(AverageError::Empty));

        let mixed = vec![arr0(1.0).into_dyn(), arr2(&[[1.0]]).into_dyn()];
        assert!(matches!(
            reducer.reduce(&mixed, &[0.5, 0.5]),
            Err(AverageError::Shape(_))
        ));
    }

    #[test]
    fn test_tolerance_validation() {
        assert!(matches!(
            AverageReducer::new(f64::NAN),
            Err(AverageError::InvalidTolerance(t)) if t.is_nan()
        ));
        assert_eq!(AverageReducer::new(-1e-3), Err(AverageError::InvalidTolerance(-1e-3)));
        assert_eq!(AverageReducer::new(0.0).unwrap().tolerance(), 0.0);

        // Infinite tolerance still rejects a NaN weight sum
        let lenient = AverageReducer::new(f64::INFINITY).unwrap();
        assert!(lenient.reduce(&scalars(&[1.0, 2.0]), &[0.5, 1.5]).is_ok());
        assert!(lenient.reduce(&scalars(&[1.0, 2.0]), &[f64::NAN, 0.5]).is_err());
    }

    #[test]
    fn test_nearly_normalized_weights_are_renormalized() {
        let report = AverageReducer::new(1e-2)
            .unwrap()
            .reduce(&scalars(&[2.0, 4.0]), &[0.5, 0.505])
            .unwrap();
        // Weighted mean (0.5·2 + 0.505·4) / 1.005, not the raw sum 3.02
        assert_relative_eq!(report.average.first().copied().unwrap(), 3.02 / 1.005, epsilon = 1e-12);
        assert_eq!(report.entries[1].weight, 0.505);
    }

    #[test]
    fn test_reduce_results_requires_every_configuration() {
        let mut results = ConfigurationResults::new(3);
        results.insert(0, arr0(1.0).into_dyn()).unwrap();
        results.insert(2, arr0(1.0).into_dyn()).unwrap();
        let weights = [0.2, 0.3, 0.5];
        assert!(matches!(
            AverageReducer::default().reduce_results(results.clone(), &weights),
            Err(AverageError::IncompleteResults { ref missing, .. }) if missing == &vec![1]
        ));

        results.insert(1, arr0(2.0).into_dyn()).unwrap();
        let report = AverageReducer::default().reduce_results(results, &weights).unwrap();
        assert_relative_eq!(report.average.first().copied().unwrap(), 1.3, epsilon = 1e-12);
    }
}
