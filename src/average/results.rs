/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Per-configuration results, in whatever order they arrive

use std::collections::BTreeMap;

use ndarray::ArrayD;

use super::errors::{AverageError, Result};

/// Property values keyed by the index of the configuration they belong to
///
/// Property calculations on displaced configurations finish in any order.
/// Keying each value by its configuration index lets them be matched with
/// the scheme's weights regardless of completion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationResults {
    expected: usize,
    values: BTreeMap<usize, ArrayD<f64>>,
}

impl ConfigurationResults {
    /// Create an empty collection for `expected` configurations
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            values: BTreeMap::new(),
        }
    }

    /// Collect (index, value) pairs for `expected` configurations
    pub fn from_pairs<I>(expected: usize, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, ArrayD<f64>)>,
    {
        let mut results = Self::new(expected);
        for (index, value) in pairs {
            results.insert(index, value)?;
        }
        Ok(results)
    }

    /// Record the value of configuration `index`
    pub fn insert(&mut self, index: usize, value: ArrayD<f64>) -> Result<()> {
        if index >= self.expected {
            return Err(AverageError::UnknownConfiguration {
                index,
                expected: self.expected,
            });
        }
        if self.values.contains_key(&index) {
            return Err(AverageError::DuplicateResult(index));
        }
        self.values.insert(index, value);
        Ok(())
    }

    /// Number of configurations the results are for
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Number of values received
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no value was received yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of configuration `index`, if received
    pub fn get(&self, index: usize) -> Option<&ArrayD<f64>> {
        self.values.get(&index)
    }

    /// Configuration indices without a value
    pub fn missing(&self) -> Vec<usize> {
        (0..self.expected)
            .filter(|i| !self.values.contains_key(i))
            .collect()
    }

    /// Whether every configuration has a value
    pub fn is_complete(&self) -> bool {
        self.values.len() == self.expected
    }

    /// Values in configuration order
    ///
    /// Fails with [`AverageError::IncompleteResults`] naming every missing
    /// configuration rather than averaging over a subset.
    pub fn into_ordered(self) -> Result<Vec<ArrayD<f64>>> {
        if !self.is_complete() {
            return Err(AverageError::IncompleteResults {
                missing: self.missing(),
                expected: self.expected,
            });
        }
        Ok(self.values.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr0;

    fn scalar(x: f64) -> ArrayD<f64> {
        arr0(x).into_dyn()
    }

    #[test]
    fn test_out_of_order_insertion() {
        let mut results = ConfigurationResults::new(3);
        results.insert(2, scalar(2.0)).unwrap();
        results.insert(0, scalar(0.0)).unwrap();
        assert_eq!(results.missing(), vec![1]);
        results.insert(1, scalar(1.0)).unwrap();

        let ordered = results.into_ordered().unwrap();
        assert_eq!(ordered, vec![scalar(0.0), scalar(1.0), scalar(2.0)]);
    }

    #[test]
    fn test_incomplete_results_name_missing_configurations() {
        let results =
            ConfigurationResults::from_pairs(5, vec![(0, scalar(1.0)), (3, scalar(1.0))]).unwrap();
        assert_eq!(
            results.into_ordered(),
            Err(AverageError::IncompleteResults {
                missing: vec![1, 2, 4],
                expected: 5
            })
        );
    }

    #[test]
    fn test_rejects_unknown_and_duplicate_indices() {
        let mut results = ConfigurationResults::new(2);
        assert_eq!(
            results.insert(2, scalar(0.0)),
            Err(AverageError::UnknownConfiguration { index: 2, expected: 2 })
        );
        results.insert(1, scalar(0.0)).unwrap();
        assert_eq!(results.insert(1, scalar(5.0)), Err(AverageError::DuplicateResult(1)));
        assert_eq!(results.get(1), Some(&scalar(0.0)));
    }
}
