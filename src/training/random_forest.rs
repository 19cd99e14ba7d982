//! Bagged regression trees

use crate::error::{ProgressionError, Result};
use crate::training::decision_tree::RegressionTree;
use ndarray::{Array1, Array2, Axis};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Random forest regressor. Trees are fit in parallel on bootstrap samples;
/// each tree draws its sample from a ChaCha8 stream seeded deterministically
/// from `random_state`, so a fixed seed gives a fixed forest regardless of
/// thread scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    trees: Vec<RegressionTree>,
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub random_state: u64,
}

impl Default for RandomForestRegressor {
    fn default() -> Self {
        Self::new(100)
    }
}

impl RandomForestRegressor {
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            random_state: 42,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();

        if n_samples != y.len() {
            return Err(ProgressionError::Shape {
                expected: format!("y length = {}", n_samples),
                actual: format!("y length = {}", y.len()),
            });
        }
        if n_samples == 0 {
            return Err(ProgressionError::Training("cannot fit forest on empty data".to_string()));
        }

        let base_seed = self.random_state;
        let max_depth = self.max_depth;
        let min_samples_split = self.min_samples_split;
        let min_samples_leaf = self.min_samples_leaf;

        let trees: Vec<RegressionTree> = (0..self.n_estimators)
            .into_par_iter()
            .map(|tree_idx| {
                let seed = base_seed.wrapping_add(tree_idx as u64);
                let mut rng = ChaCha8Rng::seed_from_u64(seed);

                let sample_indices: Vec<usize> = (0..n_samples)
                    .map(|_| (rng.next_u64() as usize) % n_samples)
                    .collect();

                let x_boot = x.select(Axis(0), &sample_indices);
                let y_boot: Array1<f64> =
                    Array1::from_vec(sample_indices.iter().map(|&i| y[i]).collect());

                let mut tree = RegressionTree::new()
                    .with_min_samples_split(min_samples_split)
                    .with_min_samples_leaf(min_samples_leaf);
                if let Some(d) = max_depth {
                    tree = tree.with_max_depth(d);
                }
                tree.fit(&x_boot, &y_boot)?;
                Ok(tree)
            })
            .collect::<Result<Vec<_>>>()?;

        self.trees = trees;
        Ok(self)
    }

    /// Mean of the per-tree predictions.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if self.trees.is_empty() {
            return Err(ProgressionError::NotFitted);
        }

        let all_predictions: Vec<Array1<f64>> = self
            .trees
            .par_iter()
            .map(|tree| tree.predict(x))
            .collect::<Result<Vec<_>>>()?;

        let n_samples = x.nrows();
        let predictions: Vec<f64> = (0..n_samples)
            .map(|i| {
                let sum: f64 = all_predictions.iter().map(|p| p[i]).sum();
                sum / all_predictions.len() as f64
            })
            .collect();

        Ok(Array1::from_vec(predictions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn toy_data() -> (Array2<f64>, Array1<f64>) {
        let x = array![
            [1.0, 0.0],
            [2.0, 0.5],
            [3.0, 1.0],
            [4.0, 1.5],
            [5.0, 2.0],
            [6.0, 2.5],
            [7.0, 3.0],
            [8.0, 3.5],
        ];
        let y = array![2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0];
        (x, y)
    }

    #[test]
    fn test_forest_fits_and_predicts() {
        let (x, y) = toy_data();
        let mut forest = RandomForestRegressor::new(20).with_random_state(7);
        forest.fit(&x, &y).unwrap();

        let preds = forest.predict(&x).unwrap();
        assert_eq!(preds.len(), y.len());
        // predictions should land inside the observed target range
        for p in preds.iter() {
            assert!(*p >= 2.0 && *p <= 16.0);
        }
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (x, y) = toy_data();
        let probe = array![[4.5, 1.7], [1.5, 0.2]];

        let mut a = RandomForestRegressor::new(20).with_random_state(42);
        a.fit(&x, &y).unwrap();
        let mut b = RandomForestRegressor::new(20).with_random_state(42);
        b.fit(&x, &y).unwrap();

        let pa = a.predict(&probe).unwrap();
        let pb = b.predict(&probe).unwrap();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let forest = RandomForestRegressor::new(5);
        assert!(matches!(
            forest.predict(&array![[1.0, 2.0]]),
            Err(ProgressionError::NotFitted)
        ));
    }
}
