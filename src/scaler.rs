//! Feature standardization

use crate::error::{ProgressionError, Result};
use ndarray::{Array2, Axis};
use serde::{Deserialize, Serialize};

/// Per-column z-score scaler: (x - mean) / std.
///
/// Fit only on the training split; the evaluation split is transformed with
/// the training-split statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
    is_fitted: bool,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            means: Vec::new(),
            stds: Vec::new(),
            is_fitted: false,
        }
    }

    /// Compute column means and population standard deviations.
    /// Zero-variance columns get a scale of 1.0 so they pass through centered.
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        if x.nrows() == 0 {
            return Err(ProgressionError::Data("cannot fit scaler on empty matrix".to_string()));
        }

        let n = x.nrows() as f64;
        self.means = x
            .mean_axis(Axis(0))
            .ok_or_else(|| ProgressionError::Computation("column mean failed".to_string()))?
            .to_vec();
        self.stds = x
            .axis_iter(Axis(1))
            .zip(self.means.iter())
            .map(|(col, &mean)| {
                let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
                let std = var.sqrt();
                if std == 0.0 { 1.0 } else { std }
            })
            .collect();

        self.is_fitted = true;
        Ok(self)
    }

    /// Apply the fitted statistics to a matrix with the same column count.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(ProgressionError::NotFitted);
        }
        if x.ncols() != self.means.len() {
            return Err(ProgressionError::Shape {
                expected: format!("{} columns", self.means.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let mut out = x.clone();
        for (j, mut col) in out.axis_iter_mut(Axis(1)).enumerate() {
            let (mean, std) = (self.means[j], self.stds[j]);
            col.mapv_inplace(|v| (v - mean) / std);
        }
        Ok(out)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}
