//! The serializable model artifact

use crate::error::Result;
use crate::training::{LinearRegression, RandomForestRegressor};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Fitted (or fittable) estimator as persisted to and loaded from disk.
///
/// The variant name doubles as the model's reported class name in the
/// metrics record, so `ridge` runs report `"Ridge"` even though both linear
/// variants share an implementation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Estimator {
    LinearRegression(LinearRegression),
    Ridge(LinearRegression),
    RandomForestRegressor(RandomForestRegressor),
}

impl Estimator {
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        match self {
            Estimator::LinearRegression(m) | Estimator::Ridge(m) => {
                m.fit(x, y)?;
            }
            Estimator::RandomForestRegressor(m) => {
                m.fit(x, y)?;
            }
        }
        Ok(())
    }

    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        match self {
            Estimator::LinearRegression(m) | Estimator::Ridge(m) => m.predict(x),
            Estimator::RandomForestRegressor(m) => m.predict(x),
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Estimator::LinearRegression(_) => "LinearRegression",
            Estimator::Ridge(_) => "Ridge",
            Estimator::RandomForestRegressor(_) => "RandomForestRegressor",
        }
    }
}
