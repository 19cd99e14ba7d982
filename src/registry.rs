//! The fixed set of trainable model configurations
//!
//! Each kind carries its version tag, constructor parameters, and a
//! human-readable description. Selection is exhaustive over the enum, so a
//! new kind cannot be added without wiring every site that dispatches on it.

use crate::error::{ProgressionError, Result};
use crate::training::{Estimator, LinearRegression, RandomForestRegressor};
use std::fmt;
use std::str::FromStr;

/// Version whose metrics serve as the comparison baseline.
pub const BASELINE_VERSION: &str = "v0.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Linear,
    Ridge,
    RandomForest,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Linear, ModelKind::Ridge, ModelKind::RandomForest];

    /// Selector name accepted on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Linear => "linear",
            ModelKind::Ridge => "ridge",
            ModelKind::RandomForest => "random_forest",
        }
    }

    /// Version tag stamped onto every artifact of a run.
    pub fn version(&self) -> &'static str {
        match self {
            ModelKind::Linear => "v0.1",
            ModelKind::Ridge => "v0.2",
            ModelKind::RandomForest => "v0.3",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ModelKind::Linear => "StandardScaler + LinearRegression",
            ModelKind::Ridge => "StandardScaler + Ridge(alpha=1.0)",
            ModelKind::RandomForest => "StandardScaler + RandomForestRegressor(n_estimators=100)",
        }
    }

    /// Construct an unfitted estimator with this kind's parameters.
    /// The forest keeps its own fixed seed; the trainer's seed only drives
    /// the split.
    pub fn build(&self) -> Estimator {
        match self {
            ModelKind::Linear => Estimator::LinearRegression(LinearRegression::new()),
            ModelKind::Ridge => Estimator::Ridge(LinearRegression::new().with_alpha(1.0)),
            ModelKind::RandomForest => Estimator::RandomForestRegressor(
                RandomForestRegressor::new(100).with_random_state(42),
            ),
        }
    }

    fn choices() -> String {
        Self::ALL
            .iter()
            .map(|k| k.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = ProgressionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .find(|k| k.name() == s)
            .copied()
            .ok_or_else(|| {
                ProgressionError::Config(format!(
                    "Unknown model '{}'. Choose from: {}",
                    s,
                    Self::choices()
                ))
            })
    }
}
