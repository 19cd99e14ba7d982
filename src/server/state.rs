//! Application state loaded once at startup

use crate::artifacts::ArtifactStore;
use crate::error::Result;
use crate::training::Estimator;
use tracing::info;

/// Model and feature schema shared read-only across handlers.
///
/// Loaded once before the listener binds and never mutated afterward, so
/// handlers need no locking.
pub struct AppState {
    pub model: Estimator,
    pub feature_names: Vec<String>,
}

impl AppState {
    /// Load the latest artifacts. Any failure here is fatal to startup.
    pub fn load(store: &ArtifactStore) -> Result<Self> {
        let model = store.load_model()?;
        let feature_names = store.load_feature_names()?;
        info!(
            model = model.class_name(),
            n_features = feature_names.len(),
            dir = %store.dir().display(),
            "loaded model artifacts"
        );
        Ok(Self {
            model,
            feature_names,
        })
    }
}
