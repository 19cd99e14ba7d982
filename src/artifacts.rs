//! Artifact directory layout shared by the trainer and the server
//!
//! Every file is a full overwrite on save. Versioned names pin a training
//! run; the untagged names are "latest" aliases rewritten by every run.

use crate::error::{ProgressionError, Result};
use crate::metrics::TrainReport;
use crate::scaler::StandardScaler;
use crate::training::Estimator;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_ARTIFACT_DIR: &str = "model";

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn model_path(&self) -> PathBuf {
        self.dir.join("model.json")
    }

    pub fn model_path_versioned(&self, version: &str) -> PathBuf {
        self.dir.join(format!("model_{version}.json"))
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.dir.join("scaler.json")
    }

    pub fn scaler_path_versioned(&self, version: &str) -> PathBuf {
        self.dir.join(format!("scaler_{version}.json"))
    }

    pub fn feature_names_path(&self) -> PathBuf {
        self.dir.join("feature_names.json")
    }

    pub fn metrics_path(&self) -> PathBuf {
        self.dir.join("metrics.json")
    }

    pub fn metrics_path_versioned(&self, version: &str) -> PathBuf {
        self.dir.join(format!("metrics_{version}.json"))
    }

    /// Write the model under its versioned name and the latest alias.
    pub fn save_model(&self, model: &Estimator, version: &str) -> Result<()> {
        write_json(&self.model_path_versioned(version), model)?;
        write_json(&self.model_path(), model)
    }

    pub fn save_scaler(&self, scaler: &StandardScaler, version: &str) -> Result<()> {
        write_json(&self.scaler_path_versioned(version), scaler)?;
        write_json(&self.scaler_path(), scaler)
    }

    pub fn save_feature_names(&self, names: &[String]) -> Result<()> {
        write_json(&self.feature_names_path(), &names)
    }

    pub fn save_report(&self, report: &TrainReport) -> Result<()> {
        write_json(&self.metrics_path_versioned(&report.version), report)?;
        write_json(&self.metrics_path(), report)
    }

    pub fn load_model(&self) -> Result<Estimator> {
        read_json(&self.model_path())
    }

    pub fn load_scaler(&self) -> Result<StandardScaler> {
        read_json(&self.scaler_path())
    }

    pub fn load_feature_names(&self) -> Result<Vec<String>> {
        read_json(&self.feature_names_path())
    }

    /// RMSE from the baseline version's metrics file, if it exists and
    /// parses. Any failure here is absorbed: the baseline comparison is an
    /// optional enrichment, never a reason to fail a run.
    pub fn baseline_rmse(&self, baseline_version: &str) -> Option<f64> {
        let path = self.metrics_path_versioned(baseline_version);
        let text = fs::read_to_string(path).ok()?;
        let value: serde_json::Value = serde_json::from_str(&text).ok()?;
        value.get("rmse").and_then(|v| v.as_f64())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| {
        ProgressionError::Artifact(format!("failed to read {}: {}", path.display(), e))
    })?;
    let value = serde_json::from_str(&text).map_err(|e| {
        ProgressionError::Artifact(format!("failed to parse {}: {}", path.display(), e))
    })?;
    Ok(value)
}
