//! Progression - diabetes-progression regression training and serving
//!
//! Two entry points share one artifact contract:
//! - the trainer fits a scaler and a registry-selected regression estimator
//!   on the fixed progression table, evaluates RMSE on a held-out split, and
//!   persists model/scaler/feature-schema/metrics files under both versioned
//!   and "latest" names;
//! - the server loads the latest model and feature schema once at startup
//!   and answers single-record prediction requests over HTTP.
//!
//! # Modules
//! - [`dataset`] - the fixed tabular dataset and matrix extraction
//! - [`registry`] - the named set of trainable model configurations
//! - [`training`] - estimators, the split, and the train operation
//! - [`scaler`] - feature standardization
//! - [`metrics`] - RMSE and the persisted training report
//! - [`artifacts`] - artifact directory layout and (de)serialization
//! - [`server`] - the prediction API

pub mod artifacts;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod registry;
pub mod scaler;
pub mod server;
pub mod training;

pub use error::{ProgressionError, Result};
