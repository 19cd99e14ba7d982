//! HTTP request handlers

use std::sync::Arc;
use axum::{body::Bytes, extract::State, Json};
use ndarray::Array2;
use serde_json::json;

use super::error::{Result, ServerError};
use super::state::AppState;
use super::MODEL_API_VERSION;

/// Simple health check.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "model_version": MODEL_API_VERSION,
    }))
}

/// Return the predicted progression score for a single record.
///
/// The body is parsed by hand rather than through a typed extractor so that
/// malformed JSON gets the same error body shape as every other rejection.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<serde_json::Value>> {
    let data: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| ServerError::BadRequest(format!("Invalid JSON body: {e}")))?;

    let record = data
        .as_object()
        .ok_or_else(|| ServerError::BadRequest("JSON body must be an object".to_string()))?;

    // Every schema feature must be present; extra keys are ignored.
    let missing: Vec<&String> = state
        .feature_names
        .iter()
        .filter(|name| !record.contains_key(*name))
        .collect();
    if !missing.is_empty() {
        return Err(ServerError::BadRequest(format!(
            "Missing features: {:?}",
            missing
        )));
    }

    // Values are read in training column order, not body order.
    let row: Vec<f64> = state
        .feature_names
        .iter()
        .map(|name| {
            record[name].as_f64().ok_or_else(|| {
                ServerError::BadRequest(format!("Feature '{}' must be a number", name))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    let n_features = row.len();
    let x = Array2::from_shape_vec((1, n_features), row)
        .map_err(|e| ServerError::BadRequest(format!("Invalid input dimensions: {e}")))?;

    let predictions = state.model.predict(&x)?;
    let y_pred = predictions[0];

    Ok(Json(json!({
        "prediction": y_pred,
        "status": "ok",
    })))
}
