//! Evaluation metric and the persisted training report

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Root-mean-squared-error between held-out targets and predictions.
pub fn root_mean_squared_error(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
    let n = y_true.len() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mse = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).powi(2))
        .sum::<f64>()
        / n;
    mse.sqrt()
}

/// Metrics record written next to the model artifacts after every run.
///
/// The baseline fields are present only when a parseable `metrics_v0.1.json`
/// existed at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainReport {
    pub version: String,
    pub rmse: f64,
    pub n_train: usize,
    pub n_test: usize,
    pub random_state: u64,
    pub model: String,
    pub model_description: String,
    pub scaler: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_rmse_v0_1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rmse_delta_vs_v0_1: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rmse_zero_for_perfect_predictions() {
        let y = array![1.0, 2.0, 3.0];
        assert_eq!(root_mean_squared_error(&y, &y), 0.0);
    }

    #[test]
    fn test_rmse_known_value() {
        let y_true = array![0.0, 0.0];
        let y_pred = array![3.0, 4.0];
        // mse = (9 + 16) / 2 = 12.5
        assert!((root_mean_squared_error(&y_true, &y_pred) - 12.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_report_omits_absent_baseline() {
        let report = TrainReport {
            version: "v0.1".to_string(),
            rmse: 55.0,
            n_train: 353,
            n_test: 89,
            random_state: 42,
            model: "LinearRegression".to_string(),
            model_description: "StandardScaler + LinearRegression".to_string(),
            scaler: "StandardScaler".to_string(),
            baseline_rmse_v0_1: None,
            rmse_delta_vs_v0_1: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("baseline_rmse_v0_1"));
        assert!(!json.contains("rmse_delta_vs_v0_1"));
    }
}
