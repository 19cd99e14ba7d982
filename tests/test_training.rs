//! Integration test: training runs and the artifact contract

use progression::dataset::FEATURE_NAMES;
use progression::registry::ModelKind;
use progression::training::{train, TrainOptions};
use std::path::PathBuf;

fn tmp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("progression-test-{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn opts(model: ModelKind, seed: u64, dir: &PathBuf) -> TrainOptions {
    TrainOptions {
        seed,
        model,
        artifact_dir: dir.clone(),
    }
}

#[test]
fn test_same_seed_same_rmse() {
    let dir = tmp_dir("determinism");

    let first = train(&opts(ModelKind::Ridge, 42, &dir)).unwrap();
    let second = train(&opts(ModelKind::Ridge, 42, &dir)).unwrap();
    assert_eq!(first.rmse, second.rmse);

    let other_seed = train(&opts(ModelKind::Ridge, 7, &dir)).unwrap();
    assert_ne!(first.rmse, other_seed.rmse);
}

#[test]
fn test_ridge_artifact_layout() {
    let dir = tmp_dir("ridge-artifacts");
    let report = train(&opts(ModelKind::Ridge, 42, &dir)).unwrap();

    assert_eq!(report.version, "v0.2");
    assert_eq!(report.model, "Ridge");
    assert_eq!(report.scaler, "StandardScaler");
    assert_eq!(report.n_train + report.n_test, 442);
    assert_eq!(report.n_test, 89); // ceil(442 * 0.2)

    for file in [
        "model.json",
        "model_v0.2.json",
        "scaler.json",
        "scaler_v0.2.json",
        "feature_names.json",
        "metrics.json",
        "metrics_v0.2.json",
    ] {
        assert!(dir.join(file).exists(), "missing artifact: {file}");
    }

    let names: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(dir.join("feature_names.json")).unwrap())
            .unwrap();
    assert_eq!(names.len(), FEATURE_NAMES.len());
    assert_eq!(names[0], "age");

    let metrics: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("metrics.json")).unwrap()).unwrap();
    assert_eq!(metrics["model"], "Ridge");
    assert_eq!(metrics["version"], "v0.2");
    assert_eq!(metrics["random_state"], 42);
    assert!(metrics["rmse"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_unknown_model_lists_choices() {
    let err = "gradient_boost".parse::<ModelKind>().unwrap_err();
    let msg = err.to_string();
    for name in ["linear", "ridge", "random_forest"] {
        assert!(msg.contains(name), "choices missing '{name}' in: {msg}");
    }
}

#[test]
fn test_baseline_delta_attached_after_baseline_run() {
    let dir = tmp_dir("baseline-delta");

    // no baseline yet: ridge report carries no delta
    let without = train(&opts(ModelKind::Ridge, 42, &dir)).unwrap();
    assert!(without.baseline_rmse_v0_1.is_none());

    // the linear run writes metrics_v0.1.json, the next ridge run picks it up
    let baseline = train(&opts(ModelKind::Linear, 42, &dir)).unwrap();
    let with = train(&opts(ModelKind::Ridge, 42, &dir)).unwrap();

    assert_eq!(with.baseline_rmse_v0_1, Some(baseline.rmse));
    let delta = with.rmse_delta_vs_v0_1.unwrap();
    assert!((delta - (with.rmse - baseline.rmse)).abs() < 1e-12);
}

#[test]
fn test_baseline_run_never_compares_to_itself() {
    let dir = tmp_dir("baseline-self");
    train(&opts(ModelKind::Linear, 42, &dir)).unwrap();
    let second = train(&opts(ModelKind::Linear, 42, &dir)).unwrap();
    assert!(second.baseline_rmse_v0_1.is_none());
    assert!(second.rmse_delta_vs_v0_1.is_none());
}

#[test]
fn test_latest_aliases_track_most_recent_run() {
    let dir = tmp_dir("latest-alias");

    train(&opts(ModelKind::Linear, 42, &dir)).unwrap();
    let metrics: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("metrics.json")).unwrap()).unwrap();
    assert_eq!(metrics["version"], "v0.1");

    train(&opts(ModelKind::Ridge, 42, &dir)).unwrap();
    let metrics: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("metrics.json")).unwrap()).unwrap();
    assert_eq!(metrics["version"], "v0.2");

    // both versioned metrics files remain
    assert!(dir.join("metrics_v0.1.json").exists());
    assert!(dir.join("metrics_v0.2.json").exists());
}

#[test]
fn test_random_forest_trains_and_reports() {
    let dir = tmp_dir("forest");
    let report = train(&opts(ModelKind::RandomForest, 42, &dir)).unwrap();

    assert_eq!(report.version, "v0.3");
    assert_eq!(report.model, "RandomForestRegressor");
    assert!(report.rmse.is_finite());
    assert!(dir.join("model_v0.3.json").exists());
}
