//! The train operation: split, scale, fit, evaluate, persist

use crate::artifacts::{ArtifactStore, DEFAULT_ARTIFACT_DIR};
use crate::dataset;
use crate::error::{ProgressionError, Result};
use crate::metrics::{self, TrainReport};
use crate::registry::{ModelKind, BASELINE_VERSION};
use crate::scaler::StandardScaler;
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::info;

/// Fraction of records held out for evaluation.
const TEST_FRACTION: f64 = 0.2;

#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub seed: u64,
    pub model: ModelKind,
    pub artifact_dir: PathBuf,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            model: ModelKind::Ridge,
            artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
        }
    }
}

/// Run one full training pass and write all artifacts.
///
/// The partition is a function of the seed alone, so a fixed seed and model
/// kind reproduce the same RMSE run after run.
pub fn train(opts: &TrainOptions) -> Result<TrainReport> {
    let version = opts.model.version();

    let df = dataset::load()?;
    let (x, y) = dataset::features_and_target(&df)?;
    let feature_names = dataset::feature_names();

    let (x_train, x_test, y_train, y_test) = train_test_split(&x, &y, TEST_FRACTION, opts.seed)?;
    info!(
        n_train = x_train.nrows(),
        n_test = x_test.nrows(),
        seed = opts.seed,
        "split dataset"
    );

    // Scaler statistics come from the training partition only; the test
    // partition is transformed, never fit on.
    let mut scaler = StandardScaler::new();
    let x_train_scaled = scaler.fit_transform(&x_train)?;
    let x_test_scaled = scaler.transform(&x_test)?;

    let mut model = opts.model.build();
    model.fit(&x_train_scaled, &y_train)?;

    let preds = model.predict(&x_test_scaled)?;
    let rmse = metrics::root_mean_squared_error(&y_test, &preds);
    info!(version, model = model.class_name(), rmse, "evaluated on held-out split");

    let store = ArtifactStore::new(&opts.artifact_dir);
    store.ensure_dir()?;
    store.save_model(&model, version)?;
    store.save_scaler(&scaler, version)?;
    store.save_feature_names(&feature_names)?;

    let mut report = TrainReport {
        version: version.to_string(),
        rmse,
        n_train: x_train.nrows(),
        n_test: x_test.nrows(),
        random_state: opts.seed,
        model: model.class_name().to_string(),
        model_description: opts.model.description().to_string(),
        scaler: "StandardScaler".to_string(),
        baseline_rmse_v0_1: None,
        rmse_delta_vs_v0_1: None,
    };

    if version != BASELINE_VERSION {
        if let Some(baseline) = store.baseline_rmse(BASELINE_VERSION) {
            report.baseline_rmse_v0_1 = Some(baseline);
            report.rmse_delta_vs_v0_1 = Some(rmse - baseline);
        }
    }

    store.save_report(&report)?;
    info!(dir = %store.dir().display(), "artifacts written");

    Ok(report)
}

/// Shuffle rows with a seed-determined permutation and hold out
/// ceil(n * test_fraction) rows for evaluation.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    test_fraction: f64,
    seed: u64,
) -> Result<(Array2<f64>, Array2<f64>, Array1<f64>, Array1<f64>)> {
    let n = x.nrows();
    if n != y.len() {
        return Err(ProgressionError::Shape {
            expected: format!("y length = {}", n),
            actual: format!("y length = {}", y.len()),
        });
    }

    let n_test = ((n as f64) * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(ProgressionError::Data(format!(
            "test fraction {} leaves no usable split for {} rows",
            test_fraction, n
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);

    let x_train = x.select(Axis(0), train_idx);
    let x_test = x.select(Axis(0), test_idx);
    let y_train = Array1::from_vec(train_idx.iter().map(|&i| y[i]).collect());
    let y_test = Array1::from_vec(test_idx.iter().map(|&i| y[i]).collect());

    Ok((x_train, x_test, y_train, y_test))
}
