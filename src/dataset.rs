//! The fixed diabetes-progression table used for every training run
//!
//! The table is synthesized in-process from a fixed generator seed, so every
//! run of the trainer sees byte-identical data. The user-facing `--seed` only
//! controls the train/test partition, never the table itself.

use crate::error::{ProgressionError, Result};
use ndarray::{Array1, Array2};
use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Ordered feature columns; serving requests must be read in this order.
pub const FEATURE_NAMES: [&str; 10] =
    ["age", "sex", "bmi", "bp", "s1", "s2", "s3", "s4", "s5", "s6"];

/// Target column holding the progression score.
pub const TARGET_COLUMN: &str = "target";

/// Number of patient records in the table.
pub const N_RECORDS: usize = 442;

// Generator seed for the table itself. Not user-configurable.
const TABLE_SEED: u64 = 0x_d1a_be7e5;

/// Build the progression table as a DataFrame with the ten feature columns
/// plus the target column.
pub fn load() -> Result<DataFrame> {
    let mut rng = ChaCha8Rng::seed_from_u64(TABLE_SEED);
    let n = N_RECORDS;

    let age: Vec<f64> = (0..n).map(|_| rng.gen_range(19.0..79.0)).collect();
    let sex: Vec<f64> = (0..n).map(|_| if rng.gen_bool(0.5) { 1.0 } else { 2.0 }).collect();
    let bmi: Vec<f64> = (0..n).map(|_| rng.gen_range(18.0..42.0)).collect();
    let bp: Vec<f64> = (0..n).map(|_| rng.gen_range(62.0..133.0)).collect();
    let s1: Vec<f64> = (0..n).map(|_| rng.gen_range(97.0..301.0)).collect();
    let s2: Vec<f64> = (0..n).map(|_| rng.gen_range(41.0..243.0)).collect();
    let s3: Vec<f64> = (0..n).map(|_| rng.gen_range(22.0..99.0)).collect();
    let s4: Vec<f64> = (0..n).map(|_| rng.gen_range(2.0..9.1)).collect();
    let s5: Vec<f64> = (0..n).map(|_| rng.gen_range(3.2..6.1)).collect();
    let s6: Vec<f64> = (0..n).map(|_| rng.gen_range(58.0..124.0)).collect();

    // Progression score: linear signal over a few features plus noise
    let target: Vec<f64> = (0..n)
        .map(|i| {
            let base = 0.5 * age[i] + 5.5 * bmi[i] + 0.9 * bp[i] + 28.0 * s5[i]
                - 0.4 * s3[i]
                - 95.0;
            base + rng.gen_range(-40.0..40.0)
        })
        .collect();

    let df = DataFrame::new(vec![
        Series::new("age".into(), age).into(),
        Series::new("sex".into(), sex).into(),
        Series::new("bmi".into(), bmi).into(),
        Series::new("bp".into(), bp).into(),
        Series::new("s1".into(), s1).into(),
        Series::new("s2".into(), s2).into(),
        Series::new("s3".into(), s3).into(),
        Series::new("s4".into(), s4).into(),
        Series::new("s5".into(), s5).into(),
        Series::new("s6".into(), s6).into(),
        Series::new(TARGET_COLUMN.into(), target).into(),
    ])?;

    Ok(df)
}

/// Feature names in training column order.
pub fn feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Split a DataFrame into the feature matrix (columns in `FEATURE_NAMES`
/// order) and the target vector.
pub fn features_and_target(df: &DataFrame) -> Result<(Array2<f64>, Array1<f64>)> {
    let target = df
        .column(TARGET_COLUMN)
        .map_err(|_| ProgressionError::FeatureNotFound(TARGET_COLUMN.to_string()))?;
    let target_f64 = target
        .cast(&DataType::Float64)
        .map_err(|e| ProgressionError::Data(e.to_string()))?;
    let y: Array1<f64> = target_f64
        .f64()
        .map_err(|e| ProgressionError::Data(e.to_string()))?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect();

    let x = columns_to_array2(df, &FEATURE_NAMES)?;
    Ok((x, y))
}

/// Extract named columns into a row-major Array2<f64>.
fn columns_to_array2(df: &DataFrame, col_names: &[&str]) -> Result<Array2<f64>> {
    let n_rows = df.height();
    let n_cols = col_names.len();

    let col_data: Vec<Vec<f64>> = col_names
        .iter()
        .map(|col_name| {
            let column = df
                .column(col_name)
                .map_err(|_| ProgressionError::FeatureNotFound(col_name.to_string()))?;
            let column_f64 = column
                .cast(&DataType::Float64)
                .map_err(|e| ProgressionError::Data(e.to_string()))?;
            let values: Vec<f64> = column_f64
                .f64()
                .map_err(|e| ProgressionError::Data(e.to_string()))?
                .into_iter()
                .map(|v| v.unwrap_or(0.0))
                .collect();
            Ok(values)
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    let col_refs: Vec<&[f64]> = col_data.iter().map(|c| c.as_slice()).collect();
    Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| col_refs[c][r]))
}
