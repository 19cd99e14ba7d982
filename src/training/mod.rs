//! Model training: estimators, the train/test split, and the train operation

mod decision_tree;
mod estimator;
mod linear;
mod random_forest;
mod trainer;

pub use decision_tree::RegressionTree;
pub use estimator::Estimator;
pub use linear::LinearRegression;
pub use random_forest::RandomForestRegressor;
pub use trainer::{train, train_test_split, TrainOptions};
