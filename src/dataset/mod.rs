//! Dataset handling: named row sets, file loading and resampling.

pub mod dataset;
pub mod loader;
pub mod sampling;

pub use dataset::Dataset;
#[cfg(feature = "csv")]
pub use loader::{load_csv, CsvConfig, CsvLoader};
pub use sampling::{bootstrap_indices, bootstrap_sample, train_test_split};
