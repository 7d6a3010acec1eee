//! # cart-route
//!
//! A CART decision/regression tree engine that answers two questions about
//! a trained tree:
//!
//! - **Forward**: given an observation, which label distribution does it
//!   reach and what single value does that amount to?
//! - **Backward**: given anchor values for some columns (for players: age,
//!   height and weight) and a target value, which ranges of the remaining
//!   columns lead to the leaf whose estimate is closest to that target?
//!
//! ## Quick Start
//!
//! ```rust
//! use cart_route::{build, calculate_value, classify, ScoreFunction, Value};
//!
//! # fn main() -> cart_route::Result<()> {
//! let rows = vec![
//!     vec![Value::Number(1.0), Value::Number(10.0)],
//!     vec![Value::Number(2.0), Value::Number(10.0)],
//!     vec![Value::Number(8.0), Value::Number(20.0)],
//!     vec![Value::Number(9.0), Value::Number(20.0)],
//! ];
//! let tree = build(&rows, ScoreFunction::Variance, 0.0, 0)?;
//!
//! let percentages = classify(&[Value::Number(8.5)], &tree)?;
//! assert_eq!(calculate_value(&percentages)?, 20.0);
//! # Ok(())
//! # }
//! ```
//!
//! ## Finding routes to a target
//!
//! ```rust
//! use cart_route::{build, find_routes, select_route, Anchors, ScoreFunction, Value};
//!
//! # fn main() -> cart_route::Result<()> {
//! let attributes = ["Age", "Skill", "Wage"];
//! let rows = vec![
//!     vec![Value::Number(20.0), Value::Number(1.0), Value::Number(5.0)],
//!     vec![Value::Number(20.0), Value::Number(4.0), Value::Number(15.0)],
//!     vec![Value::Number(34.0), Value::Number(1.0), Value::Number(2.0)],
//!     vec![Value::Number(34.0), Value::Number(4.0), Value::Number(8.0)],
//! ];
//! let tree = build(&rows, ScoreFunction::Variance, 0.0, 0)?;
//!
//! let routes = find_routes(&tree, &Anchors::demographic(21.0, 180.0, 75.0), &attributes)?;
//! let constraints = select_route(14.0, &routes)?;
//! assert_eq!(constraints.get("Skill").as_deref(), Some("Skill>=4"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: cell values, constants and error handling
//! - [`config`]: [`TreeConfig`] and its builder, file and environment layers
//! - [`tree`]: score functions, the greedy builder and the arena tree
//! - [`prediction`]: classification and prediction aggregation
//! - [`route`]: anchor-guided route enumeration and range synthesis
//! - [`dataset`]: CSV loading and bootstrap resampling
//! - [`io`]: tree and attribute persistence

#![warn(missing_debug_implementations, rust_2018_idioms)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Tree construction module
pub mod tree;

// Inference module
pub mod prediction;

// Route extraction module
pub mod route;

// Dataset management module
pub mod dataset;

// Persistence module
pub mod io;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{CartError, Result},
    types::*,
};

// Re-export configuration functionality
pub use config::{TreeConfig, TreeConfigBuilder};

// Re-export tree functionality
pub use tree::{
    build, divide_set, max_depth, DecisionTree, Distribution, ScoreFunction, TreeBuilder, TreeNode,
};

// Re-export prediction functionality
pub use prediction::{
    calculate_value, classify, classify_with_missing, point_estimate, prediction, PercentageMap,
};

// Re-export route functionality
pub use route::{find_routes, select_route, Anchors, ConstraintMap, PathToken, Route};

// Re-export dataset functionality
pub use dataset::{bootstrap_sample, train_test_split, Dataset};
#[cfg(feature = "csv")]
pub use dataset::{load_csv, CsvLoader};

// Re-export persistence functionality
pub use io::{
    load_attributes, load_attributes_from_file, load_tree, load_tree_from_file, save_attributes,
    save_attributes_to_file, save_tree, save_tree_to_file, SerializationFormat,
};

// Version information
pub use crate::core::constants::CART_ROUTE_VERSION as VERSION;

/// Initialize the library.
///
/// Sets up `env_logger` so `log` output from building, route selection and
/// persistence becomes visible (`RUST_LOG`, default `info`). Calling it is
/// optional and repeated calls are harmless.
///
/// ```rust
/// fn main() -> cart_route::Result<()> {
///     cart_route::init()?;
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    crate::core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    crate::core::is_core_initialized()
}
