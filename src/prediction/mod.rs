//! Inference and prediction aggregation.
//!
//! - [`classify`](classify::classify) / [`classify_with_missing`](classify::classify_with_missing)
//!   descend a built tree.
//! - [`aggregate`] turns leaf distributions into percentage maps and
//!   scalar estimates.

pub mod aggregate;
pub mod classify;

pub use aggregate::{calculate_value, point_estimate, prediction, PercentageMap};
pub use classify::{classify, classify_leaf, classify_with_missing};
