//! Decision tree construction and representation.
//!
//! This module contains everything needed to grow a CART tree from rows:
//! split scores, the greedy builder, the node type and the arena tree.

pub mod builder;
pub mod distribution;
pub mod node;
pub mod score;
pub mod tree;

pub use builder::{build, divide_set, TreeBuilder};
pub use distribution::Distribution;
pub use node::TreeNode;
pub use score::{entropy, gini_impurity, unique_counts, variance, ScoreFunction};
pub use tree::DecisionTree;

use crate::core::error::Result;

/// Depth of the longest root-to-leaf path (0 for a lone leaf).
pub fn max_depth(tree: &DecisionTree) -> Result<usize> {
    tree.max_depth()
}
