//! Tree node implementation for the CART route engine.
//!
//! A node is either a leaf carrying a label distribution or an internal
//! split owning two children. Children are referenced by index into the
//! owning [`DecisionTree`](crate::tree::DecisionTree) arena; each index is
//! owned by exactly one parent.

use crate::core::types::{Branch, ColumnIndex, NodeIndex, Value};
use crate::tree::distribution::Distribution;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tree node representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeNode {
    /// Terminal node with the label counts of its training rows
    Leaf {
        /// Label distribution
        distribution: Distribution,
    },
    /// Binary split on one feature column
    Internal {
        /// Column read from the observation
        column: ColumnIndex,
        /// Threshold (numeric) or category (categorical) of the split
        split_value: Value,
        /// Child taken when the predicate holds
        true_child: NodeIndex,
        /// Child taken when the predicate fails
        false_child: NodeIndex,
    },
}

impl TreeNode {
    /// Creates a new leaf node.
    pub fn new_leaf(distribution: Distribution) -> Self {
        TreeNode::Leaf { distribution }
    }

    /// Creates a new internal node.
    pub fn new_internal(
        column: ColumnIndex,
        split_value: Value,
        true_child: NodeIndex,
        false_child: NodeIndex,
    ) -> Self {
        TreeNode::Internal {
            column,
            split_value,
            true_child,
            false_child,
        }
    }

    /// Returns true if this node is a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Returns the leaf distribution (for leaf nodes).
    pub fn distribution(&self) -> Option<&Distribution> {
        match self {
            TreeNode::Leaf { distribution } => Some(distribution),
            TreeNode::Internal { .. } => None,
        }
    }

    /// Returns the split column (for internal nodes).
    pub fn split_column(&self) -> Option<ColumnIndex> {
        match self {
            TreeNode::Internal { column, .. } => Some(*column),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Returns the split value (for internal nodes).
    pub fn split_value(&self) -> Option<&Value> {
        match self {
            TreeNode::Internal { split_value, .. } => Some(split_value),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Returns the `(true, false)` child indices (for internal nodes).
    pub fn children(&self) -> Option<(NodeIndex, NodeIndex)> {
        match self {
            TreeNode::Internal {
                true_child,
                false_child,
                ..
            } => Some((*true_child, *false_child)),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Child reached through `branch` (for internal nodes).
    pub fn child(&self, branch: Branch) -> Option<NodeIndex> {
        self.children().map(|(t, f)| match branch {
            Branch::True => t,
            Branch::False => f,
        })
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeNode::Leaf { distribution } => write!(f, "Leaf({})", distribution),
            TreeNode::Internal {
                column,
                split_value,
                true_child,
                false_child,
            } => write!(
                f,
                "Internal(column={}, split={}, true={}, false={})",
                column, split_value, true_child, false_child
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_leaf_node() {
        let dist = Distribution::from_counts(vec![(Value::Number(3.0), 2)]);
        let node = TreeNode::new_leaf(dist.clone());

        assert!(node.is_leaf());
        assert_eq!(node.distribution(), Some(&dist));
        assert!(node.split_column().is_none());
        assert!(node.children().is_none());
    }

    #[test]
    fn test_new_internal_node() {
        let node = TreeNode::new_internal(2, Value::Number(5.0), 1, 2);

        assert!(!node.is_leaf());
        assert_eq!(node.split_column(), Some(2));
        assert_eq!(node.split_value(), Some(&Value::Number(5.0)));
        assert_eq!(node.children(), Some((1, 2)));
        assert_eq!(node.child(Branch::True), Some(1));
        assert_eq!(node.child(Branch::False), Some(2));
        assert!(node.distribution().is_none());
    }

    #[test]
    fn test_display() {
        let node = TreeNode::new_internal(0, Value::from("Left"), 1, 2);
        assert_eq!(
            node.to_string(),
            "Internal(column=0, split=Left, true=1, false=2)"
        );
    }
}
