//! Decision tree implementation for the CART route engine.
//!
//! This module provides the arena-backed tree structure produced by the
//! builder and read by inference, route extraction and persistence.
//! Traversals use explicit work stacks, so tree depth is never bounded by
//! the call stack.

use crate::core::error::{CartError, Result};
use crate::core::types::{NodeIndex, Value};
use crate::prediction::aggregate::point_estimate;
use crate::tree::node::TreeNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

/// Index of the root node in every non-empty tree.
pub const ROOT: NodeIndex = 0;

/// Binary decision tree stored as a node arena.
///
/// Index 0 is the root. Every other node is the child of exactly one
/// internal node. A tree with no nodes is the degenerate result of building
/// from zero rows; every read operation on it fails with
/// [`CartError::EmptyTreeNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Creates the empty tree.
    pub fn empty() -> Self {
        DecisionTree { nodes: Vec::new() }
    }

    /// Creates a tree from an arena, validating its structure.
    pub fn from_nodes(nodes: Vec<TreeNode>) -> Result<Self> {
        let tree = DecisionTree { nodes };
        tree.validate()?;
        Ok(tree)
    }

    /// Returns true if the tree was built from zero rows.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of nodes in the tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of leaf nodes in the tree.
    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Returns the node arena.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Returns the root node.
    pub fn root(&self) -> Result<&TreeNode> {
        self.nodes.get(ROOT).ok_or(CartError::EmptyTreeNode)
    }

    /// Returns the node at `index`.
    pub fn node(&self, index: NodeIndex) -> Result<&TreeNode> {
        if self.nodes.is_empty() {
            return Err(CartError::EmptyTreeNode);
        }
        self.nodes.get(index).ok_or_else(|| {
            CartError::internal(format!(
                "node index {} outside arena of {} nodes",
                index,
                self.nodes.len()
            ))
        })
    }

    /// Number of splits on the longest root-to-leaf path: 0 for a lone
    /// leaf, otherwise `1 + max(depth(true), depth(false))`.
    pub fn max_depth(&self) -> Result<usize> {
        self.root()?;
        let mut deepest = 0;
        let mut stack = vec![(ROOT, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            match self.node(index)?.children() {
                Some((t, f)) => {
                    stack.push((t, depth + 1));
                    stack.push((f, depth + 1));
                }
                None => deepest = deepest.max(depth),
            }
        }
        Ok(deepest)
    }

    /// Validates the arena: every child index is in range, the root is
    /// never a child, every other node has exactly one parent and is
    /// reachable from the root, and no leaf distribution is empty.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Ok(());
        }

        let mut parents = vec![0usize; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { distribution } => {
                    if distribution.is_empty() || distribution.total() <= 0.0 {
                        return Err(CartError::MalformedLeafDistribution {
                            total: distribution.total(),
                        });
                    }
                }
                TreeNode::Internal {
                    true_child,
                    false_child,
                    ..
                } => {
                    for &child in &[*true_child, *false_child] {
                        if child == ROOT || child >= self.nodes.len() {
                            return Err(CartError::internal(format!(
                                "node {} has invalid child index {}",
                                i, child
                            )));
                        }
                        parents[child] += 1;
                    }
                }
            }
        }

        if let Some(orphan) = parents
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, &count)| count != 1)
        {
            return Err(CartError::internal(format!(
                "node {} has {} parents, expected 1",
                orphan.0, orphan.1
            )));
        }

        // One parent per node plus a parentless root still admits detached
        // cycles, so confirm everything is reachable.
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![ROOT];
        while let Some(index) = stack.pop() {
            if seen[index] {
                return Err(CartError::internal(format!("node {} reached twice", index)));
            }
            seen[index] = true;
            if let Some((t, f)) = self.nodes[index].children() {
                stack.push(t);
                stack.push(f);
            }
        }
        if let Some(unreached) = seen.iter().position(|&s| !s) {
            return Err(CartError::internal(format!(
                "node {} is unreachable from the root",
                unreached
            )));
        }

        Ok(())
    }

    /// Renders the tree one node per line.
    ///
    /// Internal nodes print as `<column>: >=<value>? ` for numeric splits or
    /// `<column>: <value>? ` for categorical ones; leaves print their point
    /// estimate, or their raw distribution when labels are not numeric.
    /// Children are prefixed `T->`/`F->` and indented two spaces per level.
    pub fn render(&self, attributes: Option<&[String]>) -> Result<String> {
        self.root()?;
        let mut out = String::new();
        let mut stack: Vec<(NodeIndex, &str, String)> = vec![(ROOT, "", String::new())];
        while let Some((index, branch, indent)) = stack.pop() {
            match self.node(index)? {
                TreeNode::Leaf { distribution } => {
                    let summary = match point_estimate(distribution) {
                        Ok(estimate) => estimate.to_string(),
                        Err(_) => distribution.to_string(),
                    };
                    let _ = writeln!(out, "{}{}{}", indent, branch, summary);
                }
                TreeNode::Internal {
                    column,
                    split_value,
                    true_child,
                    false_child,
                } => {
                    let name = match attributes {
                        Some(names) => names
                            .get(*column)
                            .cloned()
                            .ok_or_else(|| {
                                CartError::feature_index_mismatch(*column, names.len())
                            })?,
                        None => column.to_string(),
                    };
                    let split = match split_value {
                        Value::Number(_) => format!(">={}", split_value),
                        Value::Category(_) => split_value.to_string(),
                    };
                    let _ = writeln!(out, "{}{}{}: {}? ", indent, branch, name, split);
                    let child_indent = format!("{}  ", indent);
                    stack.push((*false_child, "F->", child_indent.clone()));
                    stack.push((*true_child, "T->", child_indent));
                }
            }
        }
        Ok(out)
    }
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_depth() {
            Ok(depth) => write!(
                f,
                "DecisionTree(nodes={}, leaves={}, depth={})",
                self.num_nodes(),
                self.num_leaves(),
                depth
            ),
            Err(_) => write!(f, "DecisionTree(empty)"),
        }
    }
}
