//! Inference over a built tree.
//!
//! Exact descent follows one branch per split. Missing-value descent
//! explores both branches of any split whose cell is absent and blends the
//! two results by their total mass.

use crate::core::error::{CartError, Result};
use crate::core::types::{NodeIndex, Value};
use crate::prediction::aggregate::{prediction, PercentageMap};
use crate::tree::distribution::Distribution;
use crate::tree::node::TreeNode;
use crate::tree::tree::{DecisionTree, ROOT};

/// Descends to the leaf an observation reaches and returns its raw
/// distribution.
pub fn classify_leaf<'t>(
    observation: &[Value],
    tree: &'t DecisionTree,
) -> Result<&'t Distribution> {
    let mut index = ROOT;
    loop {
        match tree.node(index)? {
            TreeNode::Leaf { distribution } => return Ok(distribution),
            TreeNode::Internal {
                column,
                split_value,
                true_child,
                false_child,
            } => {
                let cell = observation
                    .get(*column)
                    .ok_or_else(|| CartError::feature_index_mismatch(*column, observation.len()))?;
                index = if cell.satisfies(split_value) {
                    *true_child
                } else {
                    *false_child
                };
            }
        }
    }
}

/// Classifies an observation, returning label percentages of the reached
/// leaf.
pub fn classify(observation: &[Value], tree: &DecisionTree) -> Result<PercentageMap> {
    prediction(classify_leaf(observation, tree)?)
}

enum Frame {
    Visit(NodeIndex),
    Blend,
}

/// Classifies an observation whose cells may be absent (`None`).
///
/// At a split on an absent cell both subtrees are classified; with masses
/// `t` and `f` (their summed counts), every label's count is blended as
/// `count_t * t/(t+f) + count_f * f/(t+f)`. Returns raw, possibly fractional
/// counts rather than percentages.
pub fn classify_with_missing(
    observation: &[Option<Value>],
    tree: &DecisionTree,
) -> Result<Distribution> {
    tree.root()?;
    let mut frames = vec![Frame::Visit(ROOT)];
    let mut results: Vec<Distribution> = Vec::new();

    while let Some(frame) = frames.pop() {
        match frame {
            Frame::Visit(index) => match tree.node(index)? {
                TreeNode::Leaf { distribution } => results.push(distribution.clone()),
                TreeNode::Internal {
                    column,
                    split_value,
                    true_child,
                    false_child,
                } => match observation.get(*column) {
                    None => {
                        return Err(CartError::feature_index_mismatch(
                            *column,
                            observation.len(),
                        ))
                    }
                    Some(Some(cell)) => frames.push(Frame::Visit(if cell.satisfies(split_value) {
                        *true_child
                    } else {
                        *false_child
                    })),
                    Some(None) => {
                        frames.push(Frame::Blend);
                        frames.push(Frame::Visit(*false_child));
                        frames.push(Frame::Visit(*true_child));
                    }
                },
            },
            Frame::Blend => {
                let false_result = results.pop();
                let true_result = results.pop();
                let (true_result, false_result) = match (true_result, false_result) {
                    (Some(t), Some(f)) => (t, f),
                    _ => return Err(CartError::internal("blend without two branch results")),
                };
                results.push(blend(&true_result, &false_result)?);
            }
        }
    }

    results
        .pop()
        .ok_or_else(|| CartError::internal("missing-value descent produced no result"))
}

fn blend(true_result: &Distribution, false_result: &Distribution) -> Result<Distribution> {
    let true_mass = true_result.total();
    let false_mass = false_result.total();
    let mass = true_mass + false_mass;
    if !(mass > 0.0) {
        return Err(CartError::MalformedLeafDistribution { total: mass });
    }
    let mut blended = true_result.scaled(true_mass / mass);
    blended.merge(&false_result.scaled(false_mass / mass));
    Ok(blended)
}
