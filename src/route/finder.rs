//! Route enumeration over a built tree.

use crate::core::error::{CartError, Result};
use crate::core::types::{Branch, NodeIndex};
use crate::prediction::aggregate::point_estimate;
use crate::route::anchors::Anchors;
use crate::route::path::{PathToken, Route};
use crate::tree::node::TreeNode;
use crate::tree::tree::{DecisionTree, ROOT};
use log::debug;

/// Enumerates every route reachable once anchored splits are pinned.
///
/// A split on an anchored column follows only the branch its anchor value
/// selects and records nothing. Any other split is explored both ways,
/// true branch first, each recording a [`PathToken`]. Every reached leaf
/// yields one [`Route`] carrying its point estimate: `k` reachable free
/// splits give `k + 1` routes, which is `2^d` when every path crosses the
/// same `d` free splits.
///
/// `attributes` names the columns; a split column without a name is a
/// [`CartError::FeatureIndexMismatch`].
pub fn find_routes<S: AsRef<str>>(
    tree: &DecisionTree,
    anchors: &Anchors,
    attributes: &[S],
) -> Result<Vec<Route>> {
    tree.root()?;
    let mut routes = Vec::new();
    let mut stack: Vec<(NodeIndex, Vec<PathToken>)> = vec![(ROOT, Vec::new())];

    while let Some((index, tokens)) = stack.pop() {
        match tree.node(index)? {
            TreeNode::Leaf { distribution } => {
                routes.push(Route::new(tokens, point_estimate(distribution)?));
            }
            TreeNode::Internal {
                column,
                split_value,
                true_child,
                false_child,
            } => {
                let name = attributes
                    .get(*column)
                    .map(AsRef::as_ref)
                    .ok_or_else(|| CartError::feature_index_mismatch(*column, attributes.len()))?;

                match anchors.resolve(name, split_value) {
                    Some(Branch::True) => stack.push((*true_child, tokens)),
                    Some(Branch::False) => stack.push((*false_child, tokens)),
                    None => {
                        let mut false_tokens = tokens.clone();
                        false_tokens.push(PathToken::new(name, split_value.clone(), Branch::False));
                        let mut true_tokens = tokens;
                        true_tokens.push(PathToken::new(name, split_value.clone(), Branch::True));
                        stack.push((*false_child, false_tokens));
                        stack.push((*true_child, true_tokens));
                    }
                }
            }
        }
    }

    debug!("enumerated {} routes", routes.len());
    Ok(routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Value;
    use crate::tree::distribution::Distribution;

    fn leaf(label: f64) -> TreeNode {
        TreeNode::new_leaf(Distribution::from_counts(vec![(Value::Number(label), 1)]))
    }

    fn attributes() -> Vec<String> {
        vec!["Age".to_string(), "Foot".to_string(), "Skill".to_string()]
    }

    /// Age >= 30 ? (Foot >= 5 ? 10 : 20) : (Skill >= 3 ? (Foot >= 8 ? 30 : 40) : 50)
    fn sample_tree() -> DecisionTree {
        DecisionTree::from_nodes(vec![
            TreeNode::new_internal(0, Value::Number(30.0), 1, 2),
            TreeNode::new_internal(1, Value::Number(5.0), 3, 4),
            TreeNode::new_internal(2, Value::Number(3.0), 5, 6),
            leaf(10.0),
            leaf(20.0),
            TreeNode::new_internal(1, Value::Number(8.0), 7, 8),
            leaf(50.0),
            leaf(30.0),
            leaf(40.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_anchor_prunes_branch() {
        let tree = sample_tree();
        let old_anchors = Anchors::demographic(35.0, 180.0, 75.0);
        let old = find_routes(&tree, &old_anchors, &attributes()).unwrap();
        let rendered: Vec<String> = old.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["|Foot 5 T|10", "|Foot 5 F|20"]);

        let young_anchors = Anchors::demographic(20.0, 180.0, 75.0);
        let young = find_routes(&tree, &young_anchors, &attributes()).unwrap();
        let rendered: Vec<String> = young.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["|Skill 3 T|Foot 8 T|30", "|Skill 3 T|Foot 8 F|40", "|Skill 3 F|50"]
        );
    }

    #[test]
    fn test_anchor_threshold_is_inclusive() {
        let tree = sample_tree();
        let anchors = Anchors::demographic(30.0, 0.0, 0.0);
        let routes = find_routes(&tree, &anchors, &attributes()).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].estimate, 10.0);
    }

    #[test]
    fn test_no_anchors_explores_everything() {
        let tree = sample_tree();
        let routes = find_routes(&tree, &Anchors::new(), &attributes()).unwrap();
        assert_eq!(routes.len(), tree.num_leaves());
        assert_eq!(routes[0].tokens[0].column, "Age");
    }

    #[test]
    fn test_complete_free_tree_doubles() {
        // Foot >= 5 ? (Skill >= 3 ? 1 : 2) : (Skill >= 4 ? 3 : 4)
        let tree = DecisionTree::from_nodes(vec![
            TreeNode::new_internal(1, Value::Number(5.0), 1, 2),
            TreeNode::new_internal(2, Value::Number(3.0), 3, 4),
            TreeNode::new_internal(2, Value::Number(4.0), 5, 6),
            leaf(1.0),
            leaf(2.0),
            leaf(3.0),
            leaf(4.0),
        ])
        .unwrap();
        let anchors = Anchors::demographic(20.0, 0.0, 0.0);
        let routes = find_routes(&tree, &anchors, &attributes()).unwrap();
        assert_eq!(routes.len(), 4);
        let estimates: Vec<f64> = routes.iter().map(|r| r.estimate).collect();
        assert_eq!(estimates, vec![1.0, 2.0, 3.0, 4.0]);
        assert!(routes.iter().all(|r| r.tokens.len() == 2));
    }

    #[test]
    fn test_categorical_split_on_numeric_anchor_is_free() {
        let tree = DecisionTree::from_nodes(vec![
            TreeNode::new_internal(0, Value::from("young"), 1, 2),
            leaf(1.0),
            leaf(2.0),
        ])
        .unwrap();
        let anchors = Anchors::demographic(25.0, 0.0, 0.0);
        let routes = find_routes(&tree, &anchors, &attributes()).unwrap();
        let rendered: Vec<String> = routes.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["|Age young T|1", "|Age young F|2"]);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            find_routes(&DecisionTree::empty(), &Anchors::new(), &attributes()),
            Err(CartError::EmptyTreeNode)
        ));
        let short = vec!["Age".to_string()];
        assert!(matches!(
            find_routes(&sample_tree(), &Anchors::new(), &short),
            Err(CartError::FeatureIndexMismatch { index: 1, length: 1 })
        ));
    }
}
