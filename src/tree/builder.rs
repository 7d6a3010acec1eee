//! Greedy recursive splitting for the CART route engine.
//!
//! Every node tries every (feature column, distinct value) pair, keeps the
//! first candidate with the strictly largest weighted gain that passes the
//! stop conditions, and becomes a leaf when no candidate qualifies. The
//! recursion is driven by an explicit work stack over borrowed rows.

use crate::config::TreeConfig;
use crate::core::constants::{DEFAULT_MIN_GAIN, DEFAULT_MIN_SAMPLES};
use crate::core::error::{CartError, Result};
use crate::core::types::{ColumnIndex, NodeIndex, Value};
use crate::tree::distribution::Distribution;
use crate::tree::node::TreeNode;
use crate::tree::score::{unique_counts, ScoreFunction};
use crate::tree::tree::{DecisionTree, ROOT};
use std::collections::HashSet;

/// Splits rows on `column` into those satisfying the predicate for `value`
/// and those that do not. Numeric values test `cell >= value`, categorical
/// values test `cell == value`. Every row lands in exactly one side; a row
/// too short to have `column` fails the predicate.
pub fn divide_set<'a, R: AsRef<[Value]>>(
    rows: &'a [R],
    column: ColumnIndex,
    value: &Value,
) -> (Vec<&'a R>, Vec<&'a R>) {
    rows.iter()
        .partition(|row| cell_satisfies(row.as_ref(), column, value))
}

fn cell_satisfies(row: &[Value], column: ColumnIndex, value: &Value) -> bool {
    row.get(column).map_or(false, |cell| cell.satisfies(value))
}

/// Best split found for one node.
#[derive(Debug)]
struct SplitCandidate<'a> {
    column: ColumnIndex,
    value: Value,
    gain: f64,
    true_rows: Vec<&'a [Value]>,
    false_rows: Vec<&'a [Value]>,
}

/// CART tree builder.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeBuilder {
    score: ScoreFunction,
    min_gain: f64,
    min_samples: usize,
}

impl TreeBuilder {
    /// Creates a builder with the default variance score and no stop
    /// conditions.
    pub fn new() -> Self {
        TreeBuilder {
            score: ScoreFunction::Variance,
            min_gain: DEFAULT_MIN_GAIN,
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }

    /// Creates a builder from a validated configuration.
    pub fn from_config(config: &TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(TreeBuilder {
            score: config.score,
            min_gain: config.min_gain,
            min_samples: config.min_samples,
        })
    }

    /// Sets the split score.
    pub fn score(mut self, score: ScoreFunction) -> Self {
        self.score = score;
        self
    }

    /// Sets the gain a split must strictly exceed.
    pub fn min_gain(mut self, min_gain: f64) -> Self {
        self.min_gain = min_gain;
        self
    }

    /// Sets the row count each side of a split must strictly exceed.
    pub fn min_samples(mut self, min_samples: usize) -> Self {
        self.min_samples = min_samples;
        self
    }

    /// Builds a tree from rows whose last cell is the label.
    ///
    /// Zero rows produce the empty tree. Rows of differing lengths fail with
    /// [`CartError::DimensionMismatch`].
    pub fn build<R: AsRef<[Value]>>(&self, rows: &[R]) -> Result<DecisionTree> {
        if rows.is_empty() {
            log::warn!("building from zero rows yields the empty tree");
            return Ok(DecisionTree::empty());
        }
        let width = check_dimensions(rows)?;

        let mut slots: Vec<Option<TreeNode>> = vec![None];
        let mut pending: Vec<(NodeIndex, Vec<&[Value]>)> =
            vec![(ROOT, rows.iter().map(|row| row.as_ref()).collect())];

        while let Some((index, subset)) = pending.pop() {
            match self.best_split(&subset, width - 1)? {
                Some(split) => {
                    log::debug!(
                        "node {}: split column {} at {} (gain {:.6}, {}/{} rows)",
                        index,
                        split.column,
                        split.value,
                        split.gain,
                        split.true_rows.len(),
                        split.false_rows.len()
                    );
                    let true_child = slots.len();
                    let false_child = true_child + 1;
                    slots.push(None);
                    slots.push(None);
                    slots[index] = Some(TreeNode::new_internal(
                        split.column,
                        split.value,
                        true_child,
                        false_child,
                    ));
                    pending.push((false_child, split.false_rows));
                    pending.push((true_child, split.true_rows));
                }
                None => {
                    let distribution = Distribution::from_counts(unique_counts(&subset));
                    slots[index] = Some(TreeNode::new_leaf(distribution));
                }
            }
        }

        let nodes = slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| CartError::internal(format!("node {} was never filled", i)))
            })
            .collect::<Result<Vec<_>>>()?;
        let tree = DecisionTree::from_nodes(nodes)?;
        log::info!(
            "built tree from {} rows: {} nodes, {} leaves ({} score)",
            rows.len(),
            tree.num_nodes(),
            tree.num_leaves(),
            self.score
        );
        Ok(tree)
    }

    fn best_split<'a>(
        &self,
        rows: &[&'a [Value]],
        feature_columns: usize,
    ) -> Result<Option<SplitCandidate<'a>>> {
        let current_score = self.score.evaluate(rows)?;
        let total = rows.len() as f64;

        let mut best_gain = 0.0;
        let mut best: Option<SplitCandidate<'a>> = None;

        for column in 0..feature_columns {
            for value in distinct_values(rows, column) {
                let (true_rows, false_rows): (Vec<&'a [Value]>, Vec<&'a [Value]>) = rows
                    .iter()
                    .copied()
                    .partition(|row| cell_satisfies(row, column, &value));

                let true_weight = true_rows.len() as f64 / total;
                let false_weight = false_rows.len() as f64 / total;
                let gain = current_score
                    - true_weight * self.score.evaluate(&true_rows)?
                    - false_weight * self.score.evaluate(&false_rows)?;

                if gain > best_gain
                    && true_rows.len() > self.min_samples
                    && false_rows.len() > self.min_samples
                    && gain > self.min_gain
                {
                    best_gain = gain;
                    best = Some(SplitCandidate {
                        column,
                        value,
                        gain,
                        true_rows,
                        false_rows,
                    });
                }
            }
        }

        Ok(best)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a tree with an explicit score and stop conditions.
pub fn build<R: AsRef<[Value]>>(
    rows: &[R],
    score: ScoreFunction,
    min_gain: f64,
    min_samples: usize,
) -> Result<DecisionTree> {
    TreeBuilder::new()
        .score(score)
        .min_gain(min_gain)
        .min_samples(min_samples)
        .build(rows)
}

/// Distinct values of a column in order of first appearance.
fn distinct_values(rows: &[&[Value]], column: ColumnIndex) -> Vec<Value> {
    let mut seen: HashSet<&Value> = HashSet::new();
    rows.iter()
        .filter_map(|row| row.get(column))
        .filter(|cell| seen.insert(*cell))
        .cloned()
        .collect()
}

fn check_dimensions<R: AsRef<[Value]>>(rows: &[R]) -> Result<usize> {
    let width = rows[0].as_ref().len();
    if width == 0 {
        return Err(CartError::dimension_mismatch(
            "rows with at least a label cell",
            "row 0 with 0 cells",
        ));
    }
    if let Some((i, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.as_ref().len() != width)
    {
        return Err(CartError::dimension_mismatch(
            format!("{} cells per row", width),
            format!("row {} with {} cells", i, row.as_ref().len()),
        ));
    }
    Ok(width)
}
