//! Impurity and variance scores used to rank candidate splits.
//!
//! All scores read only the label (last) cell of each row. Rows are taken
//! generically as anything that derefs to a cell slice, so the builder can
//! score borrowed partitions without cloning.

use crate::core::error::{CartError, Result};
use crate::core::types::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Split quality measure used by the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreFunction {
    /// Gini impurity of the label distribution
    Gini,
    /// Shannon entropy (base 2) of the label distribution
    Entropy,
    /// Population variance of the numeric label
    Variance,
}

impl Default for ScoreFunction {
    fn default() -> Self {
        ScoreFunction::Variance
    }
}

impl ScoreFunction {
    /// Scores a row set.
    pub fn evaluate<R: AsRef<[Value]>>(&self, rows: &[R]) -> Result<f64> {
        match self {
            ScoreFunction::Gini => Ok(gini_impurity(rows)),
            ScoreFunction::Entropy => Ok(entropy(rows)),
            ScoreFunction::Variance => variance(rows),
        }
    }
}

impl fmt::Display for ScoreFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreFunction::Gini => write!(f, "gini"),
            ScoreFunction::Entropy => write!(f, "entropy"),
            ScoreFunction::Variance => write!(f, "variance"),
        }
    }
}

impl FromStr for ScoreFunction {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gini" | "giniimpurity" | "gini_impurity" => Ok(ScoreFunction::Gini),
            "entropy" => Ok(ScoreFunction::Entropy),
            "variance" | "var" => Ok(ScoreFunction::Variance),
            other => Err(CartError::invalid_parameter(
                "score",
                other,
                "expected one of gini, entropy, variance",
            )),
        }
    }
}

/// Returns the label cell of a row, if the row has any cells.
pub fn label_of<R: AsRef<[Value]>>(row: &R) -> Option<&Value> {
    row.as_ref().last()
}

/// Counts each distinct label, in order of first appearance.
pub fn unique_counts<R: AsRef<[Value]>>(rows: &[R]) -> Vec<(Value, usize)> {
    let mut slots: HashMap<&Value, usize> = HashMap::new();
    let mut counts: Vec<(Value, usize)> = Vec::new();
    for label in rows.iter().filter_map(label_of) {
        match slots.get(label) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(label, counts.len());
                counts.push((label.clone(), 1));
            }
        }
    }
    counts
}

/// Probability that a randomly drawn label is mislabelled when labelled at
/// random from the set's own distribution: `Σ_{k1≠k2} p(k1)·p(k2)`.
pub fn gini_impurity<R: AsRef<[Value]>>(rows: &[R]) -> f64 {
    let total = rows.len() as f64;
    let counts = unique_counts(rows);
    let mut impurity = 0.0;
    for (i, (_, c1)) in counts.iter().enumerate() {
        let p1 = *c1 as f64 / total;
        for (j, (_, c2)) in counts.iter().enumerate() {
            if i != j {
                impurity += p1 * (*c2 as f64 / total);
            }
        }
    }
    impurity
}

/// `−Σ p(k)·log2(p(k))` over the label distribution.
pub fn entropy<R: AsRef<[Value]>>(rows: &[R]) -> f64 {
    let total = rows.len() as f64;
    unique_counts(rows)
        .iter()
        .map(|(_, count)| {
            let p = *count as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Population variance of the label column; `0.0` for an empty set.
///
/// Fails with [`CartError::NonNumericLabel`] if a label cannot be read as a
/// number.
pub fn variance<R: AsRef<[Value]>>(rows: &[R]) -> Result<f64> {
    if rows.is_empty() {
        return Ok(0.0);
    }
    let data = rows
        .iter()
        .filter_map(label_of)
        .map(|label| {
            label
                .as_f64()
                .ok_or_else(|| CartError::non_numeric_label(label.to_string()))
        })
        .collect::<Result<Vec<f64>>>()?;
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    Ok(data.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n)
}
