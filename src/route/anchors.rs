//! Anchor features: columns whose branch is pinned by a known value during
//! route enumeration.

use crate::config::TreeConfig;
use crate::core::constants::{ANCHOR_AGE, ANCHOR_HEIGHT, ANCHOR_WEIGHT};
use crate::core::error::{CartError, Result};
use crate::core::types::{Branch, Value};
use std::collections::HashMap;

/// Lookup from column name to the anchor value that decides its branch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Anchors {
    values: HashMap<String, Value>,
}

impl Anchors {
    /// No anchors: every split is explored.
    pub fn new() -> Self {
        Self::default()
    }

    /// The demographic anchor set: `Age`, `Height(CM)` and `Weight(KG)`.
    pub fn demographic(age: f64, height: f64, weight: f64) -> Self {
        Self::new()
            .with_anchor(ANCHOR_AGE, Value::Number(age))
            .with_anchor(ANCHOR_HEIGHT, Value::Number(height))
            .with_anchor(ANCHOR_WEIGHT, Value::Number(weight))
    }

    /// Pins `column` to `value`, replacing any earlier anchor for it.
    pub fn with_anchor<S: Into<String>>(mut self, column: S, value: Value) -> Self {
        self.values.insert(column.into(), value);
        self
    }

    /// Pairs the configured anchor columns with `values`, position by
    /// position.
    pub fn from_config(config: &TreeConfig, values: &[Value]) -> Result<Self> {
        if config.anchor_columns.len() != values.len() {
            return Err(CartError::dimension_mismatch(
                format!("{} anchor values", config.anchor_columns.len()),
                format!("{} anchor values", values.len()),
            ));
        }
        Ok(config
            .anchor_columns
            .iter()
            .zip(values)
            .fold(Self::new(), |anchors, (column, value)| {
                anchors.with_anchor(column.as_str(), value.clone())
            }))
    }

    /// Anchor value for a column, if the column is anchored.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Number of anchored columns.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no column is anchored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Branch an anchored column takes at a split, using the same predicate
    /// as building. `None` means the column is free, either because it has
    /// no anchor or because the anchor and the split value differ in kind.
    pub fn resolve(&self, column: &str, split_value: &Value) -> Option<Branch> {
        self.get(column)
            .filter(|anchor| anchor.is_numeric() == split_value.is_numeric())
            .map(|anchor| Branch::of(anchor, split_value))
    }
}
