//! Label distributions held by leaves and produced by inference.

use crate::core::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mapping from label to (possibly fractional) count.
///
/// Leaves hold whole counts. Missing-value inference blends distributions,
/// which yields fractional weights. Labels are unique and kept in the order
/// they were first added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    entries: Vec<(Value, f64)>,
}

impl Distribution {
    /// Creates an empty distribution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a distribution from whole label counts.
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (Value, usize)>,
    {
        let mut distribution = Self::new();
        for (label, count) in counts {
            distribution.add(label, count as f64);
        }
        distribution
    }

    /// Adds `amount` to the label's count, inserting the label if absent.
    pub fn add(&mut self, label: Value, amount: f64) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, count)) => *count += amount,
            None => self.entries.push((label, amount)),
        }
    }

    /// Count recorded for a label.
    pub fn get(&self, label: &Value) -> Option<f64> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, count)| *count)
    }

    /// Sum of all counts.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no label has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(label, count)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, f64)> + '_ {
        self.entries.iter().map(|(label, count)| (label, *count))
    }

    /// Returns a copy with every count multiplied by `weight`.
    pub fn scaled(&self, weight: f64) -> Self {
        Distribution {
            entries: self
                .entries
                .iter()
                .map(|(label, count)| (label.clone(), count * weight))
                .collect(),
        }
    }

    /// Adds every count of `other` into this distribution.
    pub fn merge(&mut self, other: &Distribution) {
        for (label, count) in other.iter() {
            self.add(label.clone(), count);
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (label, count)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", label, count)?;
        }
        write!(f, "}}")
    }
}
