//! Core data types for the CART route engine.
//!
//! Cells in a dataset are either numeric or categorical. Every split
//! predicate in the crate (building, classification and route descent)
//! dispatches on the [`Value`] tag rather than inspecting cell contents.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Tree node identifier type (index into the node arena).
pub type NodeIndex = usize;

/// Column index type for identifying a cell within a row.
pub type ColumnIndex = usize;

/// A single typed cell value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Numeric cell, split with `cell >= threshold`
    Number(f64),
    /// Categorical cell, split with `cell == category`
    Category(String),
}

/// One dataset row. The last cell is the label.
pub type Row = Vec<Value>;

impl Value {
    /// Returns true if this is a numeric value.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Numeric view of the value.
    ///
    /// Categories that spell a number (`"10"`, `" 2.5 "`) are accepted, the
    /// same way label keys are read back when aggregating predictions.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Category(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Evaluates the split predicate of a node whose split value is `split`.
    ///
    /// Numeric splits test `self >= split`, categorical splits test equality.
    /// A cell whose tag differs from the split value never satisfies it.
    pub fn satisfies(&self, split: &Value) -> bool {
        match (self, split) {
            (Value::Number(cell), Value::Number(threshold)) => cell >= threshold,
            (Value::Category(cell), Value::Category(category)) => cell == category,
            _ => false,
        }
    }

    /// Parses a raw text cell: numbers become [`Value::Number`], anything
    /// else is kept verbatim as a category.
    pub fn parse_cell(raw: &str) -> Value {
        match raw.trim().parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Category(raw.to_string()),
        }
    }

    fn canonical_bits(n: f64) -> u64 {
        // +0.0 and -0.0 compare equal, so they must hash equal too
        if n == 0.0 {
            0
        } else {
            n.to_bits()
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                Self::canonical_bits(*a) == Self::canonical_bits(*b)
            }
            (Value::Category(a), Value::Category(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Number(n) => {
                0u8.hash(state);
                Self::canonical_bits(*n).hash(state);
            }
            Value::Category(s) => {
                1u8.hash(state);
                s.hash(state);
            }
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
            (Value::Category(a), Value::Category(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Category(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Category(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Category(s)
    }
}

/// Which side of a split a path took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Branch {
    /// The split predicate held
    True,
    /// The split predicate failed
    False,
}

impl Branch {
    /// Branch taken by a cell for the given split value.
    pub fn of(cell: &Value, split: &Value) -> Self {
        if cell.satisfies(split) {
            Branch::True
        } else {
            Branch::False
        }
    }

    /// Single-letter tag used in path strings.
    pub fn as_char(self) -> char {
        match self {
            Branch::True => 'T',
            Branch::False => 'F',
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
