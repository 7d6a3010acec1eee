//! In-memory row set with its column names.

use crate::core::error::{CartError, Result};
use crate::core::types::{Row, Value};
use serde::{Deserialize, Serialize};

/// Named rows. Every row has one cell per attribute; the last attribute
/// names the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    attributes: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Creates a dataset, rejecting rows whose length differs from the
    /// attribute count.
    pub fn new(attributes: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != attributes.len())
        {
            return Err(CartError::dimension_mismatch(
                format!("{} cells", attributes.len()),
                format!("{} cells in row {}", row.len(), i),
            ));
        }
        Ok(Dataset { attributes, rows })
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name of the label column.
    pub fn label_name(&self) -> Option<&str> {
        self.attributes.last().map(String::as_str)
    }

    /// Position of a named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a == name)
    }

    /// Cells of one column, in row order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &Value> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_shape() {
        let ds = Dataset::new(
            vec!["Foot".into(), "Wage".into()],
            vec![
                vec![Value::from("Left"), Value::Number(10.0)],
                vec![Value::from("Right"), Value::Number(20.0)],
            ],
        )
        .unwrap();
        assert_eq!(ds.num_rows(), 2);
        assert_eq!(ds.num_columns(), 2);
        assert_eq!(ds.label_name(), Some("Wage"));
        assert_eq!(ds.column_index("Foot"), Some(0));
        assert_eq!(ds.column(1).count(), 2);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Dataset::new(
            vec!["Foot".into(), "Wage".into()],
            vec![vec![Value::Number(1.0)]],
        )
        .unwrap_err();
        assert!(matches!(err, CartError::DimensionMismatch { .. }));
    }
}
