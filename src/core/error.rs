//! Error handling and error types for the CART route engine.
//!
//! Every failure in the crate is surfaced synchronously through
//! [`CartError`]. The core is deterministic, so none of the tree errors are
//! worth retrying: the same input always produces the same failure.

use std::io;
use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum CartError {
    /// Classification, route enumeration or rendering hit the empty tree
    #[error("Empty tree node: the tree was built from zero rows")]
    EmptyTreeNode,

    /// An operation that needs rows was given none
    #[error("Empty input: {context}")]
    EmptyInput { context: String },

    /// An observation is shorter than the column a node reads, or a node
    /// column has no attribute name
    #[error("Feature index mismatch: index {index}, length {length}")]
    FeatureIndexMismatch { index: usize, length: usize },

    /// Ragged dataset rows
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// `select_route` was given an empty path list
    #[error("No route found: the path list is empty")]
    NoRouteFound,

    /// A distribution whose counts sum to zero reached the aggregator
    #[error("Malformed leaf distribution: total count is {total}")]
    MalformedLeafDistribution { total: f64 },

    /// A label that must be numeric was categorical
    #[error("Non-numeric label: {value}")]
    NonNumericLabel { value: String },

    /// Range synthesis met a categorical split value
    #[error("Non-numeric threshold for column {column}: {value}")]
    NonNumericThreshold { column: String, value: String },

    /// An unparsable path string or percentage
    #[error("Malformed route: {message}")]
    MalformedRoute { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Model serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// CSV parsing errors
    #[cfg(feature = "csv")]
    #[error("CSV parsing error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// Bincode serialization errors
    #[error("Bincode error: {source}")]
    Bincode {
        #[from]
        source: bincode::Error,
    },

    /// TOML parsing errors
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },

    /// Broken arena invariants (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Type alias for Results using CartError
pub type Result<T> = std::result::Result<T, CartError>;

impl CartError {
    /// Create an empty input error
    pub fn empty_input<S: Into<String>>(context: S) -> Self {
        CartError::EmptyInput {
            context: context.into(),
        }
    }

    /// Create a feature index mismatch error
    pub fn feature_index_mismatch(index: usize, length: usize) -> Self {
        CartError::FeatureIndexMismatch { index, length }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        CartError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a non-numeric label error
    pub fn non_numeric_label<S: Into<String>>(value: S) -> Self {
        CartError::NonNumericLabel {
            value: value.into(),
        }
    }

    /// Create a malformed route error
    pub fn malformed_route<S: Into<String>>(message: S) -> Self {
        CartError::MalformedRoute {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        CartError::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        CartError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        CartError::Serialization {
            message: message.into(),
        }
    }

    /// Create an internal error (should be used sparingly)
    pub fn internal<S: Into<String>>(message: S) -> Self {
        CartError::Internal {
            message: message.into(),
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Only I/O failures can succeed on a second attempt.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CartError::IO { .. })
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            CartError::EmptyTreeNode => "empty_tree_node",
            CartError::EmptyInput { .. } => "empty_input",
            CartError::FeatureIndexMismatch { .. } => "feature_index_mismatch",
            CartError::DimensionMismatch { .. } => "dimension_mismatch",
            CartError::NoRouteFound => "no_route_found",
            CartError::MalformedLeafDistribution { .. } => "malformed_leaf_distribution",
            CartError::NonNumericLabel { .. } => "non_numeric_label",
            CartError::NonNumericThreshold { .. } => "non_numeric_threshold",
            CartError::MalformedRoute { .. } => "malformed_route",
            CartError::Config { .. } => "config",
            CartError::InvalidParameter { .. } => "invalid_parameter",
            CartError::Serialization { .. } => "serialization",
            CartError::IO { .. } => "io",
            #[cfg(feature = "csv")]
            CartError::Csv { .. } => "csv",
            CartError::Json { .. } => "json",
            CartError::Bincode { .. } => "bincode",
            CartError::Toml { .. } => "toml",
            CartError::Internal { .. } => "internal",
        }
    }
}

/// Returns early with the given error if the condition does not hold.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err.into());
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CartError::config("test configuration error");
        assert_eq!(err.category(), "config");
        assert!(!err.is_recoverable());

        let err = CartError::feature_index_mismatch(4, 3);
        assert_eq!(err.category(), "feature_index_mismatch");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = CartError::feature_index_mismatch(7, 5);
        let message = err.to_string();
        assert!(message.contains("index 7"));
        assert!(message.contains("length 5"));

        let err = CartError::MalformedLeafDistribution { total: 0.0 };
        assert!(err.to_string().contains("total count is 0"));
    }

    #[test]
    fn test_parameter_errors() {
        let err = CartError::invalid_parameter("min_gain", "-0.5", "must be non-negative");
        assert_eq!(err.category(), "invalid_parameter");
        assert!(err.to_string().contains("min_gain = -0.5"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: CartError = io_err.into();
        assert!(matches!(err, CartError::IO { .. }));
        assert_eq!(err.category(), "io");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_ensure_macro() {
        fn check(len: usize) -> Result<()> {
            ensure!(len > 0, CartError::NoRouteFound);
            Ok(())
        }
        assert!(check(1).is_ok());
        assert!(matches!(check(0), Err(CartError::NoRouteFound)));
    }
}
