//! Serialization formats and their detection.

use crate::core::error::{CartError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SerializationFormat {
    /// Native Rust bincode format (fast, compact)
    #[default]
    Bincode,
    /// JSON format (human-readable, portable)
    Json,
}

impl std::fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationFormat::Bincode => write!(f, "bincode"),
            SerializationFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for SerializationFormat {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bincode" | "bin" | "tree" => Ok(SerializationFormat::Bincode),
            "json" => Ok(SerializationFormat::Json),
            _ => Err(CartError::serialization(format!("Unknown format: {}", s))),
        }
    }
}

/// Detect serialization format from file extension
pub fn detect_format_from_extension(path: &Path) -> Option<SerializationFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| match ext.to_lowercase().as_str() {
            "bin" | "tree" => Some(SerializationFormat::Bincode),
            "json" => Some(SerializationFormat::Json),
            _ => None,
        })
}

/// Detect serialization format from content.
///
/// JSON envelopes always open with `{`; anything else is taken as bincode.
pub fn detect_format_from_content(data: &[u8]) -> SerializationFormat {
    match data.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => SerializationFormat::Json,
        _ => SerializationFormat::Bincode,
    }
}
