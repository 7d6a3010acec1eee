//! Tree and attribute-name persistence.
//!
//! Both payloads are wrapped in an envelope carrying a format version and a
//! creation timestamp. Loading a tree re-validates the arena before handing
//! it back.

use crate::core::constants::MODEL_FORMAT_VERSION;
use crate::core::error::{CartError, Result};
use crate::io::format::{
    detect_format_from_content, detect_format_from_extension, SerializationFormat,
};
use crate::tree::tree::DecisionTree;
use chrono::{DateTime, Utc};
use log::info;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    format_version: u32,
    created_at: DateTime<Utc>,
    payload: T,
}

fn encode<T: Serialize>(payload: &T, format: SerializationFormat) -> Result<Vec<u8>> {
    let envelope = Envelope {
        format_version: MODEL_FORMAT_VERSION,
        created_at: Utc::now(),
        payload,
    };
    let bytes = match format {
        SerializationFormat::Bincode => bincode::serialize(&envelope)?,
        SerializationFormat::Json => serde_json::to_vec_pretty(&envelope)?,
    };
    Ok(bytes)
}

fn decode<T: DeserializeOwned>(data: &[u8], format: SerializationFormat) -> Result<T> {
    let envelope: Envelope<T> = match format {
        SerializationFormat::Bincode => bincode::deserialize(data)?,
        SerializationFormat::Json => serde_json::from_slice(data)?,
    };
    if envelope.format_version != MODEL_FORMAT_VERSION {
        return Err(CartError::serialization(format!(
            "File version mismatch: expected {}, found {}",
            MODEL_FORMAT_VERSION, envelope.format_version
        )));
    }
    log::debug!("decoded {} payload created at {}", format, envelope.created_at);
    Ok(envelope.payload)
}

fn format_for_save(path: &Path) -> SerializationFormat {
    detect_format_from_extension(path).unwrap_or_default()
}

fn read_with_format(path: &Path) -> Result<(Vec<u8>, SerializationFormat)> {
    let data = std::fs::read(path)?;
    let format =
        detect_format_from_extension(path).unwrap_or_else(|| detect_format_from_content(&data));
    Ok((data, format))
}

/// Serializes a tree.
pub fn save_tree(tree: &DecisionTree, format: SerializationFormat) -> Result<Vec<u8>> {
    encode(tree, format)
}

/// Deserializes and validates a tree.
pub fn load_tree(data: &[u8], format: SerializationFormat) -> Result<DecisionTree> {
    let tree: DecisionTree = decode(data, format)?;
    tree.validate()?;
    Ok(tree)
}

/// Writes a tree to `path`; `.json` selects JSON, anything else bincode.
pub fn save_tree_to_file<P: AsRef<Path>>(tree: &DecisionTree, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = format_for_save(path);
    std::fs::write(path, save_tree(tree, format)?)?;
    info!(
        "saved tree with {} nodes to {} ({})",
        tree.num_nodes(),
        path.display(),
        format
    );
    Ok(())
}

/// Reads a tree written by [`save_tree_to_file`].
pub fn load_tree_from_file<P: AsRef<Path>>(path: P) -> Result<DecisionTree> {
    let path = path.as_ref();
    let (data, format) = read_with_format(path)?;
    let tree = load_tree(&data, format)?;
    info!("loaded tree with {} nodes from {}", tree.num_nodes(), path.display());
    Ok(tree)
}

/// Serializes the column names a tree was trained with.
pub fn save_attributes(attributes: &[String], format: SerializationFormat) -> Result<Vec<u8>> {
    encode(&attributes, format)
}

/// Deserializes column names.
pub fn load_attributes(data: &[u8], format: SerializationFormat) -> Result<Vec<String>> {
    decode(data, format)
}

pub fn save_attributes_to_file<P: AsRef<Path>>(attributes: &[String], path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, save_attributes(attributes, format_for_save(path))?)?;
    info!("saved {} attribute names to {}", attributes.len(), path.display());
    Ok(())
}

pub fn load_attributes_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let (data, format) = read_with_format(path)?;
    let attributes = load_attributes(&data, format)?;
    info!("loaded {} attribute names from {}", attributes.len(), path.display());
    Ok(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Value;
    use crate::tree::distribution::Distribution;
    use crate::tree::node::TreeNode;
    use tempfile::TempDir;

    fn sample_tree() -> DecisionTree {
        DecisionTree::from_nodes(vec![
            TreeNode::new_internal(0, Value::Number(5.0), 1, 2),
            TreeNode::new_leaf(Distribution::from_counts(vec![(Value::Number(10.0), 2)])),
            TreeNode::new_leaf(Distribution::from_counts(vec![(Value::from("gold"), 1)])),
        ])
        .unwrap()
    }

    #[test]
    fn test_tree_bytes_round_trip() {
        let tree = sample_tree();
        for format in [SerializationFormat::Bincode, SerializationFormat::Json] {
            let bytes = save_tree(&tree, format).unwrap();
            assert_eq!(load_tree(&bytes, format).unwrap(), tree);
        }
    }

    #[test]
    fn test_empty_tree_round_trip() {
        let bytes = save_tree(&DecisionTree::empty(), SerializationFormat::Bincode).unwrap();
        assert!(load_tree(&bytes, SerializationFormat::Bincode).unwrap().is_empty());
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let json =
            r#"{"format_version": 99, "created_at": "2024-01-01T00:00:00Z", "payload": ["Age"]}"#;
        assert!(matches!(
            load_attributes(json.as_bytes(), SerializationFormat::Json),
            Err(CartError::Serialization { .. })
        ));
    }

    #[test]
    fn test_corrupt_tree_rejected() {
        let json = r#"{"format_version": 1, "created_at": "2024-01-01T00:00:00Z",
            "payload": {"nodes": [{"Internal": {"column": 0, "split_value": {"Number": 1.0},
            "true_child": 5, "false_child": 6}}]}}"#;
        assert!(load_tree(json.as_bytes(), SerializationFormat::Json).is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let tree = sample_tree();
        let attributes = vec!["Foot".to_string(), "Wage".to_string()];

        for name in ["wage.tree", "wage.json", "wage.dat"] {
            let path = dir.path().join(name);
            save_tree_to_file(&tree, &path).unwrap();
            assert_eq!(load_tree_from_file(&path).unwrap(), tree);
        }

        let path = dir.path().join("columns.json");
        save_attributes_to_file(&attributes, &path).unwrap();
        assert_eq!(load_attributes_from_file(&path).unwrap(), attributes);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_tree_from_file(dir.path().join("absent.tree")).unwrap_err();
        assert!(err.is_recoverable());
    }
}
