//! Model persistence.
//!
//! Trees and the attribute names they were trained with are stored in a
//! versioned envelope, as bincode (default) or JSON.

pub mod format;
pub mod model_file;

pub use format::{detect_format_from_content, detect_format_from_extension, SerializationFormat};
pub use model_file::{
    load_attributes, load_attributes_from_file, load_tree, load_tree_from_file, save_attributes,
    save_attributes_to_file, save_tree, save_tree_to_file,
};
