//! Configuration management for the CART route engine.
//!
//! Tree building parameters and the anchor column set live in
//! [`TreeConfig`], which can be built fluently, loaded from `.json`/`.toml`
//! files, or overridden from `CART_*` environment variables.

pub mod core;

pub use self::core::{TreeConfig, TreeConfigBuilder};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "cart-route.toml";
