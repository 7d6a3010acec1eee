//! Core infrastructure module for the CART route engine.
//!
//! This module provides the foundational pieces every other module builds
//! on: the typed cell model, crate-wide constants and error handling.
//!
//! - [`types`]: [`Value`](types::Value), rows, branches and index types
//! - [`constants`]: defaults and anchor column names
//! - [`error`]: the [`CartError`](error::CartError) enum and `Result` alias
//!
//! ```rust
//! use cart_route::core::{
//!     types::{Branch, Value},
//!     constants::ANCHOR_AGE,
//! };
//!
//! let cell = Value::Number(31.0);
//! assert_eq!(Branch::of(&cell, &Value::Number(30.0)), Branch::True);
//! assert_eq!(ANCHOR_AGE, "Age");
//! ```

pub mod constants;
pub mod error;
pub mod types;

pub use constants::*;
pub use error::{CartError, Result};
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static CORE_INIT: Once = Once::new();
static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize the core module.
///
/// Sets up `env_logger` (defaulting `RUST_LOG` to `info` when unset). Safe
/// to call more than once; later calls are no-ops.
pub fn initialize_core() -> Result<()> {
    CORE_INIT.call_once(|| {
        initialize_logging();
        CORE_INITIALIZED.store(true, Ordering::SeqCst);
        log::info!("cart-route {} initialized", CART_ROUTE_VERSION);
    });
    Ok(())
}

/// Check if the core module is initialized
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::SeqCst)
}

fn initialize_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    // Ignore failure: the host application may already own the logger
    let _ = env_logger::Builder::from_env(env).try_init();
}
