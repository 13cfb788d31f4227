//! Configuration model and loading for Fyodor.
//!
//! The config file is JSON5, validated against a fixed schema before it is
//! decoded into [`FyodorConfig`]. Required fields are checked up front so a
//! bad file aborts startup with a message naming the field.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Config file discovery helpers.
pub use loader::{DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE, discover_config_path};
/// Configuration schema models.
pub use model::*;
