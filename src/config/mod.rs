//! Configuration for the `pfx` tool
//!
//! Provides types and loading for `pfx.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::{find_config, find_config_from, load_config, merge_cli_overrides, CliOverrides, ConfigError};
pub use schema::*;
