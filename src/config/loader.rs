//! Configuration loading and discovery for `pfx.toml`

use super::schema::PfxConfig;
use crate::parser::HeuristicProfile;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "pfx.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse pfx.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub profile: Option<HeuristicProfile>,
    pub strict: Option<bool>,
    pub seed: Option<u64>,
}

/// Find pfx.toml by walking up from the current working directory.
///
/// Falls back to `$XDG_CONFIG_HOME/popfx/pfx.toml` (or
/// `~/.config/popfx/pfx.toml`).
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find pfx.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("popfx").join(CONFIG_FILE);
    config_path.exists().then_some(config_path)
}

/// Find pfx.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pfx.toml file.
///
/// An explicit path must exist. Without one, the discovered file is used,
/// or the defaults when there is none.
pub fn load_config(path: Option<&Path>) -> Result<PfxConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            debug!(path = %p.display(), "loading config");
            load_config_file(&p)
        }
        None => Ok(PfxConfig::default()),
    }
}

fn load_config_file(path: &Path) -> Result<PfxConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PfxConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PfxConfig, overrides: &CliOverrides) {
    if let Some(profile) = overrides.profile {
        config.parser.profile = profile;
    }
    if let Some(strict) = overrides.strict {
        config.check.strict = strict;
    }
    if let Some(seed) = overrides.seed {
        config.check.seed = Some(seed);
    }
}
