//! Config file loading and discovery.
//!
//! A config is read from JSON5, checked against the schema (unknown keys,
//! field types, required fields), decoded with serde and finally validated
//! for invariants serde cannot express.

mod schema;


use crate::{ConfigError, FyodorConfig};
use directories::UserDirs;
use log::{debug, info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename.
pub const DEFAULT_CONFIG_FILE: &str = "fyodor.json5";
/// Default config directory under the working directory or home.
pub const DEFAULT_CONFIG_DIR: &str = ".fyodor";

/// Search the default config locations, returning the first existing file.
///
/// Order: `<cwd>/fyodor.json5`, `<cwd>/.fyodor/fyodor.json5`,
/// `~/.fyodor/fyodor.json5`.
pub fn discover_config_path(cwd: impl AsRef<Path>) -> Result<PathBuf, ConfigError> {
    let candidates = default_candidates(cwd.as_ref());
    for candidate in &candidates {
        if candidate.is_file() {
            debug!("discovered config (path={})", candidate.display());
            return Ok(candidate.clone());
        }
        debug!("config candidate missing (path={})", candidate.display());
    }
    let searched = candidates
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Err(ConfigError::NotFound(searched))
}

fn default_candidates(cwd: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![
        cwd.join(DEFAULT_CONFIG_FILE),
        cwd.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILE),
    ];
    if let Some(dirs) = UserDirs::new() {
        candidates.push(
            dirs.home_dir()
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILE),
        );
    }
    candidates
}

impl FyodorConfig {
    /// Load a config from a path.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading config from path: {}", path.display());
        let contents = fs::read_to_string(path)?;
        let value: Value = json5::from_str(&contents)?;
        config_from_value(value, &path.display().to_string())
    }

    /// Load a config from JSON5 contents.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        config_from_value(value, "config")
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.g_credentials_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidField {
                path: "g_credentials_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.discord_bot_token.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                path: "discord_bot_token".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.violation_reaction_emoji.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                path: "violation_reaction_emoji".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.channel_ids.is_empty() {
            warn!("no channel_ids configured; every message will be skipped");
        }
        if !self.ignored_user_ids.is_empty() && !self.enforce_ignored_users {
            warn!(
                "ignored_user_ids is set but not enforced (count={}); set enforce_ignored_users to apply it",
                self.ignored_user_ids.len()
            );
        }
        Ok(())
    }
}

fn config_from_value(value: Value, label: &str) -> Result<FyodorConfig, ConfigError> {
    schema::validate_config_schema(&value, label)?;
    let config: FyodorConfig = serde_json::from_value(value)?;
    config.validate()?;
    info!(
        "config loaded (channels={}, ignored_users={}, enforce_ignored_users={})",
        config.channel_ids.len(),
        config.ignored_user_ids.len(),
        config.enforce_ignored_users
    );
    Ok(config)
}
