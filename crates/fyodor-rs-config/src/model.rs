//! Configuration schema for Fyodor.

use directories::UserDirs;
use fyodor_rs_protocol::{ChannelId, DEFAULT_VIOLATION_EMOJI, UserId};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root config for the moderation bot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FyodorConfig {
    #[serde(default, rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Location of the record store credentials file.
    pub g_credentials_path: PathBuf,
    /// Bot authentication token for the chat platform.
    pub discord_bot_token: String,
    /// Channels whose messages are checked for repeats.
    #[serde(default)]
    pub channel_ids: Vec<ChannelId>,
    /// Users listed as ignored.
    ///
    /// Only consulted when `enforce_ignored_users` is set.
    #[serde(default)]
    pub ignored_user_ids: Vec<UserId>,
    /// Reaction attached to repeated messages.
    #[serde(default = "default_violation_reaction_emoji")]
    pub violation_reaction_emoji: String,
    /// Skip messages from `ignored_user_ids` before fingerprinting.
    #[serde(default)]
    pub enforce_ignored_users: bool,
    #[serde(default)]
    pub store: StoreConfig,
}

impl FyodorConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder(
        g_credentials_path: impl Into<PathBuf>,
        discord_bot_token: impl Into<String>,
    ) -> FyodorConfigBuilder {
        FyodorConfigBuilder::new(g_credentials_path, discord_bot_token)
    }
}

/// Builder for assembling a `FyodorConfig` in code.
#[derive(Debug, Clone)]
pub struct FyodorConfigBuilder {
    config: FyodorConfig,
}

impl FyodorConfigBuilder {
    /// Create a builder from the two required fields.
    pub fn new(
        g_credentials_path: impl Into<PathBuf>,
        discord_bot_token: impl Into<String>,
    ) -> Self {
        Self {
            config: FyodorConfig {
                schema: None,
                g_credentials_path: g_credentials_path.into(),
                discord_bot_token: discord_bot_token.into(),
                channel_ids: Vec::new(),
                ignored_user_ids: Vec::new(),
                violation_reaction_emoji: default_violation_reaction_emoji(),
                enforce_ignored_users: false,
                store: StoreConfig::default(),
            },
        }
    }

    /// Add a monitored channel.
    pub fn channel(mut self, channel_id: impl Into<ChannelId>) -> Self {
        self.config.channel_ids.push(channel_id.into());
        self
    }

    /// Add an ignored user.
    pub fn ignored_user(mut self, user_id: impl Into<UserId>) -> Self {
        self.config.ignored_user_ids.push(user_id.into());
        self
    }

    /// Override the violation reaction.
    pub fn violation_reaction_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.config.violation_reaction_emoji = emoji.into();
        self
    }

    /// Toggle enforcement of the ignored-user list.
    pub fn enforce_ignored_users(mut self, enforce: bool) -> Self {
        self.config.enforce_ignored_users = enforce;
        self
    }

    /// Replace the record store configuration.
    pub fn store(mut self, store: StoreConfig) -> Self {
        self.config.store = store;
        self
    }

    /// Finalize and return the built `FyodorConfig`.
    pub fn build(self) -> FyodorConfig {
        self.config
    }
}

fn default_violation_reaction_emoji() -> String {
    DEFAULT_VIOLATION_EMOJI.to_string()
}

/// Record store settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StoreConfig {
    /// Root directory for record collections.
    #[serde(default)]
    pub path: Option<String>,
}

impl StoreConfig {
    /// Resolve the store root, falling back to `~/.fyodor/records`.
    pub fn resolve_root(&self) -> PathBuf {
        if let Some(path) = self.path.as_ref() {
            return PathBuf::from(path);
        }
        UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".fyodor").join("records"))
            .unwrap_or_else(|| PathBuf::from(".fyodor/records"))
    }
}

#[cfg(test)]
mod tests {
    use super::{FyodorConfig, StoreConfig};
    use fyodor_rs_protocol::Snowflake;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn builder_applies_defaults() {
        let config = FyodorConfig::builder("creds.json", "token")
            .channel(10u64)
            .build();
        assert_eq!(config.violation_reaction_emoji, "💩");
        assert_eq!(config.channel_ids, vec![Snowflake(10)]);
        assert!(config.ignored_user_ids.is_empty());
        assert!(!config.enforce_ignored_users);
    }

    #[test]
    fn explicit_store_path_wins() {
        let store = StoreConfig {
            path: Some("/tmp/records".to_string()),
        };
        assert_eq!(store.resolve_root(), PathBuf::from("/tmp/records"));
    }
}
