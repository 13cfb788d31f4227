//! Pre-processing gate deciding which messages are checked at all.

use fyodor_rs_config::FyodorConfig;
use fyodor_rs_protocol::{ChannelId, InboundMessage, UserId};
use std::collections::HashSet;
use std::fmt;

/// Why a message was not fingerprinted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Authored by the bot's own account.
    OwnMessage,
    /// Authored by an account flagged as a bot.
    BotAuthor,
    /// Raw content was empty.
    EmptyContent,
    /// Channel is not in the allow-list.
    ChannelNotMonitored,
    /// Author is on the enforced ignore list.
    IgnoredUser,
    /// Nothing remained after normalization.
    EmptyAfterNormalization,
}

impl SkipReason {
    /// Stable snake_case label for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::OwnMessage => "own_message",
            SkipReason::BotAuthor => "bot_author",
            SkipReason::EmptyContent => "empty_content",
            SkipReason::ChannelNotMonitored => "channel_not_monitored",
            SkipReason::IgnoredUser => "ignored_user",
            SkipReason::EmptyAfterNormalization => "empty_after_normalization",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static moderation settings derived from config once at startup.
#[derive(Debug, Clone)]
pub struct ModerationPolicy {
    channels: HashSet<ChannelId>,
    ignored_users: HashSet<UserId>,
    enforce_ignored_users: bool,
    reaction_emoji: String,
}

impl ModerationPolicy {
    /// Build the policy from a validated config.
    pub fn from_config(config: &FyodorConfig) -> Self {
        Self {
            channels: config.channel_ids.iter().copied().collect(),
            ignored_users: config.ignored_user_ids.iter().copied().collect(),
            enforce_ignored_users: config.enforce_ignored_users,
            reaction_emoji: config.violation_reaction_emoji.clone(),
        }
    }

    /// Emoji attached to repeated messages.
    pub fn reaction_emoji(&self) -> &str {
        &self.reaction_emoji
    }

    /// Whether a channel is monitored.
    pub fn monitors(&self, channel_id: ChannelId) -> bool {
        self.channels.contains(&channel_id)
    }

    /// Return the reason to skip `message`, or `None` to process it.
    ///
    /// `self_user_id` is unknown until the platform reports ready; until then
    /// only the bot flag identifies bot authors.
    pub fn screen(
        &self,
        message: &InboundMessage,
        self_user_id: Option<UserId>,
    ) -> Option<SkipReason> {
        if self_user_id == Some(message.author_id) {
            return Some(SkipReason::OwnMessage);
        }
        if message.author_is_bot {
            return Some(SkipReason::BotAuthor);
        }
        if message.content.is_empty() {
            return Some(SkipReason::EmptyContent);
        }
        if !self.monitors(message.channel_id) {
            return Some(SkipReason::ChannelNotMonitored);
        }
        if self.enforce_ignored_users && self.ignored_users.contains(&message.author_id) {
            return Some(SkipReason::IgnoredUser);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{ModerationPolicy, SkipReason};
    use fyodor_rs_config::FyodorConfig;
    use fyodor_rs_protocol::Snowflake;
    use fyodor_rs_test_utils::MessageBuilder;
    use pretty_assertions::assert_eq;

    fn policy(enforce: bool) -> ModerationPolicy {
        let config = FyodorConfig::builder("creds.json", "token")
            .channel(100u64)
            .ignored_user(5u64)
            .enforce_ignored_users(enforce)
            .build();
        ModerationPolicy::from_config(&config)
    }

    #[test]
    fn accepts_regular_message_in_monitored_channel() {
        let message = MessageBuilder::new("hello").channel(100).author(1).build();
        assert_eq!(policy(false).screen(&message, Some(Snowflake(999))), None);
    }

    #[test]
    fn skips_own_and_bot_messages() {
        let own = MessageBuilder::new("hello").channel(100).author(999).build();
        assert_eq!(
            policy(false).screen(&own, Some(Snowflake(999))),
            Some(SkipReason::OwnMessage)
        );
        let bot = MessageBuilder::new("hello").channel(100).bot().build();
        assert_eq!(
            policy(false).screen(&bot, None),
            Some(SkipReason::BotAuthor)
        );
    }

    #[test]
    fn skips_empty_content_and_unmonitored_channels() {
        let empty = MessageBuilder::new("").channel(100).build();
        assert_eq!(
            policy(false).screen(&empty, None),
            Some(SkipReason::EmptyContent)
        );
        let elsewhere = MessageBuilder::new("hello").channel(200).build();
        assert_eq!(
            policy(false).screen(&elsewhere, None),
            Some(SkipReason::ChannelNotMonitored)
        );
    }

    #[test]
    fn ignored_users_apply_only_when_enforced() {
        let message = MessageBuilder::new("hello").channel(100).author(5).build();
        assert_eq!(policy(false).screen(&message, None), None);
        assert_eq!(
            policy(true).screen(&message, None),
            Some(SkipReason::IgnoredUser)
        );
    }

    #[test]
    fn reports_configured_emoji() {
        assert_eq!(policy(false).reaction_emoji(), "💩");
    }
}
