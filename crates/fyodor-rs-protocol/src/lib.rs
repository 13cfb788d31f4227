//! Wire types exchanged with the chat platform integration.

mod reactor;
mod snowflake;

pub use reactor::{ReactionError, Reactor};
pub use snowflake::{ParseSnowflakeError, Snowflake};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a platform user.
pub type UserId = Snowflake;
/// Identifier of a platform channel.
pub type ChannelId = Snowflake;
/// Identifier of a platform message.
pub type MessageId = Snowflake;

/// Default reaction attached to repeated messages.
pub const DEFAULT_VIOLATION_EMOJI: &str = "💩";

/// Inbound chat message as delivered by the platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InboundMessage {
    /// Message identifier.
    pub message_id: MessageId,
    /// Author identifier.
    pub author_id: UserId,
    /// Whether the author account is flagged as a bot.
    #[serde(default)]
    pub author_is_bot: bool,
    /// Channel the message was posted in.
    pub channel_id: ChannelId,
    /// Raw message text.
    #[serde(default)]
    pub content: String,
    /// Original creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Events delivered by the platform integration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "type", content = "payload")]
pub enum PlatformEvent {
    /// Session established; carries the bot's own account id.
    Ready { user_id: UserId },
    /// A message was created in a visible channel.
    Message(InboundMessage),
}

/// Reaction the platform integration should attach to a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReactionAction {
    /// Channel holding the message.
    pub channel_id: ChannelId,
    /// Message to react to.
    pub message_id: MessageId,
    /// Emoji to attach.
    pub emoji: String,
}
