use chrono::{DateTime, TimeZone, Utc};
use fyodor_rs_protocol::{InboundMessage, Snowflake};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MESSAGE_ID: AtomicU64 = AtomicU64::new(1_000_000);

/// Builder for inbound messages with test-friendly defaults.
///
/// Defaults: author 1, channel 100, not a bot, fixed creation time, and a
/// fresh message id per build.
#[derive(Clone)]
pub struct MessageBuilder {
    content: String,
    author_id: u64,
    author_is_bot: bool,
    channel_id: u64,
    message_id: Option<u64>,
    created_at: DateTime<Utc>,
}

impl MessageBuilder {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            author_id: 1,
            author_is_bot: false,
            channel_id: 100,
            message_id: None,
            created_at: Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default(),
        }
    }

    pub fn author(mut self, author_id: u64) -> Self {
        self.author_id = author_id;
        self
    }

    pub fn bot(mut self) -> Self {
        self.author_is_bot = true;
        self
    }

    pub fn channel(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn message_id(mut self, message_id: u64) -> Self {
        self.message_id = Some(message_id);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> InboundMessage {
        let message_id = self
            .message_id
            .unwrap_or_else(|| NEXT_MESSAGE_ID.fetch_add(1, Ordering::SeqCst));
        InboundMessage {
            message_id: Snowflake(message_id),
            author_id: Snowflake(self.author_id),
            author_is_bot: self.author_is_bot,
            channel_id: Snowflake(self.channel_id),
            content: self.content,
            created_at: self.created_at,
        }
    }
}
