//! Message record model persisted by stores.

use chrono::{DateTime, Utc};
use fyodor_rs_protocol::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted record of one processed message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageRecord {
    /// Identifier assigned by the store on insert.
    pub id: Uuid,
    /// Author of the original message.
    pub author_id: UserId,
    /// Normalized message text.
    pub content: String,
    /// Creation timestamp of the original message.
    pub created_at: DateTime<Utc>,
    /// Hex SHA-256 fingerprint of `content`.
    pub hash: String,
    /// Whether an earlier record with the same hash existed at insert time.
    pub is_violation: bool,
}

/// Record contents before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessageRecord {
    pub author_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub hash: String,
    pub is_violation: bool,
}

impl NewMessageRecord {
    /// Attach an identifier, producing the persisted form.
    pub fn with_id(self, id: Uuid) -> MessageRecord {
        MessageRecord {
            id,
            author_id: self.author_id,
            content: self.content,
            created_at: self.created_at,
            hash: self.hash,
            is_violation: self.is_violation,
        }
    }
}
