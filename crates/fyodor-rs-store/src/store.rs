//! Record store interface.

use crate::error::StoreError;
use crate::model::{MessageRecord, NewMessageRecord};
use async_trait::async_trait;

#[async_trait]
/// Document store holding one record per processed message.
///
/// Records are append-only: stores never update or delete them.
pub trait RecordStore: Send + Sync {
    /// Return up to `limit` records whose hash equals `hash`, oldest first.
    async fn find_by_hash(
        &self,
        hash: &str,
        limit: usize,
    ) -> Result<Vec<MessageRecord>, StoreError>;

    /// Report whether any record has the given hash.
    async fn any_with_hash(&self, hash: &str) -> Result<bool, StoreError> {
        Ok(!self.find_by_hash(hash, 1).await?.is_empty())
    }

    /// Insert a record, assigning it a fresh identifier.
    async fn insert(&self, record: NewMessageRecord) -> Result<MessageRecord, StoreError>;
}
