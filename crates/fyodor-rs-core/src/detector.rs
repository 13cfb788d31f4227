//! Duplicate detection against the record store.

use crate::error::CoreError;
use crate::fingerprint::fingerprint;
use chrono::{DateTime, Utc};
use fyodor_rs_protocol::UserId;
use fyodor_rs_store::{MessageRecord, NewMessageRecord, RecordStore};
use log::debug;

/// Outcome of checking one normalized message.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Record written for this message.
    pub record: MessageRecord,
    /// True when an earlier record already carried the same fingerprint.
    pub is_violation: bool,
}

/// Fingerprint `normalized`, look up earlier occurrences, then record it.
///
/// The lookup happens strictly before the insert, so a record never counts
/// as its own duplicate. Two concurrent calls with the same text may both
/// see no match; the store offers no read-then-write transaction.
pub async fn detect_duplicate(
    store: &dyn RecordStore,
    normalized: String,
    author_id: UserId,
    created_at: DateTime<Utc>,
) -> Result<Verdict, CoreError> {
    let hash = fingerprint(&normalized);
    let is_violation = store.any_with_hash(&hash).await?;
    debug!("fingerprint checked (hash={}, seen={})", hash, is_violation);
    let record = store
        .insert(NewMessageRecord {
            author_id,
            content: normalized,
            created_at,
            hash,
            is_violation,
        })
        .await?;
    Ok(Verdict {
        record,
        is_violation,
    })
}
