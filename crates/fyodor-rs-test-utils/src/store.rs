use async_trait::async_trait;
use fyodor_rs_store::{MessageRecord, NewMessageRecord, RecordStore, StoreError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Record store kept in memory, in insertion order.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: Mutex<Vec<MessageRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all stored records.
    pub fn records(&self) -> Vec<MessageRecord> {
        self.records.lock().clone()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find_by_hash(
        &self,
        hash: &str,
        limit: usize,
    ) -> Result<Vec<MessageRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .iter()
            .filter(|record| record.hash == hash)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert(&self, record: NewMessageRecord) -> Result<MessageRecord, StoreError> {
        let record = record.with_id(Uuid::new_v4());
        self.records.lock().push(record.clone());
        Ok(record)
    }
}

/// Store that fails reads, writes, or a fixed number of upcoming writes.
pub struct FailingRecordStore {
    inner: InMemoryRecordStore,
    fail_reads: bool,
    failing_writes: AtomicUsize,
    insert_attempts: AtomicUsize,
}

impl FailingRecordStore {
    fn with_modes(fail_reads: bool, failing_writes: usize) -> Self {
        Self {
            inner: InMemoryRecordStore::new(),
            fail_reads,
            failing_writes: AtomicUsize::new(failing_writes),
            insert_attempts: AtomicUsize::new(0),
        }
    }

    /// Every lookup fails.
    pub fn failing_reads() -> Self {
        Self::with_modes(true, 0)
    }

    /// Every insert fails.
    pub fn failing_writes() -> Self {
        Self::with_modes(false, usize::MAX)
    }

    /// The next `count` inserts fail, later ones succeed.
    pub fn fail_next_writes(count: usize) -> Self {
        Self::with_modes(false, count)
    }

    /// Number of insert calls seen, successful or not.
    pub fn insert_attempts(&self) -> usize {
        self.insert_attempts.load(Ordering::SeqCst)
    }

    /// Records that were stored successfully.
    pub fn records(&self) -> Vec<MessageRecord> {
        self.inner.records()
    }
}

#[async_trait]
impl RecordStore for FailingRecordStore {
    async fn find_by_hash(
        &self,
        hash: &str,
        limit: usize,
    ) -> Result<Vec<MessageRecord>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Unavailable("simulated read failure".to_string()));
        }
        self.inner.find_by_hash(hash, limit).await
    }

    async fn insert(&self, record: NewMessageRecord) -> Result<MessageRecord, StoreError> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        let should_fail = self
            .failing_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| {
                remaining.checked_sub(1)
            })
            .is_ok();
        if should_fail {
            return Err(StoreError::Unavailable("simulated write failure".to_string()));
        }
        self.inner.insert(record).await
    }
}
