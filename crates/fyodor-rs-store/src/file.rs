//! File-backed record store storing JSONL records per project.

use crate::credentials::StoreCredentials;
use crate::error::StoreError;
use crate::model::{MessageRecord, NewMessageRecord};
use crate::store::RecordStore;
use async_trait::async_trait;
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Name of the collection file holding message records.
const MESSAGES_COLLECTION: &str = "messages.jsonl";

/// Record store appending JSON lines to `<root>/<project_id>/messages.jsonl`.
///
/// Hashes of stored records are indexed in memory when the store is opened,
/// so existence checks never touch the file. Lines that fail to decode are
/// logged and skipped.
#[derive(Debug)]
pub struct FileRecordStore {
    /// Collection file path.
    path: PathBuf,
    /// Known hashes; the lock also serializes appends from this process.
    hashes: Mutex<HashSet<String>>,
}

/// Projection used when scanning for hash matches.
#[derive(Deserialize)]
struct HashOnly {
    hash: String,
}

impl FileRecordStore {
    /// Open (creating if needed) the collection for the given project.
    pub fn open(
        root: impl AsRef<Path>,
        credentials: &StoreCredentials,
    ) -> Result<Self, StoreError> {
        let dir = root.as_ref().join(&credentials.project_id);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(MESSAGES_COLLECTION);
        let mut hashes = HashSet::new();
        scan_lines(&path, |line_number, line| {
            if let Some(record) = decode_line::<HashOnly>(&path, line_number, line) {
                hashes.insert(record.hash);
            }
            true
        })?;
        info!(
            "opened file record store (path={}, hashes={})",
            path.display(),
            hashes.len()
        );
        Ok(Self {
            path,
            hashes: Mutex::new(hashes),
        })
    }

    /// Path of the collection file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every readable record in insertion order.
    pub fn load_all(&self) -> Result<Vec<MessageRecord>, StoreError> {
        let mut records = Vec::new();
        scan_lines(&self.path, |line_number, line| {
            records.extend(decode_line::<MessageRecord>(&self.path, line_number, line));
            true
        })?;
        Ok(records)
    }
}

/// Visit each non-blank line with its 1-based number until `visit` returns false.
fn scan_lines(
    path: &Path,
    mut visit: impl FnMut(usize, &str) -> bool,
) -> Result<(), StoreError> {
    if !path.exists() {
        return Ok(());
    }
    let reader = BufReader::new(File::open(path)?);
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if !visit(index + 1, &line) {
            break;
        }
    }
    Ok(())
}

fn decode_line<T: DeserializeOwned>(path: &Path, line_number: usize, line: &str) -> Option<T> {
    match serde_json::from_str(line) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                "skipping unreadable record (path={}, line={}, error={})",
                path.display(),
                line_number,
                err
            );
            None
        }
    }
}

/// Whether a non-empty file lacks a trailing newline, as after a torn write.
fn missing_trailing_newline(file: &mut File) -> Result<bool, StoreError> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn find_by_hash(
        &self,
        hash: &str,
        limit: usize,
    ) -> Result<Vec<MessageRecord>, StoreError> {
        let mut matches = Vec::new();
        if limit == 0 || !self.hashes.lock().contains(hash) {
            return Ok(matches);
        }
        scan_lines(&self.path, |line_number, line| {
            let Some(probe) = decode_line::<HashOnly>(&self.path, line_number, line) else {
                return true;
            };
            if probe.hash == hash {
                matches.extend(decode_line::<MessageRecord>(&self.path, line_number, line));
            }
            matches.len() < limit
        })?;
        debug!("hash lookup (hash={}, returned={})", hash, matches.len());
        Ok(matches)
    }

    async fn any_with_hash(&self, hash: &str) -> Result<bool, StoreError> {
        Ok(self.hashes.lock().contains(hash))
    }

    async fn insert(&self, record: NewMessageRecord) -> Result<MessageRecord, StoreError> {
        let record = record.with_id(Uuid::new_v4());
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        {
            let mut hashes = self.hashes.lock();
            let mut file = OpenOptions::new()
                .create(true)
                .read(true)
                .append(true)
                .open(&self.path)?;
            if missing_trailing_newline(&mut file)? {
                warn!(
                    "collection ends with a partial line, starting a new one (path={})",
                    self.path.display()
                );
                line.insert(0, '\n');
            }
            file.write_all(line.as_bytes())?;
            hashes.insert(record.hash.clone());
        }
        debug!(
            "stored message record (id={}, author_id={}, is_violation={})",
            record.id, record.author_id, record.is_violation
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::FileRecordStore;
    use std::fs::OpenOptions;
    use std::io::Write;
    use crate::{NewMessageRecord, RecordStore, StoreCredentials};
    use chrono::{TimeZone, Utc};
    use fyodor_rs_protocol::Snowflake;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn credentials() -> StoreCredentials {
        StoreCredentials::from_json(r#"{"project_id":"test-project"}"#).expect("credentials")
    }

    fn new_record(hash: &str, is_violation: bool) -> NewMessageRecord {
        NewMessageRecord {
            author_id: Snowflake(7),
            content: format!("content for {hash}"),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            hash: hash.to_string(),
            is_violation,
        }
    }

    #[tokio::test]
    async fn empty_store_has_no_matches() {
        let temp = tempdir().expect("tempdir");
        let store = FileRecordStore::open(temp.path(), &credentials()).expect("store");
        assert!(!store.any_with_hash("abc").await.expect("lookup"));
        assert!(store.find_by_hash("abc", 10).await.expect("find").is_empty());
    }

    #[tokio::test]
    async fn lookup_matches_hash_only() {
        let temp = tempdir().expect("tempdir");
        let store = FileRecordStore::open(temp.path(), &credentials()).expect("store");
        store.insert(new_record("aaa", false)).await.expect("insert a");
        store.insert(new_record("bbb", false)).await.expect("insert b");
        store.insert(new_record("aaa", true)).await.expect("insert a2");

        assert!(store.any_with_hash("aaa").await.expect("lookup"));
        assert!(!store.any_with_hash("ccc").await.expect("lookup"));

        let matches = store.find_by_hash("aaa", 10).await.expect("find");
        assert_eq!(matches.len(), 2);
        assert!(!matches[0].is_violation);
        assert!(matches[1].is_violation);

        let limited = store.find_by_hash("aaa", 1).await.expect("find");
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn records_persist_across_reopen() {
        let temp = tempdir().expect("tempdir");
        let inserted = {
            let store = FileRecordStore::open(temp.path(), &credentials()).expect("store");
            store.insert(new_record("aaa", false)).await.expect("insert")
        };
        let reopened = FileRecordStore::open(temp.path(), &credentials()).expect("reopen");
        assert!(reopened.path().ends_with("test-project/messages.jsonl"));
        let records = reopened.load_all().expect("load");
        assert_eq!(records, vec![inserted]);
    }

    #[tokio::test]
    async fn inserts_assign_distinct_ids() {
        let temp = tempdir().expect("tempdir");
        let store = FileRecordStore::open(temp.path(), &credentials()).expect("store");
        let first = store.insert(new_record("aaa", false)).await.expect("insert");
        let second = store.insert(new_record("aaa", true)).await.expect("insert");
        assert!(first.id != second.id);
    }

    #[tokio::test]
    async fn reopened_store_reports_earlier_hashes() {
        let temp = tempdir().expect("tempdir");
        {
            let store = FileRecordStore::open(temp.path(), &credentials()).expect("store");
            store.insert(new_record("aaa", false)).await.expect("insert a");
            store.insert(new_record("bbb", false)).await.expect("insert b");
        }
        let reopened = FileRecordStore::open(temp.path(), &credentials()).expect("reopen");
        assert!(reopened.any_with_hash("aaa").await.expect("lookup"));
        assert!(reopened.any_with_hash("bbb").await.expect("lookup"));
        assert!(!reopened.any_with_hash("ccc").await.expect("lookup"));
        assert_eq!(reopened.find_by_hash("bbb", 10).await.expect("find").len(), 1);
    }

    #[tokio::test]
    async fn torn_tail_does_not_block_later_records() {
        let temp = tempdir().expect("tempdir");
        let store = FileRecordStore::open(temp.path(), &credentials()).expect("store");
        store.insert(new_record("aaa", false)).await.expect("insert a");
        {
            let mut file = OpenOptions::new()
                .append(true)
                .open(store.path())
                .expect("open");
            file.write_all(br#"{"id":"0000"#).expect("torn write");
        }

        store.insert(new_record("bbb", false)).await.expect("insert b");
        assert!(store.any_with_hash("aaa").await.expect("lookup a"));
        assert!(store.any_with_hash("bbb").await.expect("lookup b"));
        assert!(!store.any_with_hash("zzz").await.expect("lookup z"));
        assert_eq!(store.find_by_hash("bbb", 10).await.expect("find").len(), 1);

        let hashes: Vec<String> = store
            .load_all()
            .expect("load")
            .into_iter()
            .map(|record| record.hash)
            .collect();
        assert_eq!(hashes, vec!["aaa".to_string(), "bbb".to_string()]);

        let reopened = FileRecordStore::open(temp.path(), &credentials()).expect("reopen");
        assert!(reopened.any_with_hash("bbb").await.expect("lookup b"));
        assert!(!reopened.any_with_hash("zzz").await.expect("lookup z"));
    }
}
