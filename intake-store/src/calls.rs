use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::error::StoreResult;
use crate::json_file::{ensure_parent_dir, load_or_empty, persist_atomic};
use crate::records::CallRecord;

/// Result of an insert-or-merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// `true` when an existing record with the same session id was merged
    pub updated: bool,
    /// Number of records held after the operation
    pub total_count: usize,
}

/// Durable mapping from session id to call record.
///
/// Implementations serialize `upsert` so that concurrent first events for
/// one session never produce two records, and return only once the change
/// is persisted.
#[async_trait]
pub trait CallStore: Send + Sync {
    async fn upsert(&self, record: CallRecord) -> StoreResult<UpsertOutcome>;

    /// All records in storage order
    async fn list_all(&self) -> Vec<CallRecord>;

    async fn get(&self, session_id: &str) -> Option<CallRecord>;
}

/// Merge into the record with the same session id, or append.
/// Merged records keep their position.
pub fn upsert_into(records: &mut Vec<CallRecord>, incoming: CallRecord) -> UpsertOutcome {
    let updated = match records
        .iter_mut()
        .find(|existing| existing.session_id == incoming.session_id)
    {
        Some(existing) => {
            existing.merge_from(incoming);
            true
        }
        None => {
            records.push(incoming);
            false
        }
    };

    UpsertOutcome {
        updated,
        total_count: records.len(),
    }
}

/// Call records kept as a JSON array in a single file
pub struct JsonFileCallStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileCallStore {
    /// Open the store at `path`, creating its parent directory. The file
    /// itself is created on first write.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        ensure_parent_dir(&path).await?;
        debug!(path = %path.display(), "Opened call record store");
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CallStore for JsonFileCallStore {
    async fn upsert(&self, record: CallRecord) -> StoreResult<UpsertOutcome> {
        let _guard = self.write_lock.lock().await;

        let mut records: Vec<CallRecord> = load_or_empty(&self.path).await;
        let outcome = upsert_into(&mut records, record);
        persist_atomic(&self.path, &records).await?;

        Ok(outcome)
    }

    async fn list_all(&self) -> Vec<CallRecord> {
        load_or_empty(&self.path).await
    }

    async fn get(&self, session_id: &str) -> Option<CallRecord> {
        self.list_all()
            .await
            .into_iter()
            .find(|record| record.session_id == session_id)
    }
}

/// Volatile store for tests and ephemeral deployments
#[derive(Default)]
pub struct InMemoryCallStore {
    records: RwLock<Vec<CallRecord>>,
}

impl InMemoryCallStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CallStore for InMemoryCallStore {
    async fn upsert(&self, record: CallRecord) -> StoreResult<UpsertOutcome> {
        let mut records = self.records.write().await;
        Ok(upsert_into(&mut records, record))
    }

    async fn list_all(&self) -> Vec<CallRecord> {
        self.records.read().await.clone()
    }

    async fn get(&self, session_id: &str) -> Option<CallRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.session_id == session_id)
            .cloned()
    }
}
