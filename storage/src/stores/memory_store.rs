use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use async_trait::async_trait;
use types::MatchRecord;

use super::MatchStore;
use crate::StorageError;

/// How an [`InMemoryStore`] answers `append`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppendBehavior {
    #[default]
    Accept,
    Reject,
    Fail(String),
}

/// Store that keeps records in memory and assigns sequential ids, used where
/// no endpoint is available.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Mutex<Vec<MatchRecord>>,
    behavior: Mutex<AppendBehavior>,
    fetches: AtomicUsize,
    appends: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<MatchRecord>) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    pub fn set_append_behavior(&self, behavior: AppendBehavior) {
        *self.behavior.lock().unwrap_or_else(|e| e.into_inner()) = behavior;
    }

    pub fn stored(&self) -> Vec<MatchRecord> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn append_count(&self) -> usize {
        self.appends.load(Ordering::SeqCst)
    }

    fn insert(&self, mut record: MatchRecord) {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        record.id = Some((records.len() + 1).to_string());
        records.push(record);
    }
}

#[async_trait]
impl MatchStore for InMemoryStore {
    async fn fetch_all(&self) -> Vec<MatchRecord> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.stored()
    }

    async fn append(&self, record: &MatchRecord) -> Result<bool, StorageError> {
        self.appends.fetch_add(1, Ordering::SeqCst);
        let behavior = self
            .behavior
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match behavior {
            AppendBehavior::Accept => {
                self.insert(record.clone());
                Ok(true)
            }
            AppendBehavior::Reject => Ok(false),
            AppendBehavior::Fail(reason) => Err(StorageError::Rejected(reason)),
        }
    }
}
