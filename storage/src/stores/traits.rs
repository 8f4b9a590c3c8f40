use std::sync::Arc;

use async_trait::async_trait;
use types::MatchRecord;

use crate::error::StorageError;

#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Every stored record. Failures degrade to an empty list.
    async fn fetch_all(&self) -> Vec<MatchRecord>;

    /// Stores one record, returning `Ok(true)` only when the store confirms it.
    async fn append(&self, record: &MatchRecord) -> Result<bool, StorageError>;
}

#[async_trait]
impl<S: MatchStore + ?Sized> MatchStore for Arc<S> {
    async fn fetch_all(&self) -> Vec<MatchRecord> {
        (**self).fetch_all().await
    }

    async fn append(&self, record: &MatchRecord) -> Result<bool, StorageError> {
        (**self).append(record).await
    }
}
