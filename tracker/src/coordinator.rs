use std::sync::atomic::{AtomicBool, Ordering};

use storage::MatchStore;
use tokio::sync::RwLock;
use types::{deck_pool, name_pool, MatchRecord};

use crate::notify::{Notification, Notifier};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored, and the record list has been reloaded.
    Saved,
    /// Not stored; the record list is unchanged.
    Failed,
    /// Another submission was still in flight, nothing was sent.
    Busy,
}

/// Owns the list of known records and relays submissions to storage.
///
/// The list is only ever replaced wholesale by what the store returns; a
/// saved record shows up after the reload, never through a local insert.
pub struct ViewCoordinator<S, N> {
    store: S,
    notifier: N,
    records: RwLock<Vec<MatchRecord>>,
    busy: AtomicBool,
}

impl<S: MatchStore, N: Notifier> ViewCoordinator<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            records: RwLock::new(Vec::new()),
            busy: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Replaces the record list with whatever the store returns, which is
    /// empty when the store could not be read.
    pub async fn load(&self) -> usize {
        log::info!("Loading match results");
        let records = self.store.fetch_all().await;
        let count = records.len();
        *self.records.write().await = records;
        log::debug!("Total results: {count}");
        count
    }

    pub async fn records(&self) -> Vec<MatchRecord> {
        self.records.read().await.clone()
    }

    pub async fn name_pool(&self) -> Vec<String> {
        name_pool(&self.records.read().await)
    }

    pub async fn deck_pool(&self) -> Vec<String> {
        deck_pool(&self.records.read().await)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub async fn submit(&self, record: MatchRecord) -> SubmitOutcome {
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            log::warn!("Ignoring submission while another is in flight: {record}");
            return SubmitOutcome::Busy;
        };

        log::info!("Submitting match: {record}");
        match self.store.append(&record).await {
            Ok(true) => {
                self.notifier
                    .notify(Notification::success("Match result saved successfully!"));
                self.load().await;
                SubmitOutcome::Saved
            }
            Ok(false) => {
                self.notifier.notify(Notification::error(
                    "Failed to save match result - check console for details",
                ));
                SubmitOutcome::Failed
            }
            Err(e) => {
                log::error!("Error saving result: {e}");
                self.notifier
                    .notify(Notification::error(format!("Failed to save: {e}")));
                SubmitOutcome::Failed
            }
        }
    }
}

/// Holds the busy flag for one submission and clears it when dropped, so the
/// flag cannot stay set after an error or a cancelled future.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_guard_is_exclusive_and_released_on_drop() {
        let flag = AtomicBool::new(false);
        let guard = BusyGuard::acquire(&flag);
        assert!(guard.is_some());
        assert!(BusyGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert!(BusyGuard::acquire(&flag).is_some());
    }
}
