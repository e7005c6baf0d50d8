// ABOUTME: Store for the most-recent-first log of quotes shown to the user.
// ABOUTME: Adding de-duplicates by id and keeps at most fifty entries.

use std::sync::Arc;

use novus_core::{HistoryLog, Quote};

use crate::backend::KvBackend;
use crate::persisted::{PersistHandle, PersistedStore};

#[derive(Clone)]
pub struct HistoryStore {
    store: PersistedStore<HistoryLog>,
}

impl HistoryStore {
    pub const KEY: &'static str = "userHistory";

    pub fn open(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            store: PersistedStore::open(Self::KEY, backend),
        }
    }

    pub fn history(&self) -> HistoryLog {
        self.store.read()
    }

    pub fn add_to_history(&self, quote: Quote) -> PersistHandle {
        self.store.mutate(|log| log.record(quote))
    }

    pub fn clear_history(&self) -> PersistHandle {
        self.store.reset()
    }

    pub fn store(&self) -> &PersistedStore<HistoryLog> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use novus_core::HISTORY_LIMIT;

    fn quote(id: &str) -> Quote {
        Quote::new(id, "Keep going.", "Anon", "Discipline")
    }

    fn ids(history: &HistoryStore) -> Vec<String> {
        history
            .history()
            .entries()
            .iter()
            .map(|q| q.id.clone())
            .collect()
    }

    async fn open(backend: Arc<MemoryBackend>) -> HistoryStore {
        let history = HistoryStore::open(backend);
        history.store().ready().await;
        history
    }

    #[tokio::test]
    async fn re_adding_moves_quote_to_front() {
        let history = open(Arc::new(MemoryBackend::new())).await;
        let _ = history.add_to_history(quote("A"));
        let _ = history.add_to_history(quote("B"));
        assert_eq!(ids(&history), vec!["B", "A"]);

        history.add_to_history(quote("A")).await.unwrap();
        assert_eq!(ids(&history), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn fifty_one_quotes_leave_fifty() {
        let backend = Arc::new(MemoryBackend::new());
        let history = open(backend.clone()).await;

        let mut last = PersistHandle::default();
        for i in 0..=HISTORY_LIMIT {
            last = history.add_to_history(quote(&format!("q{i}")));
        }
        last.await.unwrap();

        let current = ids(&history);
        assert_eq!(current.len(), HISTORY_LIMIT);
        assert_eq!(current[0], format!("q{HISTORY_LIMIT}"));
        assert!(!current.contains(&"q0".to_string()));

        let reopened = open(backend).await;
        assert_eq!(ids(&reopened), current);
    }

    #[tokio::test]
    async fn clear_removes_stored_log() {
        let backend = Arc::new(MemoryBackend::new());
        let history = open(backend.clone()).await;
        history.add_to_history(quote("A")).await.unwrap();

        history.clear_history().await.unwrap();

        assert!(history.history().is_empty());
        assert!(backend.get(HistoryStore::KEY).await.unwrap().is_none());
    }
}
