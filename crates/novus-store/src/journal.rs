// ABOUTME: Store for mood journal entries, newest first.
// ABOUTME: The store stamps each entry's id and date; entries are only ever added or deleted whole.

use std::sync::Arc;

use novus_core::{JournalEntry, JournalLog, NewJournalEntry};

use crate::backend::KvBackend;
use crate::persisted::{PersistHandle, PersistedStore};

#[derive(Clone)]
pub struct JournalStore {
    store: PersistedStore<JournalLog>,
}

impl JournalStore {
    pub const KEY: &'static str = "@journal_entries";

    pub fn open(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            store: PersistedStore::open(Self::KEY, backend),
        }
    }

    pub fn entries(&self) -> JournalLog {
        self.store.read()
    }

    /// Look up a single entry for detail views.
    pub fn entry(&self, id: &str) -> Option<JournalEntry> {
        self.store.with(|log| log.get(id).cloned())
    }

    /// Record a new entry and return it as stored.
    pub fn add_entry(&self, new: NewJournalEntry) -> (JournalEntry, PersistHandle) {
        let entry = JournalEntry::create(new);
        let stored = entry.clone();
        let handle = self.store.mutate(|log| log.insert(stored));
        tracing::debug!("journal entry {} added", entry.id);
        (entry, handle)
    }

    pub fn delete_entry(&self, id: &str) -> PersistHandle {
        self.store.mutate(|log| {
            if !log.remove(id) {
                tracing::debug!("journal entry {} not found for delete", id);
            }
        })
    }

    pub fn store(&self) -> &PersistedStore<JournalLog> {
        &self.store
    }
}
