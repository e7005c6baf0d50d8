// ABOUTME: Persistence layer for novus, keeping client state in a durable key-value backend.
// ABOUTME: Provides backends, the generic persisted store, its specializations, and store composition.

pub mod backend;
pub mod favorites;
pub mod history;
pub mod journal;
pub mod persisted;
pub mod registry;
pub mod testing;
pub mod theme;
pub mod user;

pub use backend::{BackendError, BackendKind, KvBackend, open_backend};
pub use favorites::FavoritesStore;
pub use history::HistoryStore;
pub use journal::JournalStore;
pub use persisted::{Lifecycle, PersistHandle, PersistedStore, StoreError, StoreState};
pub use registry::Stores;
pub use theme::{ThemeLookup, ThemeStore};
pub use user::{OnboardingStore, UserStore};
