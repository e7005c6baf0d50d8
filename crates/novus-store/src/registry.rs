// ABOUTME: Composition root that builds every client store once over a shared backend.
// ABOUTME: Claims each storage key, starts every load in a fixed order, and hands out one aggregate handle.

use std::collections::HashSet;
use std::sync::Arc;

use crate::backend::KvBackend;
use crate::favorites::FavoritesStore;
use crate::history::HistoryStore;
use crate::journal::JournalStore;
use crate::persisted::{Lifecycle, StoreError};
use crate::theme::ThemeStore;
use crate::user::{OnboardingStore, UserStore};

/// Tracks which backend keys are owned by a store, so no two stores ever
/// write the same key.
#[derive(Debug, Default)]
struct KeyRegistry {
    claimed: HashSet<&'static str>,
}

impl KeyRegistry {
    fn claim(&mut self, key: &'static str) -> Result<(), StoreError> {
        if !self.claimed.insert(key) {
            return Err(StoreError::DuplicateKey(key.to_string()));
        }
        Ok(())
    }
}

/// Every client store, constructed once and shared by cloning.
///
/// Clones refer to the same underlying stores. Consumers receive a `Stores`
/// (or one of its fields) explicitly instead of looking stores up globally.
#[derive(Clone)]
pub struct Stores {
    pub user: UserStore,
    pub onboarding: OnboardingStore,
    pub favorites: FavoritesStore,
    pub history: HistoryStore,
    pub journal: JournalStore,
    pub theme: ThemeStore,
}

impl Stores {
    /// Storage keys in construction order.
    pub const KEYS: [&'static str; 6] = [
        UserStore::KEY,
        OnboardingStore::KEY,
        FavoritesStore::KEY,
        HistoryStore::KEY,
        JournalStore::KEY,
        ThemeStore::KEY,
    ];

    /// Build every store over `backend` and start loading each of them.
    /// Returns immediately; reads observe defaults until `ready` resolves.
    /// Must be called within a tokio runtime.
    pub fn open(backend: Arc<dyn KvBackend>) -> Result<Self, StoreError> {
        let mut registry = KeyRegistry::default();

        // The user store opens its profile and then the onboarding flag.
        registry.claim(UserStore::KEY)?;
        registry.claim(OnboardingStore::KEY)?;
        let user = UserStore::open(Arc::clone(&backend));
        let onboarding = user.onboarding().clone();

        registry.claim(FavoritesStore::KEY)?;
        let favorites = FavoritesStore::open(Arc::clone(&backend));

        registry.claim(HistoryStore::KEY)?;
        let history = HistoryStore::open(Arc::clone(&backend));

        registry.claim(JournalStore::KEY)?;
        let journal = JournalStore::open(Arc::clone(&backend));

        registry.claim(ThemeStore::KEY)?;
        let theme = ThemeStore::open(backend);

        tracing::info!("opened {} stores", Self::KEYS.len());

        Ok(Self {
            user,
            onboarding,
            favorites,
            history,
            journal,
            theme,
        })
    }

    /// Open every store and wait for all initial loads.
    pub async fn open_ready(backend: Arc<dyn KvBackend>) -> Result<Self, StoreError> {
        let stores = Self::open(backend)?;
        stores.ready().await;
        Ok(stores)
    }

    /// Wait until every store has finished its initial load.
    pub async fn ready(&self) {
        tokio::join!(
            self.user.store().ready(),
            self.onboarding.store().ready(),
            self.favorites.store().ready(),
            self.history.store().ready(),
            self.journal.store().ready(),
            self.theme.store().ready(),
        );
        tracing::info!("all stores ready");
    }

    /// Lifecycle of each store, keyed by storage key, in construction order.
    pub fn lifecycles(&self) -> [(&'static str, Lifecycle); 6] {
        [
            (UserStore::KEY, self.user.store().lifecycle()),
            (OnboardingStore::KEY, self.onboarding.store().lifecycle()),
            (FavoritesStore::KEY, self.favorites.store().lifecycle()),
            (HistoryStore::KEY, self.history.store().lifecycle()),
            (JournalStore::KEY, self.journal.store().lifecycle()),
            (ThemeStore::KEY, self.theme.store().lifecycle()),
        ]
    }
}
