// ABOUTME: Store for the user's favorite quote ids.
// ABOUTME: Toggling flips membership; membership queries read the in-memory set.

use std::sync::Arc;

use novus_core::{FavoriteSet, Quote};

use crate::backend::KvBackend;
use crate::persisted::{PersistHandle, PersistedStore};

#[derive(Clone)]
pub struct FavoritesStore {
    store: PersistedStore<FavoriteSet>,
}

impl FavoritesStore {
    pub const KEY: &'static str = "@favorites";

    pub fn open(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            store: PersistedStore::open(Self::KEY, backend),
        }
    }

    pub fn favorites(&self) -> FavoriteSet {
        self.store.read()
    }

    pub fn toggle_favorite(&self, id: &str) -> PersistHandle {
        self.store.mutate(|set| {
            set.toggle(id);
        })
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.store.with(|set| set.contains(id))
    }

    /// The favorited quotes in `catalog`, in catalog order.
    pub fn favorite_quotes(&self, catalog: &[Quote]) -> Vec<Quote> {
        self.store
            .with(|set| set.select(catalog).into_iter().cloned().collect())
    }

    pub fn store(&self) -> &PersistedStore<FavoriteSet> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    async fn open(backend: Arc<MemoryBackend>) -> FavoritesStore {
        let favorites = FavoritesStore::open(backend);
        favorites.store().ready().await;
        favorites
    }

    #[tokio::test]
    async fn toggle_twice_restores_original_state() {
        let backend = Arc::new(MemoryBackend::new());
        let favorites = open(backend.clone()).await;
        favorites.toggle_favorite("q1").await.unwrap();
        let before = favorites.favorites();

        assert!(!favorites.is_favorite("q2"));
        let _ = favorites.toggle_favorite("q2");
        assert!(favorites.is_favorite("q2"));
        favorites.toggle_favorite("q2").await.unwrap();
        assert!(!favorites.is_favorite("q2"));

        assert_eq!(favorites.favorites(), before);
        assert_eq!(
            backend.get(FavoritesStore::KEY).await.unwrap().as_deref(),
            Some(r#"["q1"]"#)
        );
    }

    #[tokio::test]
    async fn favorite_quotes_resolve_against_catalog() {
        let favorites = open(Arc::new(MemoryBackend::new())).await;
        let catalog = vec![
            Quote::new("1", "Begin anywhere.", "John Cage", "Growth"),
            Quote::new("2", "Stay close to anything that makes you glad you are alive.", "Hafiz", "Joy"),
        ];

        let _ = favorites.toggle_favorite("2");
        let _ = favorites.toggle_favorite("missing");

        let resolved = favorites.favorite_quotes(&catalog);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].author, "Hafiz");
    }

    #[tokio::test]
    async fn favorites_survive_reopen() {
        let backend = Arc::new(MemoryBackend::new());
        {
            let favorites = open(backend.clone()).await;
            favorites.toggle_favorite("a").await.unwrap();
            favorites.toggle_favorite("b").await.unwrap();
        }

        let favorites = open(backend).await;
        assert_eq!(favorites.favorites().ids(), &["a", "b"]);
    }
}
