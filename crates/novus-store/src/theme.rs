// ABOUTME: Store for the selected presentation theme id.
// ABOUTME: Unknown ids are rejected before any change; resolving an id to colors is left to the caller's lookup.

use std::sync::Arc;

use novus_core::{ThemeId, ValidationError};

use crate::backend::KvBackend;
use crate::persisted::{PersistHandle, PersistedStore};

/// Maps a theme id to the presentation layer's theme value.
pub trait ThemeLookup {
    type Theme;

    fn resolve(&self, id: ThemeId) -> Self::Theme;
}

impl<F, T> ThemeLookup for F
where
    F: Fn(ThemeId) -> T,
{
    type Theme = T;

    fn resolve(&self, id: ThemeId) -> T {
        self(id)
    }
}

#[derive(Clone)]
pub struct ThemeStore {
    store: PersistedStore<ThemeId>,
}

impl ThemeStore {
    pub const KEY: &'static str = "@theme_pref";

    pub fn open(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            store: PersistedStore::open(Self::KEY, backend),
        }
    }

    pub fn current_theme_id(&self) -> ThemeId {
        self.store.read()
    }

    /// Switch to the theme with the given id. Unknown ids leave the current
    /// theme in place.
    pub fn set_theme_id(&self, id: &str) -> Result<PersistHandle, ValidationError> {
        match id.parse::<ThemeId>() {
            Ok(theme) => Ok(self.set_theme(theme)),
            Err(e) => {
                tracing::debug!("rejected theme change: {}", e);
                Err(e)
            }
        }
    }

    pub fn set_theme(&self, theme: ThemeId) -> PersistHandle {
        self.store.mutate(|current| *current = theme)
    }

    /// Resolve the current theme through the presentation layer's table.
    pub fn theme<L: ThemeLookup>(&self, lookup: &L) -> L::Theme {
        lookup.resolve(self.current_theme_id())
    }

    pub fn store(&self) -> &PersistedStore<ThemeId> {
        &self.store
    }
}
