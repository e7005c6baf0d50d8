// ABOUTME: The set of favorited quote ids, kept as an ordered list without duplicates.
// ABOUTME: Toggling flips membership; lookups against a quote collection preserve its order.

use serde::{Deserialize, Serialize};

use crate::codec::{CodecError, Persisted, from_json, to_json};
use crate::quote::Quote;

/// Quote ids the user has marked as favorites, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet(Vec<String>);

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|fav| fav == id)
    }

    /// Remove the id if present, otherwise append it. Returns true when the
    /// id is a favorite after the call.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.0.retain(|fav| fav != id);
            false
        } else {
            self.0.push(id.to_string());
            true
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Select the favorited quotes out of a catalog, keeping catalog order.
    pub fn select<'a>(&self, catalog: &'a [Quote]) -> Vec<&'a Quote> {
        catalog.iter().filter(|q| self.contains(&q.id)).collect()
    }
}

impl Persisted for FavoriteSet {
    fn encode(&self) -> Result<String, CodecError> {
        to_json(self)
    }

    fn decode(raw: &str) -> Result<Self, CodecError> {
        let ids: Vec<String> = from_json(raw)?;
        let mut set = FavoriteSet::new();
        for id in ids {
            if !set.contains(&id) {
                set.0.push(id);
            }
        }
        Ok(set)
    }
}
