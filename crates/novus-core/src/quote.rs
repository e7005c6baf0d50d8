// ABOUTME: Quote record as supplied by the bundled quote dataset.
// ABOUTME: Quotes are read-only here; history keeps full snapshots, favorites keep only ids.

use serde::{Deserialize, Serialize};

/// A single quote from the external dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub author: String,
    pub category: String,
}

impl Quote {
    pub fn new(id: &str, text: &str, author: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            author: author.to_string(),
            category: category.to_string(),
        }
    }
}
