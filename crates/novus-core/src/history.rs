// ABOUTME: Bounded most-recent-first log of quotes the user has been shown.
// ABOUTME: Re-recording a quote moves it to the front; entries beyond the bound are evicted.

use serde::{Deserialize, Serialize};

use crate::codec::{CodecError, Persisted, from_json, to_json};
use crate::quote::Quote;

/// Maximum number of quotes retained in the history log.
pub const HISTORY_LIMIT: usize = 50;

/// Quote snapshots ordered most recent first, at most `HISTORY_LIMIT` long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog(Vec<Quote>);

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any earlier occurrence of the quote's id, put the quote first,
    /// and evict the oldest entries past the bound.
    pub fn record(&mut self, quote: Quote) {
        self.0.retain(|q| q.id != quote.id);
        self.0.insert(0, quote);
        self.0.truncate(HISTORY_LIMIT);
    }

    pub fn entries(&self) -> &[Quote] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Persisted for HistoryLog {
    fn encode(&self) -> Result<String, CodecError> {
        to_json(self)
    }

    fn decode(raw: &str) -> Result<Self, CodecError> {
        let mut quotes: Vec<Quote> = from_json(raw)?;
        quotes.truncate(HISTORY_LIMIT);
        Ok(Self(quotes))
    }
}
