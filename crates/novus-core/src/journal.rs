// ABOUTME: Mood journal entries written by daily check-ins and reflections.
// ABOUTME: Entry ids and dates are assigned when an entry is created; the log is newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::codec::{CodecError, Persisted, from_json, to_json};

/// How the user felt at check-in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Neutral,
    Excited,
    Tired,
}

/// A recorded journal entry. Never edited after creation.
///
/// Ids are opaque text. New entries get a ULID; logs written by earlier
/// clients carry millisecond timestamps and load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub date: DateTime<Utc>,
    pub mood: Mood,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
}

/// The caller-supplied part of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJournalEntry {
    pub mood: Mood,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub quote_id: Option<String>,
}

impl NewJournalEntry {
    pub fn new(mood: Mood) -> Self {
        Self {
            mood,
            topics: Vec::new(),
            note: String::new(),
            quote_id: None,
        }
    }

    pub fn topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn quote_id(mut self, quote_id: impl Into<String>) -> Self {
        self.quote_id = Some(quote_id.into());
        self
    }
}

impl JournalEntry {
    /// Stamp a new entry with a fresh ULID and the current time.
    pub fn create(new: NewJournalEntry) -> Self {
        Self {
            id: Ulid::new().to_string(),
            date: Utc::now(),
            mood: new.mood,
            topics: new.topics,
            note: new.note,
            quote_id: new.quote_id,
        }
    }
}

/// All journal entries, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JournalLog(Vec<JournalEntry>);

impl JournalLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entry from caller data and put it at the front of the log.
    pub fn add(&mut self, new: NewJournalEntry) -> JournalEntry {
        let entry = JournalEntry::create(new);
        self.insert(entry.clone());
        entry
    }

    /// Put an already created entry at the front of the log.
    pub fn insert(&mut self, entry: JournalEntry) {
        self.0.insert(0, entry);
    }

    /// Remove the entry with the given id. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|e| e.id != id);
        self.0.len() != before
    }

    pub fn get(&self, id: &str) -> Option<&JournalEntry> {
        self.0.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Persisted for JournalLog {
    fn encode(&self) -> Result<String, CodecError> {
        to_json(self)
    }

    fn decode(raw: &str) -> Result<Self, CodecError> {
        from_json(raw)
    }
}
