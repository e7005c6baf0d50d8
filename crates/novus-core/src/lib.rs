// ABOUTME: Core library for novus, containing the persisted domain types and their codecs.
// ABOUTME: Defines profile, favorites, history, journal, and theme values shared by the store layer.

pub mod codec;
pub mod error;
pub mod favorites;
pub mod history;
pub mod journal;
pub mod profile;
pub mod quote;
pub mod theme;

pub use codec::{CodecError, Persisted};
pub use error::ValidationError;
pub use favorites::FavoriteSet;
pub use history::{HISTORY_LIMIT, HistoryLog};
pub use journal::{JournalEntry, JournalLog, Mood, NewJournalEntry};
pub use profile::{ProfilePatch, UserProfile};
pub use quote::Quote;
pub use theme::ThemeId;
