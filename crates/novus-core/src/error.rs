// ABOUTME: Validation errors raised before any store mutation takes place.
// ABOUTME: A rejected operation leaves both memory and durable state untouched.

use thiserror::Error;

/// Reasons a mutation request is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown theme id: {0}")]
    UnknownTheme(String),

    #[error("name must not be empty")]
    EmptyName,

    #[error("mood baseline must be between 1 and 10, got {0}")]
    MoodBaselineOutOfRange(u8),
}
