// ABOUTME: Text encoding for values held in the key-value backend.
// ABOUTME: Each persisted type owns its wire shape through the Persisted trait.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur while encoding or decoding a persisted value.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid stored value: {0}")]
    Invalid(String),
}

/// A value that can be held by a persisted store.
///
/// `Default` supplies the value a store reads before loading completes and
/// whenever the stored text is absent or cannot be decoded.
pub trait Persisted: Clone + Default + Send + Sync + 'static {
    fn encode(&self) -> Result<String, CodecError>;

    fn decode(raw: &str) -> Result<Self, CodecError>;
}

/// Serialize a value as compact JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, CodecError> {
    Ok(serde_json::to_string(value)?)
}

/// Deserialize a value from JSON text.
pub fn from_json<T: DeserializeOwned>(raw: &str) -> Result<T, CodecError> {
    Ok(serde_json::from_str(raw)?)
}

/// Boolean flags are stored as the bare text `true` or `false`.
impl Persisted for bool {
    fn encode(&self) -> Result<String, CodecError> {
        Ok(self.to_string())
    }

    fn decode(raw: &str) -> Result<Self, CodecError> {
        match raw.trim() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(CodecError::Invalid(format!("expected true or false, got {other:?}"))),
        }
    }
}
