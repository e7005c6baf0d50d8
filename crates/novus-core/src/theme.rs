// ABOUTME: Identifiers for the fixed set of presentation themes.
// ABOUTME: Stored as bare text; anything unrecognised decodes as an error and falls back to dark.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::codec::{CodecError, Persisted};
use crate::error::ValidationError;

/// A known theme. `Dark` is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Dark,
    Light,
    Nature,
}

impl ThemeId {
    pub const ALL: [ThemeId; 3] = [ThemeId::Dark, ThemeId::Light, ThemeId::Nature];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Dark => "dark",
            ThemeId::Light => "light",
            ThemeId::Nature => "nature",
        }
    }

    /// Display label shown in theme pickers.
    pub fn label(&self) -> &'static str {
        match self {
            ThemeId::Dark => "Midnight",
            ThemeId::Light => "Sunrise",
            ThemeId::Nature => "Forest",
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeId::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownTheme(s.to_string()))
    }
}

impl Persisted for ThemeId {
    fn encode(&self) -> Result<String, CodecError> {
        Ok(self.as_str().to_string())
    }

    fn decode(raw: &str) -> Result<Self, CodecError> {
        raw.trim()
            .parse()
            .map_err(|e: ValidationError| CodecError::Invalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_ids() {
        assert_eq!("light".parse::<ThemeId>().unwrap(), ThemeId::Light);
        assert_eq!("nature".parse::<ThemeId>().unwrap(), ThemeId::Nature);
    }

    #[test]
    fn rejects_unknown_id() {
        let err = "not-a-real-theme".parse::<ThemeId>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownTheme("not-a-real-theme".to_string()));
    }

    #[test]
    fn stored_text_is_the_bare_id() {
        assert_eq!(ThemeId::Light.encode().unwrap(), "light");
        assert_eq!(ThemeId::decode("nature").unwrap(), ThemeId::Nature);
        assert!(ThemeId::decode("\"light\"").is_err());
    }

    #[test]
    fn default_is_dark() {
        assert_eq!(ThemeId::default(), ThemeId::Dark);
    }
}
