// ABOUTME: Configuration loading for the novus binary.
// ABOUTME: Reads the data directory and backend kind from environment variables.

use std::path::PathBuf;

use novus_store::BackendKind;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("NOVUS_BACKEND must be one of sqlite, file, memory; got {0:?}")]
    InvalidBackend(String),
}

/// Runtime configuration for the novus binary.
#[derive(Debug, Clone)]
pub struct NovusConfig {
    pub home: PathBuf,
    pub backend: BackendKind,
}

impl NovusConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - NOVUS_HOME: data directory (default: ~/.novus)
    /// - NOVUS_BACKEND: sqlite, file, or memory (default: sqlite)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let home = lookup("NOVUS_HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                lookup("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
                    .join(".novus")
            });

        let backend = match lookup("NOVUS_BACKEND").filter(|b| !b.is_empty()) {
            Some(name) => name.parse().map_err(ConfigError::InvalidBackend)?,
            None => BackendKind::default(),
        };

        Ok(Self { home, backend })
    }
}
