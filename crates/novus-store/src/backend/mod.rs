// ABOUTME: Durable key-value backends that persisted stores write through.
// ABOUTME: Defines the async KvBackend trait, its error type, and backend selection by kind.

pub mod file;
pub mod memory;
pub mod sqlite;

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Errors a backend can report for a single operation.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// A process-wide, string-keyed durable store.
///
/// Implementations must keep at least the last write of every key across
/// process restarts. Removing an absent key is not an error.
#[async_trait]
pub trait KvBackend: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    async fn remove(&self, key: &str) -> Result<(), BackendError>;
}

/// Which backend implementation to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Sqlite,
    File,
    Memory,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::File => "file",
            BackendKind::Memory => "memory",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(BackendKind::Sqlite),
            "file" => Ok(BackendKind::File),
            "memory" => Ok(BackendKind::Memory),
            other => Err(other.to_string()),
        }
    }
}

/// Open a backend of the given kind with its data under `home`.
/// Creates `home` if it does not exist.
pub fn open_backend(kind: BackendKind, home: &Path) -> Result<Arc<dyn KvBackend>, BackendError> {
    if kind != BackendKind::Memory {
        std::fs::create_dir_all(home)?;
    }

    let backend: Arc<dyn KvBackend> = match kind {
        BackendKind::Sqlite => Arc::new(SqliteBackend::open(&home.join("novus.db"))?),
        BackendKind::File => Arc::new(FileBackend::open(&home.join("novus.json"))?),
        BackendKind::Memory => Arc::new(MemoryBackend::new()),
    };

    tracing::info!("opened {} backend under {}", kind, home.display());
    Ok(backend)
}
