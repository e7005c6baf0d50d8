// ABOUTME: Key-value backend kept as a single JSON document on disk.
// ABOUTME: Every write replaces the document atomically (write to .tmp, fsync, rename).

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{BackendError, KvBackend};

/// A KvBackend holding all keys in one JSON object file.
pub struct FileBackend {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileBackend {
    /// Open the document at `path`, creating parent directories as needed.
    /// A document that cannot be parsed is moved aside to `<path>.corrupt`
    /// and the backend starts empty.
    pub fn open(path: &Path) -> Result<Self, BackendError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let entries = if path.exists() {
            let contents = fs::read_to_string(path)?;
            match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    let aside = path.with_extension("json.corrupt");
                    tracing::warn!(
                        "unreadable store document {} ({}), moving it to {}",
                        path.display(),
                        e,
                        aside.display()
                    );
                    fs::rename(path, &aside)?;
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        let backend = Self {
            path: path.to_path_buf(),
            entries: Mutex::new(entries),
        };
        if !path.exists() {
            write_document(&backend.path, &BTreeMap::new())?;
        }
        Ok(backend)
    }

    /// Returns the path to the underlying document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `change` to a copy of the entries, persist the copy, and only
    /// then make it current. A failed write leaves the backend unchanged.
    async fn commit<F>(&self, change: F) -> Result<(), BackendError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        change(&mut next);

        let path = self.path.clone();
        let snapshot = next.clone();
        tokio::task::spawn_blocking(move || write_document(&path, &snapshot)).await??;

        *entries = next;
        Ok(())
    }
}

/// Write the document with atomic rename for crash safety.
fn write_document(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), BackendError> {
    let tmp_path = path.with_extension("json.tmp");
    let json = serde_json::to_string_pretty(entries)?;

    let mut file = File::create(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    drop(file);

    fs::rename(&tmp_path, path)?;

    // Best-effort: the rename already succeeded if this fsync fails.
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[async_trait]
impl KvBackend for FileBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let (key, value) = (key.to_string(), value.to_string());
        self.commit(move |entries| {
            entries.insert(key, value);
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.commit(|entries| {
            entries.remove(key);
        })
        .await
    }
}
