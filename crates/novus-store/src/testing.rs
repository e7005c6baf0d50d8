// ABOUTME: Test utilities for novus-store, including a fault-injecting backend.
// ABOUTME: Used in tests to simulate failed reads and writes and slow initial loads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::backend::{BackendError, KvBackend, MemoryBackend};

/// An in-memory backend whose reads and writes can be made to fail on demand.
///
/// A gated backend holds every `get` until `release_reads` is called, which
/// keeps stores in `Loading` for as long as a test needs.
#[derive(Debug, Default)]
pub struct FaultyBackend {
    inner: MemoryBackend,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    read_gate: Option<Semaphore>,
    reads: Mutex<Vec<String>>,
}

impl FaultyBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend whose reads block until `release_reads`.
    pub fn gated() -> Self {
        Self {
            read_gate: Some(Semaphore::new(0)),
            ..Self::default()
        }
    }

    /// Let blocked and future reads through.
    pub fn release_reads(&self) {
        if let Some(gate) = &self.read_gate {
            gate.add_permits(1);
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Keys passed to `get`, in call order.
    pub fn reads(&self) -> Vec<String> {
        self.reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store a value directly, ignoring injected failures.
    pub async fn seed(&self, key: &str, value: &str) {
        let _ = self.inner.set(key, value).await;
    }

    /// Read a value directly, ignoring injected failures and the gate.
    pub async fn peek(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.ok().flatten()
    }

    fn check_writes(&self) -> Result<(), BackendError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("injected write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KvBackend for FaultyBackend {
    async fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.reads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(key.to_string());
        if let Some(gate) = &self.read_gate {
            let _permit = gate
                .acquire()
                .await
                .map_err(|_| BackendError::Unavailable("read gate closed".to_string()))?;
        }
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable("injected read failure".to_string()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.check_writes()?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.check_writes()?;
        self.inner.remove(key).await
    }
}
