// ABOUTME: Generic persisted store binding one typed in-memory value to one backend key.
// ABOUTME: Reads and mutations are synchronous; a per-store writer task loads first, then applies writes in order.

use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};

use novus_core::{CodecError, Persisted};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

use crate::backend::{BackendError, KvBackend};

/// Errors reported by persisted stores and their composition.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("writer for store {0} stopped before confirming the write")]
    WriterStopped(String),

    #[error("storage key already claimed: {0}")]
    DuplicateKey(String),
}

/// Where a store is in its start-up sequence. Reads are valid in every
/// state; before `Ready` they observe the default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Loading,
    Ready,
}

/// The observable state of a store: its current value and lifecycle.
#[derive(Debug, Clone)]
pub struct StoreState<T> {
    pub value: T,
    pub lifecycle: Lifecycle,
    /// Set once the value has been mutated or reset in this process.
    touched: bool,
}

/// Confirmation of durable writes issued by a mutation.
///
/// Awaiting the handle resolves once the backend has accepted every write it
/// covers, or with the first failure. Dropping it does not cancel anything.
#[derive(Debug, Default)]
pub struct PersistHandle {
    pending: Vec<(String, oneshot::Receiver<Result<(), StoreError>>)>,
}

impl PersistHandle {
    fn pending(key: &str) -> (Self, oneshot::Sender<Result<(), StoreError>>) {
        let (tx, rx) = oneshot::channel();
        let handle = Self {
            pending: vec![(key.to_string(), rx)],
        };
        (handle, tx)
    }

    fn failed(key: &str, err: StoreError) -> Self {
        let (handle, tx) = Self::pending(key);
        let _ = tx.send(Err(err));
        handle
    }

    /// Combine two handles into one covering both sets of writes.
    pub fn join(mut self, other: PersistHandle) -> Self {
        self.pending.extend(other.pending);
        self
    }
}

impl IntoFuture for PersistHandle {
    type Output = Result<(), StoreError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let mut first_err = None;
            for (key, rx) in self.pending {
                let result = rx.await.unwrap_or(Err(StoreError::WriterStopped(key)));
                if let Err(e) = result
                    && first_err.is_none()
                {
                    first_err = Some(e);
                }
            }
            match first_err {
                Some(e) => Err(e),
                None => Ok(()),
            }
        })
    }
}

enum WriteOp {
    Put(String),
    Remove,
}

struct QueuedWrite {
    op: WriteOp,
    ack: oneshot::Sender<Result<(), StoreError>>,
}

struct Inner<T: Persisted> {
    key: String,
    backend: Arc<dyn KvBackend>,
    state: Arc<watch::Sender<StoreState<T>>>,
    writes: mpsc::UnboundedSender<QueuedWrite>,
    /// Receiving end of the write queue, handed to the writer task by `load`.
    unstarted: Mutex<Option<mpsc::UnboundedReceiver<QueuedWrite>>>,
}

/// One typed value persisted under one backend key.
///
/// Clones share the same value and writer. Mutations update memory before
/// returning and queue a durable write of the whole new value; the writer
/// task applies queued writes in mutation order. A failed write is logged
/// and reported through the returned handle, never rolled back in memory.
pub struct PersistedStore<T: Persisted> {
    inner: Arc<Inner<T>>,
}

impl<T: Persisted> Clone for PersistedStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Persisted> PersistedStore<T> {
    /// Create an uninitialized store holding the default value. Writes
    /// issued before `load` are queued until the writer starts.
    pub fn new(key: impl Into<String>, backend: Arc<dyn KvBackend>) -> Self {
        let (state, _) = watch::channel(StoreState {
            value: T::default(),
            lifecycle: Lifecycle::Uninitialized,
            touched: false,
        });
        let (writes, unstarted) = mpsc::unbounded_channel();

        Self {
            inner: Arc::new(Inner {
                key: key.into(),
                backend,
                state: Arc::new(state),
                writes,
                unstarted: Mutex::new(Some(unstarted)),
            }),
        }
    }

    /// Create a store and immediately start loading it.
    pub fn open(key: impl Into<String>, backend: Arc<dyn KvBackend>) -> Self {
        let store = Self::new(key, backend);
        store.load();
        store
    }

    /// Move to `Loading` and spawn the writer task, which reads the stored
    /// value before processing any queued write. Must be called within a
    /// tokio runtime. Only the first call has any effect.
    pub fn load(&self) {
        let unstarted = self
            .inner
            .unstarted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(receiver) = unstarted else {
            tracing::warn!("store {} is already loading, ignoring repeated load", self.inner.key);
            return;
        };

        self.inner
            .state
            .send_modify(|s| s.lifecycle = Lifecycle::Loading);

        let writer = Writer {
            key: self.inner.key.clone(),
            backend: Arc::clone(&self.inner.backend),
            state: Arc::clone(&self.inner.state),
            receiver,
        };
        tokio::spawn(writer.run());
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// A copy of the current in-memory value.
    pub fn read(&self) -> T {
        self.inner.state.borrow().value.clone()
    }

    /// Borrow the current value for the duration of `f`. `f` must not call
    /// back into this store.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.state.borrow().value)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.state.borrow().lifecycle
    }

    /// Wait until the initial load has resolved, successfully or not.
    pub async fn ready(&self) {
        let mut rx = self.inner.state.subscribe();
        let _ = rx.wait_for(|s| s.lifecycle == Lifecycle::Ready).await;
    }

    /// Watch the store for changes to its value or lifecycle.
    pub fn subscribe(&self) -> watch::Receiver<StoreState<T>> {
        self.inner.state.subscribe()
    }

    /// Apply `updater` to the in-memory value and queue a write of the result.
    /// `updater` must not call back into this store.
    pub fn mutate<F>(&self, updater: F) -> PersistHandle
    where
        F: FnOnce(&mut T),
    {
        let mut handle = PersistHandle::default();
        self.inner.state.send_modify(|s| {
            updater(&mut s.value);
            s.touched = true;
            // Encode and enqueue under the same lock so queue order matches
            // mutation order.
            handle = match s.value.encode() {
                Ok(raw) => self.enqueue(WriteOp::Put(raw)),
                Err(e) => {
                    tracing::error!("failed to encode store {}: {}", self.inner.key, e);
                    PersistHandle::failed(&self.inner.key, e.into())
                }
            };
        });
        handle
    }

    /// Restore the default value and queue removal of the stored key.
    pub fn reset(&self) -> PersistHandle {
        let mut handle = PersistHandle::default();
        self.inner.state.send_modify(|s| {
            s.value = T::default();
            s.touched = true;
            handle = self.enqueue(WriteOp::Remove);
        });
        handle
    }

    fn enqueue(&self, op: WriteOp) -> PersistHandle {
        let (handle, ack) = PersistHandle::pending(&self.inner.key);
        if self.inner.writes.send(QueuedWrite { op, ack }).is_err() {
            tracing::error!("writer for store {} has stopped, write dropped", self.inner.key);
        }
        handle
    }
}

/// Background task owning all backend traffic for one store.
struct Writer<T: Persisted> {
    key: String,
    backend: Arc<dyn KvBackend>,
    state: Arc<watch::Sender<StoreState<T>>>,
    receiver: mpsc::UnboundedReceiver<QueuedWrite>,
}

impl<T: Persisted> Writer<T> {
    async fn run(mut self) {
        let loaded = self.fetch().await;
        let key = &self.key;
        self.state.send_modify(|s| {
            match loaded {
                Some(_) if s.touched => {
                    tracing::warn!(
                        "store {} changed while loading, keeping the in-memory value",
                        key
                    );
                }
                Some(value) => s.value = value,
                None => {}
            }
            s.lifecycle = Lifecycle::Ready;
        });
        tracing::debug!("store {} ready", self.key);

        while let Some(write) = self.receiver.recv().await {
            let result = match &write.op {
                WriteOp::Put(raw) => self.backend.set(&self.key, raw).await,
                WriteOp::Remove => self.backend.remove(&self.key).await,
            };
            if let Err(e) = &result {
                tracing::error!("failed to persist store {}: {}", self.key, e);
            }
            // The caller may have dropped the handle
            let _ = write.ack.send(result.map_err(StoreError::from));
        }

        tracing::debug!("writer for store {} stopped", self.key);
    }

    /// Read and decode the stored value. Every failure degrades to `None`.
    async fn fetch(&self) -> Option<T> {
        match self.backend.get(&self.key).await {
            Ok(Some(raw)) => match T::decode(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("discarding unreadable value for store {}: {}", self.key, e);
                    None
                }
            },
            Ok(None) => {
                tracing::debug!("no stored value for store {}, using default", self.key);
                None
            }
            Err(e) => {
                tracing::error!("failed to load store {}: {}", self.key, e);
                None
            }
        }
    }
}
