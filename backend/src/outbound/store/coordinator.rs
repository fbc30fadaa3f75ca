//! Per-collection serialization of read-modify-write cycles.
//!
//! Two concurrent mutations against the same collection must not both load
//! the same snapshot and then overwrite each other's delta (lost update).
//! The coordinator hands out one fair async mutex per collection key; the
//! tokio mutex grants the lock in request order, giving the required FIFO
//! queueing. Reads never touch these locks.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::Mutex as AsyncMutex;

use super::{FlatFileStore, Record, StoreError};

/// Registry of per-collection exclusive sections.
#[derive(Debug, Default)]
pub struct WriteCoordinator {
    locks: StdMutex<HashMap<&'static str, Arc<AsyncMutex<()>>>>,
}

impl WriteCoordinator {
    /// Fresh coordinator with no locks handed out yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The exclusive-section lock for a collection key.
    ///
    /// The same `Arc` is returned for the same key for the coordinator's
    /// lifetime, so all writers of one collection queue on one mutex.
    pub fn collection_lock(&self, key: &'static str) -> Arc<AsyncMutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(locks.entry(key).or_default())
    }
}

/// One collection bound to its store and coordinator.
///
/// `snapshot` reads the latest fully-committed state without locking;
/// `mutate` runs the caller's delta inside the collection's exclusive
/// section and persists the result before releasing the next waiter.
#[derive(Debug, Clone)]
pub struct Collection<R: Record> {
    store: Arc<FlatFileStore>,
    coordinator: Arc<WriteCoordinator>,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Collection<R> {
    /// Bind a record type to a store and coordinator.
    pub fn new(store: Arc<FlatFileStore>, coordinator: Arc<WriteCoordinator>) -> Self {
        Self {
            store,
            coordinator,
            _record: PhantomData,
        }
    }

    /// Lock-free read of the latest fully-committed snapshot.
    ///
    /// # Errors
    /// Propagates store read and corruption failures.
    pub async fn snapshot(&self) -> Result<Vec<R>, StoreError> {
        self.store.load::<R>().await
    }

    /// Run a read-modify-write cycle in the collection's exclusive section.
    ///
    /// `apply` receives the freshly loaded collection and returns the new
    /// collection to persist plus a result value. The save happens before
    /// the lock is released, so the next waiter always loads this
    /// mutation's outcome.
    ///
    /// # Errors
    /// Propagates store failures (via `From<StoreError>`) and whatever
    /// `apply` itself rejects; when `apply` fails nothing is persisted.
    pub async fn mutate<T, E, F>(&self, apply: F) -> Result<T, E>
    where
        E: From<StoreError>,
        F: FnOnce(Vec<R>) -> Result<(Vec<R>, T), E>,
    {
        let lock = self.coordinator.collection_lock(R::COLLECTION);
        let _guard = lock.lock().await;
        let records = self.store.load::<R>().await?;
        let (next, value) = apply(records)?;
        self.store.atomic_save::<R>(&next).await?;
        Ok(value)
    }
}
