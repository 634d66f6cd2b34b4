use super::{FailureKind, InvalidRequest, UpsertEngine, UpsertOutcome, UpsertRequest};
use crate::lock::{InMemoryLockManager, LockManager};
use crate::store::DocumentStore;

/// An `UpsertEngine` that serializes upserts of the same key.
///
/// Keyed upserts hold the key's lock across find and write, so two writers
/// of one document never interleave and no merged field is lost.
/// Creations carry no key and are never locked. Distinct keys proceed in
/// parallel.
pub struct QueuedUpsertEngine<S, L = InMemoryLockManager> {
    engine: UpsertEngine<S>,
    locks: L,
}

impl<S: DocumentStore> QueuedUpsertEngine<S, InMemoryLockManager> {
    pub fn new(engine: UpsertEngine<S>) -> Self {
        Self::with_locks(engine, InMemoryLockManager::new())
    }
}

impl<S: DocumentStore, L: LockManager> QueuedUpsertEngine<S, L> {
    pub fn with_locks(engine: UpsertEngine<S>, locks: L) -> Self {
        Self { engine, locks }
    }

    pub fn engine(&self) -> &UpsertEngine<S> {
        &self.engine
    }

    pub async fn upsert(&self, request: UpsertRequest) -> Result<UpsertOutcome, InvalidRequest> {
        let key = match &request.key {
            None => return self.engine.upsert(request).await,
            Some(key) => key.clone(),
        };
        self.engine.validate(&request)?;

        let lock = match self.locks.get_lock(&key) {
            Ok(lock) => lock,
            Err(e) => {
                tracing::error!(id = %key, error = %e, "could not obtain document lock");
                return Ok(UpsertOutcome::Failed {
                    kind: FailureKind::StoreUnavailable,
                    detail: e.to_string(),
                });
            }
        };
        let _guard = lock.lock().await;
        self.engine.upsert(request).await
    }
}
