use std::sync::Arc;

use serde_json::{Map, Value};

use super::{Clock, FailureKind, InvalidRequest, SystemClock, UpsertOutcome, UpsertRequest};
use crate::document::Document;
use crate::store::{DocumentStore, WriteMode};

/// Stateless upsert-by-key over a `DocumentStore`.
///
/// Holds no locks. Two concurrent upserts of the same key are resolved by
/// the store; wrap the engine in a `QueuedUpsertEngine` to serialize them.
pub struct UpsertEngine<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: DocumentStore> UpsertEngine<S> {
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reject requests whose key does not match the store's id format.
    pub fn validate(&self, request: &UpsertRequest) -> Result<(), InvalidRequest> {
        match &request.key {
            Some(key) if !self.store.is_valid_id(key) => {
                Err(InvalidRequest::MalformedKey(key.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Create or update a document.
    ///
    /// Store failures come back as `UpsertOutcome::Failed`; the only error
    /// is a malformed request, detected before any store call.
    pub async fn upsert(&self, request: UpsertRequest) -> Result<UpsertOutcome, InvalidRequest> {
        self.validate(&request)?;
        let outcome = match request.key {
            None => self.create(request.payload).await,
            Some(key) => self.update(key, request.payload).await,
        };
        Ok(outcome)
    }

    async fn create(&self, payload: Map<String, Value>) -> UpsertOutcome {
        let mut document = Document::from_map(payload);
        // The store assigns the id on insert.
        document.take_id();
        document.set_created_at(self.clock.now_millis());

        match self.store.write(document, WriteMode::Insert).await {
            Ok(saved) => {
                tracing::info!(id = saved.id().unwrap_or("-"), "document saved");
                UpsertOutcome::Created(saved)
            }
            Err(e) => {
                tracing::error!(error = %e, "document insert failed");
                UpsertOutcome::Failed {
                    kind: FailureKind::WriteError,
                    detail: e.to_string(),
                }
            }
        }
    }

    async fn update(&self, key: String, payload: Map<String, Value>) -> UpsertOutcome {
        let mut document = match self.store.find(&key).await {
            Ok(Some(existing)) => existing,
            Ok(None) => {
                tracing::warn!(id = %key, "no document found");
                return UpsertOutcome::NotFound(key);
            }
            Err(e) => {
                tracing::error!(id = %key, error = %e, "error while querying the store");
                return UpsertOutcome::Failed {
                    kind: FailureKind::StoreUnavailable,
                    detail: e.to_string(),
                };
            }
        };

        document.merge(&payload);
        if document.id().is_none() {
            document.set_id(key.clone());
        }

        match self.store.write(document, WriteMode::Update).await {
            Ok(saved) => {
                tracing::info!(id = %key, "document updated");
                UpsertOutcome::Updated(saved)
            }
            Err(e) => {
                tracing::error!(id = %key, error = %e, "document update failed");
                UpsertOutcome::Failed {
                    kind: FailureKind::WriteError,
                    detail: e.to_string(),
                }
            }
        }
    }
}
