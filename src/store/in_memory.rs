//! InMemoryDocumentStore - HashMap-backed document store for testing and development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use super::{DocumentStore, StoreError, WriteMode};
use crate::document::Document;

/// In-memory document store backed by a HashMap.
///
/// Identifiers are assigned sequentially as `"{prefix}{n}"` starting at 1
/// (`auto1`, `auto2`, ...). Updates are last-write-wins. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<HashMap<String, Document>>>,
    next_id: Arc<AtomicU64>,
    id_prefix: Arc<str>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create a new empty store with the `auto` id prefix.
    pub fn new() -> Self {
        Self::with_id_prefix("auto")
    }

    pub fn with_id_prefix(prefix: &str) -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            id_prefix: Arc::from(prefix),
        }
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.storage.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn allocate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.id_prefix, n)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn find(&self, id: &str) -> Result<Option<Document>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;
        Ok(storage.get(id).cloned())
    }

    async fn write(&self, mut document: Document, mode: WriteMode) -> Result<Document, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".into()))?;

        match mode {
            WriteMode::Insert => {
                if let Some(id) = document.id() {
                    return Err(StoreError::IdAlreadySet(id.to_string()));
                }
                let id = self.allocate_id();
                document.set_id(id.clone());
                storage.insert(id, document.clone());
            }
            WriteMode::Update => {
                let id = document.id().ok_or(StoreError::MissingId)?.to_string();
                if !storage.contains_key(&id) {
                    return Err(StoreError::NotFound(id));
                }
                storage.insert(id, document.clone());
            }
        }

        Ok(document)
    }
}
