//! DocumentStore - abstract find/write storage for documents.

use std::sync::Arc;

use async_trait::async_trait;

use super::{StoreError, WriteMode};
use crate::document::Document;

/// Longest identifier accepted by the default format check.
pub const MAX_ID_LEN: usize = 128;

/// Abstract storage for documents.
///
/// Implementations own all persisted state and are the authority for
/// conflict resolution between concurrent writers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Find a document by identifier. Returns `None` if it does not exist.
    async fn find(&self, id: &str) -> Result<Option<Document>, StoreError>;

    /// Write a document.
    ///
    /// `Insert` assigns a fresh identifier and returns the stored document.
    /// `Update` replaces the document whose identifier is already set.
    async fn write(&self, document: Document, mode: WriteMode) -> Result<Document, StoreError>;

    /// Whether `id` matches this store's identifier format.
    fn is_valid_id(&self, id: &str) -> bool {
        is_well_formed_id(id)
    }
}

/// Default identifier format: non-empty, at most `MAX_ID_LEN` bytes, no
/// whitespace or control characters.
pub fn is_well_formed_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_ID_LEN
        && !id.chars().any(|c| c.is_whitespace() || c.is_control())
}

#[async_trait]
impl<T: DocumentStore + ?Sized> DocumentStore for Arc<T> {
    async fn find(&self, id: &str) -> Result<Option<Document>, StoreError> {
        (**self).find(id).await
    }

    async fn write(&self, document: Document, mode: WriteMode) -> Result<Document, StoreError> {
        (**self).write(document, mode).await
    }

    fn is_valid_id(&self, id: &str) -> bool {
        (**self).is_valid_id(id)
    }
}
