//! Document stores - abstract persistence for `Document`s.
//!
//! A store finds documents by identifier and writes them with either insert
//! semantics (the store assigns the identifier) or update semantics (the
//! identifier must already exist).
//!
//! ## Example
//!
//! ```ignore
//! use endpoint_kit::{Document, DocumentStore, InMemoryDocumentStore, WriteMode};
//!
//! let store = InMemoryDocumentStore::new();
//! let saved = store.write(Document::new(), WriteMode::Insert).await?;
//! let loaded = store.find(saved.id().unwrap()).await?;
//! ```

mod in_memory;
mod store;

/// How a document is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create a new document. The store assigns the identifier.
    Insert,
    /// Replace an existing document, keyed by its identifier.
    Update,
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached or the query failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// An insert was attempted on a document that already carries an id.
    #[error("document already has id {0}; inserts must not carry an id")]
    IdAlreadySet(String),
    /// An update was attempted on a document without an id.
    #[error("document has no id; updates require one")]
    MissingId,
    /// An update targeted an id the store does not hold.
    #[error("document not found: {0}")]
    NotFound(String),
    /// The store rejected the write (conflict, constraint, ...).
    #[error("write rejected: {0}")]
    Rejected(String),
}

pub use in_memory::InMemoryDocumentStore;
pub use store::{is_well_formed_id, DocumentStore, MAX_ID_LEN};
