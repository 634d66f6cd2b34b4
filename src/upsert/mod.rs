//! Upsert - update-if-exists-else-insert against a `DocumentStore`.
//!
//! `UpsertEngine` is stateless: it performs at most one find and one write
//! per call and reports every expected condition as an `UpsertOutcome`
//! value. Only malformed requests fail fast with `InvalidRequest`.
//!
//! ```text
//!   key absent  ──► stamp createdAt ──► write(Insert) ──► Created
//!   key present ──► find(key) ─┬─ error ─────────────────► Failed(StoreUnavailable)
//!                              ├─ none ──────────────────► NotFound
//!                              └─ doc ──► merge ──► write(Update) ──► Updated
//!   any write error ─────────────────────────────────────► Failed(WriteError)
//! ```
//!
//! `QueuedUpsertEngine` adds per-key serialization for callers that need it.

mod clock;
mod engine;
mod queued;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::document::{Document, ID_FIELD};

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::UpsertEngine;
pub use queued::QueuedUpsertEngine;

/// A request to create or update a document.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertRequest {
    /// Identifier of the document to update. `None` creates a new document.
    pub key: Option<String>,
    /// Fields to write.
    pub payload: Map<String, Value>,
}

impl UpsertRequest {
    /// Request the creation of a new document.
    pub fn create(payload: Map<String, Value>) -> Self {
        Self { key: None, payload }
    }

    /// Request an update of the document identified by `key`.
    pub fn update(key: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            key: Some(key.into()),
            payload,
        }
    }

    /// Build a request from function parameters.
    ///
    /// `params` must be a JSON object. Its `id` field (string or null/absent)
    /// becomes the key; the remaining fields are the payload.
    pub fn from_params(params: Value) -> Result<Self, InvalidRequest> {
        let mut payload = match params {
            Value::Object(map) => map,
            _ => return Err(InvalidRequest::NotAnObject),
        };
        let key = match payload.remove(ID_FIELD) {
            None | Some(Value::Null) => None,
            Some(Value::String(id)) => Some(id),
            Some(_) => return Err(InvalidRequest::KeyNotString),
        };
        Ok(Self { key, payload })
    }
}

/// Why a request was rejected before touching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRequest {
    #[error("request parameters must be a JSON object")]
    NotAnObject,
    #[error("document id must be a string")]
    KeyNotString,
    #[error("malformed document id [{0}]")]
    MalformedKey(String),
}

/// Category of a failed upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// The lookup failed. Nothing was written; the caller may retry.
    StoreUnavailable,
    /// The write failed. May be transient or a data conflict.
    WriteError,
}

/// Result of an upsert.
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    Created(Document),
    Updated(Document),
    NotFound(String),
    Failed { kind: FailureKind, detail: String },
}

impl UpsertOutcome {
    /// Name of the event reporting this outcome.
    pub fn event_name(&self) -> &'static str {
        match self {
            UpsertOutcome::Created(_) => "documentCreated",
            UpsertOutcome::Updated(_) => "documentUpdated",
            UpsertOutcome::NotFound(_) => "documentNotFound",
            UpsertOutcome::Failed { .. } => "documentUpsertFailed",
        }
    }

    /// JSON payload of the event reporting this outcome.
    pub fn to_payload(&self) -> Value {
        match self {
            UpsertOutcome::Created(doc) | UpsertOutcome::Updated(doc) => doc.clone().into_value(),
            UpsertOutcome::NotFound(key) => json!({ "id": key }),
            UpsertOutcome::Failed { kind, detail } => json!({ "kind": kind, "detail": detail }),
        }
    }

    /// The stored document, for `Created` and `Updated`.
    pub fn document(&self) -> Option<&Document> {
        match self {
            UpsertOutcome::Created(doc) | UpsertOutcome::Updated(doc) => Some(doc),
            _ => None,
        }
    }
}
