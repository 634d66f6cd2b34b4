//! Documents - schemaless JSON objects persisted by a `DocumentStore`.
//!
//! A document is a flat JSON object with two reserved fields:
//!
//! - `id`: assigned by the store on first insert, never changed afterwards.
//! - `createdAt`: milliseconds since the Unix epoch, stamped once at creation.
//!
//! Every other field belongs to the application.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reserved field holding the store-assigned identifier.
pub const ID_FIELD: &str = "id";

/// Reserved field holding the creation timestamp (ms since epoch).
pub const CREATED_AT_FIELD: &str = "createdAt";

/// A JSON object with store-managed `id` and `createdAt` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// The store-assigned identifier, if the document has been written.
    pub fn id(&self) -> Option<&str> {
        self.fields.get(ID_FIELD).and_then(Value::as_str)
    }

    /// Set the identifier. Stores call this on insert.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.fields
            .insert(ID_FIELD.to_string(), Value::String(id.into()));
    }

    /// Remove and return the identifier.
    pub fn take_id(&mut self) -> Option<Value> {
        self.fields.remove(ID_FIELD)
    }

    pub fn created_at(&self) -> Option<i64> {
        self.fields.get(CREATED_AT_FIELD).and_then(Value::as_i64)
    }

    pub fn set_created_at(&mut self, millis: i64) {
        self.fields
            .insert(CREATED_AT_FIELD.to_string(), Value::from(millis));
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Shallow merge: every payload field overwrites the field of the same
    /// name. `id` and `createdAt` are never taken from the payload.
    pub fn merge(&mut self, payload: &Map<String, Value>) {
        for (field, value) in payload {
            if field == ID_FIELD || field == CREATED_AT_FIELD {
                continue;
            }
            self.fields.insert(field.clone(), value.clone());
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl From<Map<String, Value>> for Document {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}
