//! Request / response types for function dispatch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An inbound function call.
///
/// ```json
/// { "id": "req-42", "function": "ping", "params": { "hello": "world" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRequest {
    /// Request id, echoed as the correlation id of events sent back.
    #[serde(default)]
    pub id: Option<String>,
    /// Function name.
    pub function: String,
    /// JSON parameters.
    #[serde(default)]
    pub params: Value,
}

impl FunctionRequest {
    pub fn new(function: impl Into<String>, params: Value) -> Self {
        Self {
            id: None,
            function: function.into(),
            params,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Response from dispatching a function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Function result or `{ "error": ... }`.
    pub body: Value,
}
