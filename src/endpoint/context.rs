//! Context passed to endpoint functions.
//!
//! Carries the function name, the request id, the parameters, and the host.
//! Functions reach every collaborator through the context.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::FunctionError;
use crate::host::Host;

/// The context passed to every function.
///
/// Owns its data so handlers can move it into background tasks.
#[derive(Clone)]
pub struct Context {
    /// The function name being handled.
    function: String,
    /// Request id; used as the correlation id of events sent back.
    request_id: Option<String>,
    /// Raw JSON parameters.
    params: Value,
    host: Arc<Host>,
}

impl Context {
    pub(crate) fn new(
        function: String,
        request_id: Option<String>,
        params: Value,
        host: Arc<Host>,
    ) -> Self {
        Self {
            function,
            request_id,
            params,
            host,
        }
    }

    /// Deserialize the parameters into a typed struct.
    pub fn params<T: DeserializeOwned>(&self) -> Result<T, FunctionError> {
        serde_json::from_value(self.params.clone())
            .map_err(|e| FunctionError::InvalidParams(e.to_string()))
    }

    pub fn raw_params(&self) -> &Value {
        &self.params
    }

    pub fn function_name(&self) -> &str {
        &self.function
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    pub fn host(&self) -> &Arc<Host> {
        &self.host
    }

    /// A free-form setting from the endpoint config.
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.host.setting(key)
    }

    /// Check if the parameters contain a field.
    pub fn has_field(&self, field: &str) -> bool {
        self.params.get(field).is_some()
    }

    /// Check if the parameters contain all specified fields.
    pub fn has_fields(&self, fields: &[&str]) -> bool {
        fields.iter().all(|f| self.has_field(f))
    }
}
