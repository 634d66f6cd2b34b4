//! Error types for endpoint functions.

use crate::upsert::InvalidRequest;

/// Error type for function and webhook handling.
#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    /// No function registered under this name.
    #[error("unknown function: {0}")]
    UnknownFunction(String),
    /// Parameters missing, malformed, or of the wrong type.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    /// Guard rejected the call.
    #[error("guard rejected function: {0}")]
    GuardRejected(String),
    /// Document, file or webhook not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// A collaborator is unavailable; the caller may retry.
    #[error("unavailable: {0}")]
    Unavailable(String),
    /// The function failed.
    #[error("{0}")]
    Failed(String),
}

impl From<InvalidRequest> for FunctionError {
    fn from(err: InvalidRequest) -> Self {
        FunctionError::InvalidParams(err.to_string())
    }
}

impl From<serde_json::Error> for FunctionError {
    fn from(err: serde_json::Error) -> Self {
        FunctionError::InvalidParams(err.to_string())
    }
}

impl FunctionError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            FunctionError::UnknownFunction(_) => 404,
            FunctionError::InvalidParams(_) => 400,
            FunctionError::GuardRejected(_) => 400,
            FunctionError::NotFound(_) => 404,
            FunctionError::Unavailable(_) => 503,
            FunctionError::Failed(_) => 500,
        }
    }
}
