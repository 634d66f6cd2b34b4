//! Function: error
//!
//! Always fails. Lets the app exercise its error path.

use serde_json::Value;

use crate::endpoint::{Context, FunctionError};
use crate::logging::APP_TARGET;

pub const FUNCTION: &str = "error";

pub fn guard(_ctx: &Context) -> bool {
    true
}

pub async fn handle(_ctx: Context) -> Result<Value, FunctionError> {
    tracing::warn!(target: APP_TARGET, "Request to generate error received");
    Err(FunctionError::Failed("Error generated!".into()))
}
