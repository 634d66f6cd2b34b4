//! Function: ping
//!
//! Sends a `pong` event carrying the parameters back to the app, correlated
//! with the request id.

use serde_json::{json, Value};

use crate::endpoint::{Context, FunctionError};
use crate::logging::APP_TARGET;

pub const FUNCTION: &str = "ping";

pub const PONG_EVENT: &str = "pong";

pub fn guard(_ctx: &Context) -> bool {
    true
}

pub async fn handle(ctx: Context) -> Result<Value, FunctionError> {
    tracing::info!(target: APP_TARGET, params = %ctx.raw_params(), "Request to ping received");

    ctx.host().events().send(
        PONG_EVENT,
        ctx.raw_params().clone(),
        ctx.request_id().map(str::to_string),
    );
    tracing::info!("pong sent to app");

    Ok(json!({ "status": "ok" }))
}
