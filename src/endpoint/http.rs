//! HTTP transport for endpoints: maps HTTP requests to function dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /health`: `{ "ok": true, "name": ..., "functions": [...] }`.
//! - `POST /functions/:function`: dispatch a function. Body = JSON params,
//!   `x-request-id` header = request id (generated when absent).
//! - `POST <webhook path>`: one route per registered webhook.

use std::future::Future;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::endpoint::Endpoint;
use super::error::FunctionError;

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build an axum `Router` that dispatches to the given endpoint.
pub fn router(endpoint: Arc<Endpoint>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_handler))
        .route("/functions/:function", post(function_handler));

    for path in endpoint.webhooks() {
        if path == "/health" || path.starts_with("/functions/") {
            tracing::warn!(path, "webhook path collides with a built-in route; skipped");
            continue;
        }
        if !path.starts_with('/') || path.contains([':', '*']) {
            tracing::warn!(path, "webhook path is not a literal route; skipped");
            continue;
        }
        app = app.route(path, post(webhook_handler));
    }

    app.with_state(endpoint)
}

/// Run start hooks, serve until `shutdown` resolves, then run stop hooks.
pub async fn serve<F>(
    endpoint: Arc<Endpoint>,
    addr: &str,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    endpoint.start();
    let result = axum::serve(listener, router(endpoint.clone()))
        .with_graceful_shutdown(shutdown)
        .await;
    let cause = match &result {
        Ok(()) => "shutdown requested".to_string(),
        Err(e) => format!("server error: {}", e),
    };
    endpoint.stop(&cause);
    result
}

/// `GET /health`
async fn health_handler(State(endpoint): State<Arc<Endpoint>>) -> impl IntoResponse {
    let mut functions = endpoint.functions();
    functions.sort_unstable();
    Json(json!({
        "ok": true,
        "name": endpoint.host().name(),
        "functions": functions,
    }))
}

/// `POST /functions/:function`
async fn function_handler(
    State(endpoint): State<Arc<Endpoint>>,
    Path(function): Path<String>,
    headers: HeaderMap,
    Json(params): Json<Value>,
) -> impl IntoResponse {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    match endpoint.dispatch(&function, Some(request_id), params).await {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `POST <webhook path>`
async fn webhook_handler(
    State(endpoint): State<Arc<Endpoint>>,
    uri: Uri,
    body: Bytes,
) -> impl IntoResponse {
    match endpoint.receive_webhook(uri.path(), &body) {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(e: FunctionError) -> axum::response::Response {
    let status = StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}
