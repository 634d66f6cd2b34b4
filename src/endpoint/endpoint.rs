//! Endpoint: function registry, webhooks and lifecycle hooks.
//!
//! `Endpoint` holds the host and a set of named async functions. Each
//! function receives a `Context` and returns `Result<Value, FunctionError>`.
//!
//! ## Example
//!
//! ```ignore
//! use endpoint_kit::endpoint::Endpoint;
//! use endpoint_kit::{EndpointConfig, Host};
//! use serde_json::json;
//!
//! let endpoint = Endpoint::new(Host::in_memory(EndpointConfig::default()))
//!     .function("echo", |ctx| async move { Ok(ctx.raw_params().clone()) })
//!     .webhook("/", "inboundEvent");
//!
//! let result = endpoint.dispatch("echo", Some("req-1".into()), json!({ "a": 1 })).await;
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{json, Value};

use super::context::Context;
use super::error::FunctionError;
use super::request::{FunctionRequest, FunctionResponse};
use crate::host::Host;
use crate::logging::APP_TARGET;

/// Boxed future returned by a registered function.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Value, FunctionError>> + Send>>;

type Guard = Box<dyn Fn(&Context) -> bool + Send + Sync>;
type Handler = Box<dyn Fn(Context) -> HandlerFuture + Send + Sync>;
type StartHook = Box<dyn Fn(&Host) + Send + Sync>;
type StopHook = Box<dyn Fn(&Host, &str) + Send + Sync>;

/// A registered function with optional guard.
struct FunctionHandler {
    guard: Option<Guard>,
    handle: Handler,
}

/// An integration endpoint: named functions, inbound webhooks and
/// lifecycle hooks over a shared `Host`.
pub struct Endpoint {
    host: Arc<Host>,
    functions: HashMap<String, FunctionHandler>,
    /// Webhook path → name of the event the body is forwarded as.
    webhooks: HashMap<String, String>,
    on_start: Vec<StartHook>,
    on_stop: Vec<StopHook>,
}

impl Endpoint {
    pub fn new(host: Host) -> Self {
        Self::with_shared_host(Arc::new(host))
    }

    pub fn with_shared_host(host: Arc<Host>) -> Self {
        Self {
            host,
            functions: HashMap::new(),
            webhooks: HashMap::new(),
            on_start: Vec::new(),
            on_stop: Vec::new(),
        }
    }

    /// Register a function.
    ///
    /// Uses builder pattern: returns `self` for chaining.
    pub fn function<F, Fut>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, FunctionError>> + Send + 'static,
    {
        self.functions.insert(
            name.to_string(),
            FunctionHandler {
                guard: None,
                handle: boxed(handler),
            },
        );
        self
    }

    /// Register a function with a guard.
    ///
    /// The guard runs before the function. If it returns `false`, the call
    /// is rejected with `FunctionError::GuardRejected`.
    pub fn function_guarded<G, F, Fut>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context) -> bool + Send + Sync + 'static,
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, FunctionError>> + Send + 'static,
    {
        self.functions.insert(
            name.to_string(),
            FunctionHandler {
                guard: Some(Box::new(guard)),
                handle: boxed(handler),
            },
        );
        self
    }

    /// Forward JSON bodies POSTed to `path` to the app as `event`.
    pub fn webhook(mut self, path: &str, event: &str) -> Self {
        self.webhooks.insert(path.to_string(), event.to_string());
        self
    }

    pub fn on_start<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Host) + Send + Sync + 'static,
    {
        self.on_start.push(Box::new(hook));
        self
    }

    /// Register a hook run on stop. Receives the stop cause. Release
    /// resources here.
    pub fn on_stop<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Host, &str) + Send + Sync + 'static,
    {
        self.on_stop.push(Box::new(hook));
        self
    }

    /// Run the start hooks. Collaborators are ready at this point.
    pub fn start(&self) {
        tracing::info!(endpoint = self.host.name(), "Endpoint has started");
        tracing::info!(target: APP_TARGET, endpoint = self.host.name(), "Endpoint has started");
        for hook in &self.on_start {
            hook(&self.host);
        }
    }

    /// Run the stop hooks.
    pub fn stop(&self, cause: &str) {
        tracing::info!(endpoint = self.host.name(), "Endpoint is stopping");
        tracing::info!(target: APP_TARGET, endpoint = self.host.name(), cause, "Endpoint is stopping");
        for hook in &self.on_stop {
            hook(&self.host, cause);
        }
    }

    /// Dispatch a function by name.
    ///
    /// Builds a `Context`, looks up the function, runs the guard (if any),
    /// then awaits the function.
    pub async fn dispatch(
        &self,
        function: &str,
        request_id: Option<String>,
        params: Value,
    ) -> Result<Value, FunctionError> {
        let handler = self
            .functions
            .get(function)
            .ok_or_else(|| FunctionError::UnknownFunction(function.to_string()))?;

        let ctx = Context::new(function.to_string(), request_id, params, self.host.clone());

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                return Err(FunctionError::GuardRejected(function.to_string()));
            }
        }

        tracing::debug!(function, request_id = ctx.request_id().unwrap_or("-"), "dispatching");
        let result = (handler.handle)(ctx).await;
        if let Err(e) = &result {
            tracing::warn!(function, error = %e, "function failed");
        }
        result
    }

    /// Dispatch a `FunctionRequest`, returning a `FunctionResponse`.
    pub async fn dispatch_request(&self, request: FunctionRequest) -> FunctionResponse {
        match self
            .dispatch(&request.function, request.id, request.params)
            .await
        {
            Ok(value) => FunctionResponse {
                status: 200,
                body: value,
            },
            Err(e) => FunctionResponse {
                status: e.status_code(),
                body: json!({ "error": e.to_string() }),
            },
        }
    }

    /// Handle a webhook call: parse the body and forward it to the app.
    ///
    /// Must be called from within a tokio runtime.
    pub fn receive_webhook(&self, path: &str, body: &[u8]) -> Result<Value, FunctionError> {
        let event = self
            .webhooks
            .get(path)
            .ok_or_else(|| FunctionError::NotFound(format!("webhook {}", path)))?;

        let body: Value = serde_json::from_slice(body)
            .map_err(|_| FunctionError::InvalidParams("Body must be valid JSON".into()))?;

        self.host.events().send(event.clone(), body, None);
        Ok(json!({ "status": "ok" }))
    }

    /// List registered function names.
    pub fn functions(&self) -> Vec<&str> {
        self.functions.keys().map(|s| s.as_str()).collect()
    }

    /// List registered webhook paths.
    pub fn webhooks(&self) -> Vec<&str> {
        self.webhooks.keys().map(|s| s.as_str()).collect()
    }

    pub fn host(&self) -> &Arc<Host> {
        &self.host
    }
}

fn boxed<F, Fut>(handler: F) -> Handler
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, FunctionError>> + Send + 'static,
{
    Box::new(move |ctx| Box::pin(handler(ctx)))
}
