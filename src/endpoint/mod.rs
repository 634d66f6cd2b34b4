//! endpoint: named async functions, webhooks and lifecycle hooks.
//!
//! Build an integration endpoint by registering functions on an `Endpoint`.
//! Each function receives a `Context` with the parameters, the request id
//! and the `Host` collaborators.
//!
//! ## Quick Start
//!
//! ```ignore
//! use endpoint_kit::endpoint::{self, Endpoint};
//! use endpoint_kit::{EndpointConfig, Host};
//! use serde_json::json;
//!
//! let endpoint = Endpoint::new(Host::in_memory(EndpointConfig::default()))
//!     .function("hello", |ctx| async move {
//!         Ok(json!({ "hello": ctx.raw_params()["name"] }))
//!     })
//!     .webhook("/", "inboundEvent");
//!
//! // Direct dispatch
//! let result = endpoint.dispatch("hello", None, json!({ "name": "Pat" })).await;
//!
//! // HTTP transport (requires "http" feature)
//! // endpoint::serve(Arc::new(endpoint), "0.0.0.0:8080", shutdown).await?;
//! ```
//!
//! ## Function Convention
//!
//! ```ignore
//! // src/functions/greet.rs
//!
//! pub const FUNCTION: &str = "greet";
//!
//! pub fn guard(ctx: &Context) -> bool {
//!     ctx.has_fields(&["name"])
//! }
//!
//! pub async fn handle(ctx: Context) -> Result<Value, FunctionError> {
//!     let input = ctx.params::<GreetInput>()?;
//!     Ok(json!({ "hello": input.name }))
//! }
//! ```

mod context;
mod endpoint;
mod error;
pub mod functions;
mod request;

pub use context::Context;
pub use endpoint::{Endpoint, HandlerFuture};
pub use error::FunctionError;
pub use request::{FunctionRequest, FunctionResponse};

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve, REQUEST_ID_HEADER};

impl Endpoint {
    /// An endpoint with every sample function and the default webhook.
    pub fn with_samples(host: crate::host::Host) -> Self {
        functions::register_samples(Endpoint::new(host))
    }
}

/// Register function modules with an endpoint using the convention pattern.
///
/// Each module must export:
/// - `FUNCTION: &str`: the function name
/// - `guard(ctx) -> bool`: parameter validation
/// - `async handle(ctx) -> Result<Value, FunctionError>`: the function
///
/// # Example
/// ```ignore
/// let endpoint = endpoint_kit::register_functions!(
///     Endpoint::new(host),
///     functions::greet,
///     functions::farewell,
/// );
/// ```
#[macro_export]
macro_rules! register_functions {
    ($endpoint:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $endpoint
        $(
            .function_guarded(
                $($seg)::+::FUNCTION,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
