//! Logging targets and subscriber setup.
//!
//! Events for the endpoint operator use the crate's default target. Events
//! meant for the application's own log (the "app log") use [`APP_TARGET`],
//! so a subscriber can route or filter them separately:
//!
//! ```ignore
//! tracing::info!(target: APP_TARGET, "Document saved successfully");
//! ```

/// Target of app-facing log events.
pub const APP_TARGET: &str = "app";

/// Install a fmt subscriber. `RUST_LOG` wins over `default_filter`.
#[cfg(feature = "server")]
pub fn init(default_filter: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).try_init()
}
