//! Notifications - best-effort events sent back to the calling application.
//!
//! A `Notifier` delivers a named event with a JSON payload and an optional
//! correlation id linking it to the request that caused it. `Events` wraps a
//! notifier and sends on detached tasks, so callers never wait on (or fail
//! because of) delivery.
//!
//! ```text
//!   function handler ──► Events::send ──► tokio::spawn ──► Notifier::notify
//!                                                            │
//!                               ┌────────────────────────────┼──────────────┐
//!                               ▼                            ▼              ▼
//!                          LogNotifier              ChannelNotifier   EmitterNotifier
//! ```

mod channel;
#[cfg(feature = "emitter")]
mod emitter;
mod events;
mod log;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single event addressed to the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub event: String,
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

/// Error type for notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The receiving side has gone away.
    #[error("notification channel closed")]
    Closed,
    /// The payload could not be serialized.
    #[error("notification serialization failed: {0}")]
    Serialization(String),
    /// Delivery failed for another reason.
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Trait for delivering events to the application.
///
/// Implementations might include a platform event API, a message broker,
/// or an in-process channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        event: &str,
        payload: Value,
        correlation_id: Option<&str>,
    ) -> Result<(), NotifyError>;
}

pub use channel::ChannelNotifier;
#[cfg(feature = "emitter")]
pub use emitter::EmitterNotifier;
pub use events::Events;
pub use log::LogNotifier;
