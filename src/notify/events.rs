use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;

use super::Notifier;
use crate::upsert::UpsertOutcome;

/// Fire-and-forget event sending on top of a `Notifier`.
///
/// Every send runs on a detached tokio task and makes exactly one delivery
/// attempt. Failures are logged and never reach the caller. The returned
/// handle may be dropped; it exists so tests can wait for delivery.
///
/// Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct Events {
    notifier: Arc<dyn Notifier>,
}

impl Events {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Send `event` in the background.
    pub fn send(
        &self,
        event: impl Into<String>,
        payload: Value,
        correlation_id: Option<String>,
    ) -> JoinHandle<()> {
        let notifier = self.notifier.clone();
        let event = event.into();
        tokio::spawn(async move {
            if let Err(e) = notifier
                .notify(&event, payload, correlation_id.as_deref())
                .await
            {
                tracing::warn!(
                    event = %event,
                    correlation_id = correlation_id.as_deref().unwrap_or("-"),
                    error = %e,
                    "event delivery failed"
                );
            }
        })
    }

    /// Report an upsert outcome in the background.
    pub fn notify_outcome(
        &self,
        outcome: &UpsertOutcome,
        correlation_id: Option<String>,
    ) -> JoinHandle<()> {
        self.send(outcome.event_name(), outcome.to_payload(), correlation_id)
    }
}
