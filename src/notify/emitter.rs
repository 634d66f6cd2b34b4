use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{Notification, Notifier, NotifyError};
use crate::EventEmitter;

/// A notifier that emits events via an `EventEmitter` for in-process listeners.
///
/// Listeners receive the whole `Notification` encoded as a JSON string.
pub struct EmitterNotifier {
    emitter: Mutex<EventEmitter>,
}

impl EmitterNotifier {
    pub fn new(emitter: EventEmitter) -> Self {
        EmitterNotifier {
            emitter: Mutex::new(emitter),
        }
    }

    /// Register a listener for `event`. Returns the listener id.
    pub fn on<F>(&self, event: &str, listener: F) -> Result<String, NotifyError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| NotifyError::Delivery("emitter poisoned".into()))?;
        Ok(emitter.on(event, listener))
    }
}

#[async_trait]
impl Notifier for EmitterNotifier {
    async fn notify(
        &self,
        event: &str,
        payload: Value,
        correlation_id: Option<&str>,
    ) -> Result<(), NotifyError> {
        let notification = Notification {
            event: event.to_string(),
            payload,
            correlation_id: correlation_id.map(str::to_string),
        };
        let encoded = serde_json::to_string(&notification)
            .map_err(|e| NotifyError::Serialization(e.to_string()))?;

        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| NotifyError::Delivery("emitter poisoned".into()))?;
        // Listeners run on their own threads; delivery is not awaited.
        emitter.emit(event, encoded);
        Ok(())
    }
}
