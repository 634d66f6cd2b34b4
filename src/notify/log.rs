use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::{Notifier, NotifyError};

/// A notifier that writes events to the log, or to a shared buffer.
pub struct LogNotifier {
    buffer: Option<Arc<Mutex<Vec<String>>>>,
}

impl Default for LogNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LogNotifier {
    pub fn new() -> Self {
        LogNotifier { buffer: None }
    }

    pub fn with_buffer(buffer: Arc<Mutex<Vec<String>>>) -> Self {
        LogNotifier {
            buffer: Some(buffer),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(
        &self,
        event: &str,
        payload: Value,
        correlation_id: Option<&str>,
    ) -> Result<(), NotifyError> {
        let correlation = correlation_id.unwrap_or("-");
        match &self.buffer {
            Some(buffer) => {
                let mut buffer = buffer
                    .lock()
                    .map_err(|_| NotifyError::Delivery("log buffer poisoned".into()))?;
                buffer.push(format!("[EVENT] {} {} {}", event, correlation, payload));
            }
            None => {
                tracing::info!(event, correlation_id = correlation, %payload, "event sent");
            }
        }
        Ok(())
    }
}
