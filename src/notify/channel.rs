use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use super::{Notification, Notifier, NotifyError};

/// A notifier that forwards events into a tokio channel.
///
/// Useful for in-process consumers and for awaiting background
/// notifications in tests.
#[derive(Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn notify(
        &self,
        event: &str,
        payload: Value,
        correlation_id: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.sender
            .send(Notification {
                event: event.to_string(),
                payload,
                correlation_id: correlation_id.map(str::to_string),
            })
            .map_err(|_| NotifyError::Closed)
    }
}
