pub mod config;
mod document;
pub mod endpoint;
pub mod host;
pub mod lock;
pub mod logging;
pub mod notify;
mod store;
pub mod upsert;

pub use config::{ConfigError, EndpointConfig};
pub use document::{Document, CREATED_AT_FIELD, ID_FIELD};
pub use endpoint::{Context, Endpoint, FunctionError, FunctionRequest, FunctionResponse};
pub use host::{Host, HostBuilder};
pub use notify::{ChannelNotifier, Events, LogNotifier, Notification, Notifier, NotifyError};
pub use store::{
    is_well_formed_id, DocumentStore, InMemoryDocumentStore, StoreError, WriteMode, MAX_ID_LEN,
};
pub use upsert::{
    FailureKind, InvalidRequest, QueuedUpsertEngine, UpsertEngine, UpsertOutcome, UpsertRequest,
};

#[cfg(feature = "emitter")]
pub use notify::EmitterNotifier;

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
