//! Host - the collaborators an endpoint function can reach.
//!
//! Everything a function touches outside its own parameters goes through
//! the `Host`: the document store and its upsert engine, outbound events,
//! platform files, outbound HTTP, scripts and settings. Each collaborator is
//! a trait object injected at construction, so tests swap in in-memory
//! versions.
//!
//! ```ignore
//! let host = Host::builder(EndpointConfig::default())
//!     .notifier(my_notifier)
//!     .http(ReqwestHttpClient::new())
//!     .build();
//! ```

mod files;
mod http_client;
mod scripts;

use std::sync::Arc;

use serde_json::Value;

use crate::config::EndpointConfig;
use crate::notify::{Events, LogNotifier, Notifier};
use crate::store::{DocumentStore, InMemoryDocumentStore};
use crate::upsert::{Clock, QueuedUpsertEngine, SystemClock, UpsertEngine};

pub use files::{FileError, FileInfo, FileStore, InMemoryFileStore};
#[cfg(feature = "http")]
pub use http_client::ReqwestHttpClient;
pub use http_client::{HttpClient, HttpError, HttpResponse, StaticHttpClient};
pub use scripts::{InMemoryScriptRunner, ScriptError, ScriptJob, ScriptRunner};

/// The document store as seen by the host.
pub type SharedStore = Arc<dyn DocumentStore>;

pub struct Host {
    config: EndpointConfig,
    documents: SharedStore,
    upserts: QueuedUpsertEngine<SharedStore>,
    events: Events,
    files: Arc<dyn FileStore>,
    http: Arc<dyn HttpClient>,
    scripts: Arc<dyn ScriptRunner>,
}

impl Host {
    pub fn builder(config: EndpointConfig) -> HostBuilder {
        HostBuilder::new(config)
    }

    /// A host with every collaborator in memory.
    pub fn in_memory(config: EndpointConfig) -> Self {
        HostBuilder::new(config).build()
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// A free-form setting from the `[settings]` table.
    pub fn setting(&self, key: &str) -> Option<&Value> {
        self.config.settings.get(key)
    }

    pub fn documents(&self) -> &SharedStore {
        &self.documents
    }

    /// Upserts, serialized per document id.
    pub fn upserts(&self) -> &QueuedUpsertEngine<SharedStore> {
        &self.upserts
    }

    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn files(&self) -> &Arc<dyn FileStore> {
        &self.files
    }

    pub fn http(&self) -> &Arc<dyn HttpClient> {
        &self.http
    }

    pub fn scripts(&self) -> &Arc<dyn ScriptRunner> {
        &self.scripts
    }
}

/// Builder for `Host`. Unset collaborators default to in-memory ones.
pub struct HostBuilder {
    config: EndpointConfig,
    documents: Option<SharedStore>,
    notifier: Option<Arc<dyn Notifier>>,
    files: Option<Arc<dyn FileStore>>,
    http: Option<Arc<dyn HttpClient>>,
    scripts: Option<Arc<dyn ScriptRunner>>,
    clock: Option<Arc<dyn Clock>>,
}

impl HostBuilder {
    pub fn new(config: EndpointConfig) -> Self {
        Self {
            config,
            documents: None,
            notifier: None,
            files: None,
            http: None,
            scripts: None,
            clock: None,
        }
    }

    pub fn documents(mut self, store: impl DocumentStore + 'static) -> Self {
        self.documents = Some(Arc::new(store));
        self
    }

    pub fn notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    pub fn files(mut self, files: impl FileStore + 'static) -> Self {
        self.files = Some(Arc::new(files));
        self
    }

    pub fn http(mut self, http: impl HttpClient + 'static) -> Self {
        self.http = Some(Arc::new(http));
        self
    }

    pub fn scripts(mut self, scripts: impl ScriptRunner + 'static) -> Self {
        self.scripts = Some(Arc::new(scripts));
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    pub fn build(self) -> Host {
        let documents: SharedStore = self
            .documents
            .unwrap_or_else(|| Arc::new(InMemoryDocumentStore::new()));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let upserts = QueuedUpsertEngine::new(UpsertEngine::with_clock(documents.clone(), clock));
        let notifier = self
            .notifier
            .unwrap_or_else(|| Arc::new(LogNotifier::new()));

        Host {
            config: self.config,
            documents,
            upserts,
            events: Events::new(notifier),
            files: self
                .files
                .unwrap_or_else(|| Arc::new(InMemoryFileStore::new())),
            http: self
                .http
                .unwrap_or_else(|| Arc::new(StaticHttpClient::new())),
            scripts: self
                .scripts
                .unwrap_or_else(|| Arc::new(InMemoryScriptRunner::new())),
        }
    }
}
