//! Server state and configuration.

use std::sync::Arc;

use document_store::{DocumentStore, MemoryStore};

use crate::services::{EventService, ParticipantService, ReportService};

/// Shared application state injected into every handler.
///
/// The document store handle is passed in at construction; there is no
/// ambient global store.
#[derive(Clone)]
pub struct EventumServer {
    /// Server configuration
    pub config: ServerConfig,
    /// Event repository facade
    pub events: EventService,
    /// Participant sub-resource manager
    pub participants: ParticipantService,
    /// Reporting queries
    pub reports: ReportService,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl ServerConfig {
    /// Read configuration from the environment, with defaults for local
    /// runs. `PORT` is honored as a fallback for `EVENTUM_PORT`.
    pub fn from_env() -> Self {
        let host = std::env::var("EVENTUM_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("EVENTUM_PORT")
            .or_else(|_| std::env::var("PORT"))
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);
        Self {
            name: "Eventum Engine".to_string(),
            host,
            port,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "Eventum Engine".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl EventumServer {
    /// Create a server instance backed by the given document store.
    pub fn new(config: ServerConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            config,
            events: EventService::new(Arc::clone(&store)),
            participants: ParticipantService::new(Arc::clone(&store)),
            reports: ReportService::new(store),
        }
    }

    /// Instance backed by the in-memory store. This is what the test suite
    /// runs against.
    pub fn new_in_memory() -> Self {
        Self::new(ServerConfig::default(), Arc::new(MemoryStore::new()))
    }
}

impl std::fmt::Debug for EventumServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventumServer")
            .field("config", &self.config)
            .finish()
    }
}
