pub mod config;
pub mod error;
pub mod models;
pub mod stores;

pub use config::{EndpointConfig, ENDPOINT_ENV_VAR};
pub use error::StorageError;
pub use models::{AppendResponse, EndpointAction, MatchesEnvelope};
pub use stores::{AppendBehavior, AppsScriptClient, InMemoryStore, MatchStore};
