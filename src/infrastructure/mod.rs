//! Infrastructure layer with external service adapters.

/// Hosted backend client.
pub mod backend;
/// Application configuration.
pub mod config;
/// Session storage adapters.
pub mod storage;

pub use backend::BackendClient;
pub use config::{AppConfig, CliArgs, ConfigError, LogLevel, StorageManager};
pub use storage::KeyringSessionStorage;
