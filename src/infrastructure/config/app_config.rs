//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::args::CliArgs;
use super::storage::ConfigError;
use crate::domain::query::Tables;

pub(super) const APP_NAME: &str = "foodorder";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "foodorder";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, file values overridden by CLI and environment.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Hosted backend project.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Table names.
    #[serde(default)]
    pub tables: TablesConfig,

    /// Output configuration.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Hosted backend project settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`.
    #[serde(default)]
    pub url: Option<String>,

    /// Public anonymous key.
    #[serde(default)]
    pub anon_key: Option<String>,
}

/// Table names, overridable for projects with different schemas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesConfig {
    #[serde(default = "default_profiles_table")]
    pub profiles: String,

    #[serde(default = "default_food_items_table")]
    pub food_items: String,

    #[serde(default = "default_orders_table")]
    pub orders: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            profiles: default_profiles_table(),
            food_items: default_food_items_table(),
            orders: default_orders_table(),
        }
    }
}

impl From<&TablesConfig> for Tables {
    fn from(config: &TablesConfig) -> Self {
        Self {
            profiles: config.profiles.clone(),
            food_items: config.food_items.clone(),
            orders: config.orders.clone(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Symbol printed before amounts.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Number of orders listed under a sales report.
    #[serde(default = "default_sales_preview")]
    pub sales_preview: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            sales_preview: default_sales_preview(),
        }
    }
}

fn default_profiles_table() -> String {
    Tables::default().profiles
}

fn default_food_items_table() -> String {
    Tables::default().food_items
}

fn default_orders_table() -> String {
    Tables::default().orders
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

const fn default_sales_preview() -> usize {
    3
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(url) = &args.backend_url {
            self.backend.url = Some(url.clone());
        }
        if let Some(anon_key) = &args.anon_key {
            self.backend.anon_key = Some(anon_key.clone());
        }
    }

    /// Returns the backend URL and key.
    ///
    /// # Errors
    /// Returns `ConfigError::MissingBackend` if either is unset or blank.
    pub fn backend_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let url = self
            .backend
            .url
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingBackend { field: "url" })?;
        let key = self
            .backend
            .anon_key
            .as_deref()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingBackend { field: "anon_key" })?;
        Ok((url, key))
    }

    /// Table names as used by the use cases.
    #[must_use]
    pub fn tables(&self) -> Tables {
        Tables::from(&self.tables)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("foodorder.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}
