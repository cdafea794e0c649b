//! Configuration management for kitchen.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::backend::DemoLatency;
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "shirleys-kitchen";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "kitchen.db";

/// Prefix every plausible remote API key starts with.
pub const API_KEY_PREFIX: &str = "AIza";

/// Upper bound for simulated demo latency.
const MAX_DEMO_LATENCY_MS: u64 = 10_000;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `KITCHEN_`, sections split by `__`)
/// 2. The bare `API_KEY` environment variable (remote credential only)
/// 3. TOML config file at `~/.config/shirleys-kitchen/config.toml`
/// 4. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote document store configuration.
    pub remote: RemoteConfig,
    /// Demo store configuration.
    pub demo: DemoConfig,
    /// Local client state configuration.
    pub storage: StorageConfig,
}

/// Remote document store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// API key for the remote store. Absent or implausible keys mean the
    /// catalog runs in demo mode without ever contacting the remote store.
    pub api_key: Option<String>,
    /// Project that owns the document database.
    pub project_id: String,
    /// Name of the recipe collection.
    pub collection: String,
    /// Base URL of the REST API.
    pub base_url: String,
}

/// Demo store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated latency of a read, in milliseconds.
    pub read_latency_ms: u64,
    /// Simulated latency of a write, in milliseconds.
    pub write_latency_ms: u64,
}

/// Local client state configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the client state database (favorites).
    /// Defaults to `~/.local/share/shirleys-kitchen/kitchen.db`
    pub database_path: Option<PathBuf>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            project_id: "shirleys-kitchen".to_string(),
            collection: "recipes".to_string(),
            base_url: "https://firestore.googleapis.com/v1".to_string(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        let latency = DemoLatency::default();
        Self {
            read_latency_ms: u64::try_from(latency.read.as_millis()).unwrap_or(u64::MAX),
            write_latency_ms: u64::try_from(latency.write.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

impl RemoteConfig {
    /// Check whether the API key looks like one the remote store would
    /// accept. This is a prefix heuristic, not validation.
    #[must_use]
    pub fn credential_is_plausible(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| key.starts_with(API_KEY_PREFIX))
    }

    /// URL of the recipe collection.
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}",
            self.base_url.trim_end_matches('/'),
            self.project_id,
            self.collection
        )
    }
}

impl DemoConfig {
    /// The simulated latency as a [`DemoLatency`].
    #[must_use]
    pub fn latency(&self) -> DemoLatency {
        DemoLatency {
            read: Duration::from_millis(self.read_latency_ms),
            write: Duration::from_millis(self.write_latency_ms),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(
                Env::raw()
                    .only(&["API_KEY"])
                    .map(|_| "remote.api_key".into()),
            )
            .merge(Env::prefixed("KITCHEN_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.remote.project_id.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "remote.project_id must not be empty".to_string(),
            });
        }

        if self.remote.collection.trim().is_empty() || self.remote.collection.contains('/') {
            return Err(Error::ConfigValidation {
                message: format!(
                    "remote.collection must be a single non-empty name, got {:?}",
                    self.remote.collection
                ),
            });
        }

        if !(self.remote.base_url.starts_with("https://")
            || self.remote.base_url.starts_with("http://"))
        {
            return Err(Error::ConfigValidation {
                message: format!(
                    "remote.base_url must be an http(s) URL, got {}",
                    self.remote.base_url
                ),
            });
        }

        for (name, value) in [
            ("read_latency_ms", self.demo.read_latency_ms),
            ("write_latency_ms", self.demo.write_latency_ms),
        ] {
            if value > MAX_DEMO_LATENCY_MS {
                return Err(Error::ConfigValidation {
                    message: format!(
                        "demo.{name} ({value}) cannot exceed {MAX_DEMO_LATENCY_MS}"
                    ),
                });
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// A copy safe to print: the API key is masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.remote.api_key = config.remote.api_key.as_deref().map(mask_key);
        config
    }
}

/// Keep the key prefix visible and hide the rest.
fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(API_KEY_PREFIX.len()).collect();
    format!("{visible}****")
}
