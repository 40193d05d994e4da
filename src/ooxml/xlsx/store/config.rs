//! Cell store configuration.
//!
//! ```yaml
//! backend:
//!   redis:
//!     address: 127.0.0.1:6379
//!     command_timeout_ms: 500
//! purge_on_close: true
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{CellStore, KeyValueCellStore};
use crate::ooxml::error::{OoxmlError, Result};

/// Builds a fresh cell store; one is called per sheet.
pub type CellStoreConstructor = Box<dyn Fn() -> Result<Box<dyn CellStore>> + Send + Sync>;

/// Redis connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedisOptions {
    /// `host:port` or a full `redis://` URL
    pub address: String,
    /// Read/write timeout per command in milliseconds (0 = none)
    #[serde(default)]
    pub command_timeout_ms: u64,
    /// Connect timeout in milliseconds (0 = none)
    #[serde(default)]
    pub dial_timeout_ms: u64,
}

impl RedisOptions {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            command_timeout_ms: 0,
            dial_timeout_ms: 0,
        }
    }

    /// Connection URL, adding the `redis://` scheme to a bare address.
    pub fn url(&self) -> String {
        if self.address.contains("://") {
            self.address.clone()
        } else {
            format!("redis://{}", self.address)
        }
    }

    pub fn command_timeout(&self) -> Option<Duration> {
        (self.command_timeout_ms > 0).then(|| Duration::from_millis(self.command_timeout_ms))
    }

    pub fn dial_timeout(&self) -> Option<Duration> {
        (self.dial_timeout_ms > 0).then(|| Duration::from_millis(self.dial_timeout_ms))
    }
}

/// Where rows and cells are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendConfig {
    /// Process memory
    #[default]
    Memory,
    /// Files under `path`, or a scratch directory when unset
    Disk {
        #[serde(default)]
        path: Option<PathBuf>,
    },
    /// A Redis server
    Redis(RedisOptions),
}

fn default_purge_on_close() -> bool {
    true
}

/// Cell store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStoreConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    /// Delete the sheet's stored rows and cells on close
    #[serde(default = "default_purge_on_close")]
    pub purge_on_close: bool,
}

impl Default for CellStoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            purge_on_close: default_purge_on_close(),
        }
    }
}

impl CellStoreConfig {
    /// Parse settings from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| OoxmlError::Config(e.to_string()))
    }

    /// Build a store from these settings.
    pub fn open(&self) -> Result<Box<dyn CellStore>> {
        let store = match &self.backend {
            BackendConfig::Memory => KeyValueCellStore::memory(),
            BackendConfig::Disk { path } => open_disk(path.as_deref())?,
            BackendConfig::Redis(options) => open_redis(options)?,
        };
        Ok(Box::new(store.with_purge_on_close(self.purge_on_close)))
    }

    /// A constructor opening a new store from these settings on every call.
    pub fn constructor(&self) -> CellStoreConstructor {
        let config = self.clone();
        Box::new(move || config.open())
    }
}

#[cfg(feature = "disk")]
fn open_disk(path: Option<&std::path::Path>) -> Result<KeyValueCellStore> {
    KeyValueCellStore::disk(path)
}

#[cfg(not(feature = "disk"))]
fn open_disk(_path: Option<&std::path::Path>) -> Result<KeyValueCellStore> {
    Err(OoxmlError::Config(
        "disk cell store requires the `disk` feature".to_string(),
    ))
}

#[cfg(feature = "redis")]
fn open_redis(options: &RedisOptions) -> Result<KeyValueCellStore> {
    KeyValueCellStore::redis(options)
}

#[cfg(not(feature = "redis"))]
fn open_redis(_options: &RedisOptions) -> Result<KeyValueCellStore> {
    Err(OoxmlError::Config(
        "redis cell store requires the `redis` feature".to_string(),
    ))
}
