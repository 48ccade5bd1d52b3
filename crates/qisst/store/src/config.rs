//! Qisst configuration
//!
//! Loaded from TOML. Every section is optional; a missing file yields the
//! default configuration.

use std::path::{Path, PathBuf};

use qisst_ledger::LedgerConfig;
use serde::{Deserialize, Serialize};

use crate::backend::{BlobStore, InMemoryStore, JsonFileStore};
use crate::error::{StoreError, StoreResult};
use crate::logging::LoggingConfig;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QisstConfig {
    /// Ledger behaviour
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Where the committee blobs live
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl QisstConfig {
    /// Load configuration from `path`, or from the default location when
    /// `path` is `None`.
    pub fn load(path: Option<&str>) -> StoreResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };
        Self::load_from(&config_path)
    }

    /// Load configuration from a file; a missing file yields the default.
    pub fn load_from(path: &Path) -> StoreResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> StoreResult<Self> {
        toml::from_str(contents).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// `<config_dir>/qisst/config.toml`
    pub fn default_config_path() -> StoreResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StoreError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("qisst").join("config.toml"))
    }
}

/// Storage backend selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageBackend {
    /// Nothing survives the process (tests, demos)
    Memory,

    /// One JSON file per blob
    File {
        /// Directory holding the blob files
        #[serde(default = "default_data_dir")]
        data_dir: PathBuf,
    },
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::File {
            data_dir: default_data_dir(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Prefix of the blob keys (`{prefix}_members`, ...)
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl StorageConfig {
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            ..Self::default()
        }
    }

    pub fn file(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::File {
                data_dir: data_dir.into(),
            },
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Build the configured backend
    pub fn open_store(&self) -> Box<dyn BlobStore> {
        match &self.backend {
            StorageBackend::Memory => Box::new(InMemoryStore::new()),
            StorageBackend::File { data_dir } => Box::new(JsonFileStore::new(data_dir.clone())),
        }
    }
}

fn default_key_prefix() -> String {
    "qisst".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("qisst"))
        .unwrap_or_else(|| PathBuf::from(".qisst"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qisst_ledger::RemovalPolicy;

    #[test]
    fn test_default_config() {
        let config = QisstConfig::default();
        assert_eq!(config.storage.key_prefix, "qisst");
        assert_eq!(config.ledger.removal_policy, RemovalPolicy::Tolerate);
        assert!(matches!(config.storage.backend, StorageBackend::File { .. }));
    }

    #[test]
    fn test_load_missing_config() {
        let config = QisstConfig::load(Some("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config, QisstConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = QisstConfig::from_toml(
            r#"
            [ledger]
            removal_policy = "cascade"

            [storage]
            key_prefix = "family"

            [storage.backend]
            type = "file"
            data_dir = "/var/lib/qisst"

            [logging]
            level = "debug"
            json = true
            "#,
        )
        .unwrap();

        assert_eq!(config.ledger.removal_policy, RemovalPolicy::Cascade);
        assert_eq!(config.storage.key_prefix, "family");
        assert_eq!(
            config.storage.backend,
            StorageBackend::File {
                data_dir: PathBuf::from("/var/lib/qisst")
            }
        );
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_memory_backend() {
        let config = QisstConfig::from_toml(
            r#"
            [storage.backend]
            type = "memory"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.key_prefix, "qisst");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let result = QisstConfig::from_toml("[ledger]\nremoval_policy = \"shred\"");
        assert!(matches!(result, Err(StoreError::Config(_))));
    }
}
