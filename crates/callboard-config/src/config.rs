// crates/callboard-config/src/config.rs
// ============================================================================
// Module: Callboard Configuration Model
// Description: Typed configuration with strict load and validation guards.
// Purpose: Fail closed on malformed configuration before serving requests.
// Dependencies: callboard-core, callboard-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! The configuration model mirrors the deployment surface: an HTTP server
//! section, a store section selecting the memory or `SQLite` backend, a mail
//! section selecting the outbox or stderr sink, and CFP defaults. Input
//! guards run before parsing; validation runs before the server binds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use callboard_core::Locale;
use callboard_store_sqlite::SqliteStoreMode;
use callboard_store_sqlite::SqliteSyncMode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted config file size in bytes.
const MAX_CONFIG_BYTES: u64 = 1024 * 1024;
/// Maximum length of a single config path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total config path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default request body cap in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 256 * 1024;
/// Default `SQLite` busy timeout in milliseconds.
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration load and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("config read error: {0}")]
    Read(String),
    /// Parsing the config payload failed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The configuration is structurally invalid.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// HTTP server section.
///
/// # Invariants
/// - `bind` parses as a socket address.
/// - `max_body_bytes` is greater than zero.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    pub bind: String,
    /// Maximum allowed request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8200".to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Store backend selection.
///
/// # Invariants
/// - Variants are stable for configuration parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreType {
    /// In-memory store (development and tests).
    #[default]
    Memory,
    /// Durable `SQLite` store.
    Sqlite,
}

/// Store section.
///
/// # Invariants
/// - `path` is required when `store_type` is `sqlite`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Selected store backend.
    #[serde(rename = "type", default)]
    pub store_type: StoreType,
    /// Database file path for the `SQLite` backend.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// `SQLite` busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_type: StoreType::default(),
            path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Mail sink selection.
///
/// # Invariants
/// - Variants are stable for configuration parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MailSinkType {
    /// In-memory outbox (development and tests).
    #[default]
    Outbox,
    /// Stderr audit sink.
    Stderr,
}

/// Mail section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MailConfig {
    /// Selected mail sink.
    #[serde(default)]
    pub sink: MailSinkType,
}

/// CFP defaults section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CfpConfig {
    /// Fallback locale when an event carries none.
    #[serde(default)]
    pub default_locale: Locale,
}

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Root Callboard configuration.
///
/// # Invariants
/// - `validate` passes before the server binds.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct CallboardConfig {
    /// HTTP server section.
    #[serde(default)]
    pub server: ServerConfig,
    /// Store section.
    #[serde(default)]
    pub store: StoreConfig,
    /// Mail section.
    #[serde(default)]
    pub mail: MailConfig,
    /// CFP defaults section.
    #[serde(default)]
    pub cfp: CfpConfig,
}

impl CallboardConfig {
    /// Loads configuration from an optional TOML file.
    ///
    /// Passing `None` yields the defaults. Loading is strict: oversized
    /// files, non-UTF-8 payloads, and unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                check_path(path)?;
                let metadata = std::fs::metadata(path)
                    .map_err(|err| ConfigError::Read(format!("config stat failed: {err}")))?;
                if metadata.len() > MAX_CONFIG_BYTES {
                    return Err(ConfigError::Read("config file exceeds size limit".to_string()));
                }
                let bytes = std::fs::read(path)
                    .map_err(|err| ConfigError::Read(format!("config read failed: {err}")))?;
                let text = String::from_utf8(bytes)
                    .map_err(|_| ConfigError::Read("config file must be utf-8".to_string()))?;
                toml::from_str::<Self>(&text)
                    .map_err(|err| ConfigError::Parse(err.to_string()))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a section is inconsistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "bind address is not a socket address: {}",
                self.server.bind
            )));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Invalid("max_body_bytes must be greater than zero".to_string()));
        }
        if self.store.store_type == StoreType::Sqlite && self.store.path.is_none() {
            return Err(ConfigError::Invalid("sqlite store requires a path".to_string()));
        }
        if self.store.busy_timeout_ms == 0 {
            return Err(ConfigError::Invalid("busy_timeout_ms must be greater than zero".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the default request body cap.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Returns the default `SQLite` busy timeout.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

/// Applies path length guards before touching the filesystem.
fn check_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Read("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Read("config path component too long".to_string()));
        }
    }
    Ok(())
}
