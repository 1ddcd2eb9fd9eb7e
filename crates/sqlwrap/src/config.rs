//! Store configuration.
//!
//! `StoreConfig` carries everything needed to locate and open database files.
//! Environment overrides are read by [`StoreConfig::from_env`]:
//!
//! - `SQLWRAP_DATA_DIR`: data directory (default `./data`)
//! - `SQLWRAP_DATABASE`: database file name used when a table names none
//! - `SQLWRAP_BUSY_TIMEOUT_MS`: SQLite busy timeout in milliseconds

use crate::connector::ConnectOptions;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

pub const DATA_DIR_ENV: &str = "SQLWRAP_DATA_DIR";
pub const DATABASE_ENV: &str = "SQLWRAP_DATABASE";
pub const BUSY_TIMEOUT_ENV: &str = "SQLWRAP_BUSY_TIMEOUT_MS";

static DEFAULT_DATABASE: RwLock<Option<String>> = RwLock::new(None);

/// Set the process-wide default database name.
///
/// Tables declared without a database use this name.
pub fn set_default_database(name: impl Into<String>) {
    let mut slot = DEFAULT_DATABASE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    *slot = Some(name.into());
}

/// The process-wide default database name, if any.
pub fn default_database() -> Option<String> {
    DEFAULT_DATABASE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// The first database a table names becomes the default when none is set.
pub(crate) fn remember_database(name: &str) {
    let mut slot = DEFAULT_DATABASE
        .write()
        .unwrap_or_else(PoisonError::into_inner);
    if slot.is_none() {
        *slot = Some(name.to_string());
    }
}

/// Configuration for locating and opening database files.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding database files and CSV exports.
    pub data_dir: PathBuf,
    /// Database used when neither the table nor the process default names one.
    pub default_database: Option<String>,
    /// How long SQLite waits on a locked file before failing.
    pub busy_timeout: Duration,
    /// Enforce foreign key constraints on every connection.
    pub foreign_keys: bool,
    /// Truncate logged SQL to this many bytes. `None` logs the full statement.
    pub max_sql_log_length: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            default_database: None,
            busy_timeout: Duration::from_secs(5),
            foreign_keys: true,
            max_sql_log_length: Some(200),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `SQLWRAP_*` environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(name) = std::env::var(DATABASE_ENV) {
            if !name.is_empty() {
                config.default_database = Some(name);
            }
        }
        if let Ok(raw) = std::env::var(BUSY_TIMEOUT_ENV) {
            match raw.parse::<u64>() {
                Ok(ms) => config.busy_timeout = Duration::from_millis(ms),
                Err(e) => tracing::warn!(
                    target: "sqlwrap.config",
                    value = %raw,
                    error = %e,
                    "ignoring invalid {}",
                    BUSY_TIMEOUT_ENV
                ),
            }
        }

        config
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn default_database(mut self, name: impl Into<String>) -> Self {
        self.default_database = Some(name.into());
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    pub fn max_sql_log_length(mut self, len: usize) -> Self {
        self.max_sql_log_length = Some(len);
        self
    }

    pub fn no_sql_truncate(mut self) -> Self {
        self.max_sql_log_length = None;
        self
    }

    /// Database name for a table: explicit, then config default, then process default.
    pub(crate) fn resolve_database(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(str::to_string)
            .or_else(|| self.default_database.clone())
            .or_else(default_database)
    }

    pub(crate) fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            busy_timeout: self.busy_timeout,
            foreign_keys: self.foreign_keys,
            max_sql_log_length: self.max_sql_log_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_database_wins() {
        let config = StoreConfig::new().default_database("fallback.db");
        assert_eq!(
            config.resolve_database(Some("explicit.db")).as_deref(),
            Some("explicit.db")
        );
        assert_eq!(config.resolve_database(None).as_deref(), Some("fallback.db"));
    }

    #[test]
    fn builder_setters() {
        let config = StoreConfig::new()
            .data_dir("/tmp/sqlwrap")
            .busy_timeout(Duration::from_millis(250))
            .foreign_keys(false)
            .no_sql_truncate();
        let options = config.connect_options();
        assert_eq!(options.busy_timeout, Duration::from_millis(250));
        assert!(!options.foreign_keys);
        assert_eq!(options.max_sql_log_length, None);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/sqlwrap"));
    }
}
