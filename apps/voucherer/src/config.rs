//! # Settings
//!
//! Startup configuration, built once and passed into [`crate::state::AppState`].
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line (highest priority)                                    │
//! │     --port 9000, --no-browser                                          │
//! │                                                                         │
//! │  2. YAML Config File                                                   │
//! │     ./config.yaml (written with defaults on first start)               │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     port 8080, open browser, database.sqlite, log.txt                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```yaml
//! port: 8080
//! open_browser_automatically: true
//! database_path: database.sqlite
//! log_path: log.txt
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// Settings
// =============================================================================

/// Runtime settings for the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Port to listen on (bound on localhost).
    pub port: u16,

    /// Launch the system browser at the server URL after binding.
    pub open_browser_automatically: bool,

    /// SQLite database file.
    pub database_path: PathBuf,

    /// Log file, truncated at startup.
    pub log_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            port: DEFAULT_PORT,
            open_browser_automatically: true,
            database_path: PathBuf::from("database.sqlite"),
            log_path: PathBuf::from("log.txt"),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub no_browser: bool,
}

impl Settings {
    /// Loads settings from `path`, writing a default file first if none exists.
    ///
    /// ## Errors
    /// Returns [`SettingsError`] if the file cannot be written or read, is
    /// not valid YAML, or holds values of the wrong type. All are fatal at
    /// startup.
    pub fn load(path: &Path, overrides: &Overrides) -> Result<Self, SettingsError> {
        write_default_if_missing(path)?;

        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("port", i64::from(defaults.port))?
            .set_default(
                "open_browser_automatically",
                defaults.open_browser_automatically,
            )?
            .set_default(
                "database_path",
                defaults.database_path.to_string_lossy().into_owned(),
            )?
            .set_default("log_path", defaults.log_path.to_string_lossy().into_owned())?
            .add_source(File::from(path).format(FileFormat::Yaml).required(true));

        if let Some(port) = overrides.port {
            builder = builder.set_override("port", i64::from(port))?;
        }
        if overrides.no_browser {
            builder = builder.set_override("open_browser_automatically", false)?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Address the server binds to.
    pub fn listen_address(&self) -> String {
        format!("localhost:{}", self.port)
    }

    /// URL opened in the browser.
    pub fn url(&self) -> String {
        format!("http://{}", self.listen_address())
    }
}

/// Writes the default settings to `path` unless a file is already there.
fn write_default_if_missing(path: &Path) -> Result<(), SettingsError> {
    if path.exists() {
        return Ok(());
    }

    let yaml = serde_yaml::to_string(&Settings::default())?;
    fs::write(path, yaml).map_err(|source| SettingsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// =============================================================================
// Errors
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to write default config to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize default config: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to read config file: {0}")]
    Read(#[from] config::ConfigError),
}

// =============================================================================
// Unit Tests
// =============================================================================
