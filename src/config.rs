use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Timeout for the release page fetch in milliseconds (30 seconds).
/// The fetch must never be allowed to hang a scheduled run.
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// User agent sent with the release page fetch.
pub const USER_AGENT: &str = "release-watch";

/// Environment variable holding the SMTP password.
pub const SMTP_PASSWORD_ENV: &str = "RELEASE_WATCH_SMTP_PASSWORD";

/// Environment variable selecting the log format ("pretty" or "json").
pub const LOG_FORMAT_ENV: &str = "RELEASE_WATCH_LOG_FORMAT";

/// Release channel watched when no source URL is configured.
pub const DEFAULT_SOURCE_URL: &str = "https://kubernetes.io/releases/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Watcher configuration, loaded from a JSON file with every field optional.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub source: SourceConfig,
    pub store: StoreConfig,
    pub notify: NotifyConfig,
    pub smtp: SmtpConfig,
}

impl Config {
    /// Load configuration from `path`. A missing file is not an error, since
    /// the defaults describe a working read-only setup. An unreadable or
    /// invalid file is fatal.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Config::default());
            }
            Err(err) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            source: err,
        })
    }
}

/// Release source configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SourceConfig {
    /// Page listing the published releases.
    pub url: String,
    /// Human label for the watched artifact, used in the mail subject.
    pub artifact: String,
    /// Whether pre-release versions count as "latest" candidates.
    pub include_prerelease: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            artifact: "Kubernetes".to_string(),
            include_prerelease: false,
        }
    }
}

/// Version store configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    /// Store file location; `<data_dir>/last_release` when unset.
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    pub fn path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(store_path)
    }
}

/// Notification content configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct NotifyConfig {
    /// HTML template rendered into the mail body.
    pub template: PathBuf,
    /// The release the consuming project is currently aligned to; rendered
    /// into the mail body verbatim, never compared.
    pub aligned_version: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from("templates/notification.html"),
            aligned_version: "unknown".to_string(),
        }
    }
}

/// Mail transport configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SmtpConfig {
    /// SMTP server host name.
    pub host: String,
    /// Overrides the TLS mode's default port when set.
    pub port: Option<u16>,
    pub tls: TlsMode,
    /// SMTP username; when set the password must be supplied via
    /// `RELEASE_WATCH_SMTP_PASSWORD`.
    pub username: Option<String>,
    /// Sender address.
    pub from: String,
    /// Fixed recipient set; at least one address is required to send.
    pub recipients: Vec<String>,
}

/// TLS mode of the SMTP session
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Implicit TLS from the first byte (SMTPS, port 465).
    #[default]
    Implicit,
    /// Plaintext session upgraded via STARTTLS (port 587).
    Starttls,
    /// No TLS at all; only sensible for a localhost relay.
    None,
}

/// Returns the path to the data directory for release-watch.
/// Uses $XDG_DATA_HOME/release-watch if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/release-watch,
/// or ./release-watch if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the default location of the last-release record.
pub fn store_path() -> PathBuf {
    data_dir().join("last_release")
}

/// Returns the default config file path
/// ($XDG_CONFIG_HOME or ~/.config, plus release-watch/config.json).
pub fn config_path() -> PathBuf {
    config_path_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("release-watch")
}

fn config_path_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("release-watch").join("config.json")
}
