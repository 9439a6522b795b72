use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::os::OsFamily;

// =============================================================================
// Metadata source constants
// =============================================================================

/// Location of the distro-info CSV installed by the `distro-info-data` package
pub const DEFAULT_DISTRO_INFO_PATH: &str = "/usr/share/distro-info/ubuntu.csv";

/// Oldest release loaded from distro-info (precise)
pub const DEFAULT_MIN_VERSION: &str = "12.04";

/// Location of the os-release file used for host detection
pub const OS_RELEASE_PATH: &str = "/etc/os-release";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SeriesConfig {
    pub source: SourceConfig,
    /// Distribution family described by the metadata source
    pub family: OsFamily,
    /// Overrides host detection when set
    pub host: Option<OsFamily>,
    /// Rows with an older version are dropped on refresh; `null` keeps everything
    pub min_version: Option<String>,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            family: OsFamily::Ubuntu,
            host: None,
            min_version: Some(DEFAULT_MIN_VERSION.to_string()),
        }
    }
}

impl SeriesConfig {
    /// Load configuration from a JSON file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Apply command-line overrides; values that are `None` leave the loaded config alone.
    pub fn with_overrides(mut self, source: Option<PathBuf>, host: Option<OsFamily>) -> Self {
        if let Some(path) = source {
            self.source.path = path;
        }
        if host.is_some() {
            self.host = host;
        }
        self
    }
}

/// Metadata source configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DISTRO_INFO_PATH),
        }
    }
}

/// Directory holding distro-series state: `$XDG_DATA_HOME/distro-series`, then
/// `~/.local/share/distro-series`, then `./distro-series`.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// JSON-lines log written when the CLI runs with `--log-file`.
pub fn log_path() -> PathBuf {
    data_dir().join("distro-series.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("distro-series")
}
