//! Dashboard configuration file support.
//!
//! Settings are read from a TOML file and then overridden by environment
//! variables. Every field has a default matching the stock CCH workbook, so a
//! missing config file is not an error.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::navigation::{DEFAULT_IDLE_MINUTES, DEFAULT_MAX_SESSIONS};

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value '{value}' for environment variable {key}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub site: SiteSettings,
}

/// Where the listings come from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    #[serde(default = "default_sheet")]
    pub sheet: String,
    /// Spreadsheet column range, e.g. `A:J`.
    #[serde(default = "default_columns")]
    pub columns: String,
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

/// HTTP bind settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Minutes of inactivity after which a browser session is forgotten.
    #[serde(default = "default_session_idle_minutes")]
    pub session_idle_minutes: u32,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

/// Page chrome: title, logo, footer attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_logo_path")]
    pub logo_path: PathBuf,
    #[serde(default = "default_author")]
    pub author: String,
    #[serde(default = "default_website")]
    pub website: String,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("CCH1.0.xlsx")
}

fn default_sheet() -> String {
    "Raw data".to_string()
}

fn default_columns() -> String {
    "A:J".to_string()
}

fn default_max_rows() -> usize {
    100
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_session_idle_minutes() -> u32 {
    DEFAULT_IDLE_MINUTES
}

fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

fn default_title() -> String {
    "CCH Data Visualization".to_string()
}

fn default_logo_path() -> PathBuf {
    PathBuf::from("CCH logo.png")
}

fn default_author() -> String {
    "Daniel Kioko".to_string()
}

fn default_website() -> String {
    "https://coventrycentralhall.co.uk/".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            sheet: default_sheet(),
            columns: default_columns(),
            max_rows: default_max_rows(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_idle_minutes: default_session_idle_minutes(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            logo_path: default_logo_path(),
            author: default_author(),
            website: default_website(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from the default locations.
    ///
    /// Uses `CCH_CONFIG` when set, otherwise the first `dashboard.toml` found in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to defaults when no file exists. Environment overrides are
    /// applied last.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("CCH_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => {
                let search_paths = [
                    PathBuf::from("dashboard.toml"),
                    PathBuf::from("backend/dashboard.toml"),
                    PathBuf::from("../dashboard.toml"),
                ];
                match search_paths.iter().find(|p| p.exists()) {
                    Some(path) => {
                        log::info!("Using config file {}", path.display());
                        Self::from_file(path)?
                    }
                    None => {
                        log::info!("No dashboard.toml found, using defaults");
                        Self::default()
                    }
                }
            }
        };
        config.apply_env_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `CCH_DATA_PATH`, `CCH_SHEET`, `CCH_LOGO_PATH`, `HOST` and `PORT`.
    ///
    /// The lookup is injected so tests do not have to touch process env.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("CCH_DATA_PATH") {
            self.source.path = PathBuf::from(path);
        }
        if let Some(sheet) = lookup("CCH_SHEET") {
            self.source.sheet = sheet;
        }
        if let Some(logo) = lookup("CCH_LOGO_PATH") {
            self.site.logo_path = PathBuf::from(logo);
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidEnv { key: "PORT", value: port })?;
        }
        Ok(())
    }
}
