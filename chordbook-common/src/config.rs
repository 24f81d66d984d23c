//! Configuration loading and root folder resolution
//!
//! Bootstrap configuration comes from an optional TOML file. A missing or
//! unreadable file is not fatal: a warning is logged and compiled defaults
//! are used.
//!
//! Resolution priority (both for the config file and the root folder):
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file / platform config directory
//! 4. OS-dependent compiled default (fallback)

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable naming the TOML config file
pub const CONFIG_ENV_VAR: &str = "CHORDBOOK_CONFIG";
/// Environment variable naming the root (data) folder
pub const ROOT_FOLDER_ENV_VAR: &str = "CHORDBOOK_ROOT_FOLDER";
/// Database file name inside the root folder
pub const DATABASE_FILE_NAME: &str = "chordbook.db";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ChordbookConfig {
    /// Folder holding the database (see [`ChordbookConfig::resolve_root_folder`])
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// HTTP bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Default result sizes used when a request does not specify `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_recommendations")]
    pub recommendations: usize,
    #[serde(default = "default_trending")]
    pub trending: usize,
    #[serde(default = "default_similar")]
    pub similar: usize,
    /// Catalog listing page size
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5790
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_recommendations() -> usize {
    5
}

fn default_trending() -> usize {
    10
}

fn default_similar() -> usize {
    5
}

fn default_page_size() -> usize {
    20
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            recommendations: default_recommendations(),
            trending: default_trending(),
            similar: default_similar(),
            page_size: default_page_size(),
        }
    }
}

impl Default for ChordbookConfig {
    fn default() -> Self {
        Self {
            root_folder: None,
            host: default_host(),
            port: default_port(),
            logging: LoggingConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

impl ChordbookConfig {
    /// Parse configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ChordbookConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration following the priority order, never failing
    ///
    /// `cli_path` is the `--config` argument if given. Errors reading or
    /// parsing the file are logged and compiled defaults are returned.
    pub fn load(cli_path: Option<&Path>) -> Self {
        let Some(path) = resolve_config_path(cli_path) else {
            info!("No config file found, using built-in defaults");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!(
                    "Failed to load config file {}: {} (using built-in defaults)",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Reject values that would make the service unusable
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(Error::Config("port must be non-zero".to_string()));
        }
        if self.limits.page_size == 0 {
            return Err(Error::Config("limits.page_size must be positive".to_string()));
        }
        for (name, value) in [
            ("limits.recommendations", self.limits.recommendations),
            ("limits.trending", self.limits.trending),
            ("limits.similar", self.limits.similar),
        ] {
            if value == 0 {
                return Err(Error::Config(format!("{} must be positive", name)));
            }
        }
        Ok(())
    }

    /// Root folder: CLI argument > environment variable > TOML > OS default
    pub fn resolve_root_folder(&self, cli_arg: Option<&Path>) -> PathBuf {
        if let Some(path) = cli_arg {
            return path.to_path_buf();
        }
        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV_VAR) {
            if !path.trim().is_empty() {
                return PathBuf::from(path);
            }
        }
        if let Some(path) = &self.root_folder {
            return path.clone();
        }
        default_root_folder()
    }
}

/// Config file path: CLI argument > environment variable > platform config dir
///
/// Only the platform default is checked for existence; explicitly named files
/// are returned as-is so a missing file is reported when loading.
pub fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    let user_config = dirs::config_dir().map(|d| d.join("chordbook").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/chordbook/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("chordbook"))
        .unwrap_or_else(|| PathBuf::from("./chordbook_data"))
}

/// Database file inside a root folder
pub fn database_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DATABASE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ChordbookConfig::from_toml_str("").unwrap();
        assert_eq!(config.port, 5790);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.limits, LimitsConfig::default());
        assert!(config.root_folder.is_none());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = ChordbookConfig::from_toml_str(
            r#"
            port = 8080
            root_folder = "/srv/chordbook"

            [limits]
            trending = 25
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.root_folder, Some(PathBuf::from("/srv/chordbook")));
        assert_eq!(config.limits.trending, 25);
        assert_eq!(config.limits.recommendations, 5);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            ChordbookConfig::from_toml_str("port = 0"),
            Err(Error::Config(_))
        ));
        assert!(ChordbookConfig::from_toml_str("[limits]\npage_size = 0").is_err());
        assert!(ChordbookConfig::from_toml_str("port = \"abc\"").is_err());
    }

    #[test]
    fn test_database_path() {
        let path = database_path(Path::new("/tmp/cb"));
        assert_eq!(path, PathBuf::from("/tmp/cb/chordbook.db"));
    }
}
