//! Configuration loading
//!
//! Bootstrap settings come from an optional TOML file. Each setting resolves
//! in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (bound to the same argument by the CLI parser)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error: the defaults are used.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default source dataset
pub const DEFAULT_DATA_FILE: &str = "data/canadianCheeseDirectory.csv";
/// Default persist target
pub const DEFAULT_OUTPUT_FILE: &str = "cheese_directory_output.csv";
/// Default mirror database
pub const DEFAULT_DATABASE_PATH: &str = "./cheesedir.db";
/// Default number of source rows to load
pub const DEFAULT_RECORD_LIMIT: usize = 10000;

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Source CSV in the 30-column bilingual layout
    pub data_file: PathBuf,

    /// Target of the persist operation
    pub output_file: PathBuf,

    /// Maximum number of data rows read on load/reload
    pub record_limit: usize,

    pub mirror: MirrorConfig,

    pub logging: LoggingConfig,
}

/// Mirror database configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// When false, all reads and writes use the in-memory store only
    pub enabled: bool,

    pub database_path: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    pub file: Option<PathBuf>,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            record_limit: DEFAULT_RECORD_LIMIT,
            mirror: MirrorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Command-line (or environment) overrides
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    pub record_limit: Option<usize>,
    pub disable_mirror: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Apply overrides on top of file/default values
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(path) = overrides.data_file {
            self.data_file = path;
        }
        if let Some(path) = overrides.output_file {
            self.output_file = path;
        }
        if let Some(path) = overrides.database_path {
            self.mirror.database_path = path;
        }
        if let Some(limit) = overrides.record_limit {
            self.record_limit = limit;
        }
        if overrides.disable_mirror {
            self.mirror.enabled = false;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        self
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Platform config file location, if one exists
///
/// `<config dir>/cheesedir/config.toml`, e.g. `~/.config/cheesedir/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join("cheesedir").join("config.toml"))
        .filter(|p| p.exists())
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File named on the command line or in the environment
    Explicit(PathBuf),
    /// File found in the platform config directory
    Platform(PathBuf),
    /// No file: compiled defaults
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Platform(path) => {
                write!(f, "{}", path.display())
            }
            ConfigSource::Defaults => write!(f, "compiled defaults"),
        }
    }
}

/// Load the configuration file
///
/// An explicitly requested file must exist and parse. Without one, the
/// platform file is used if present; otherwise compiled defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    if let Some(path) = explicit {
        let config = load_toml_config(path)?;
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    match default_config_path() {
        Some(path) => {
            let config = load_toml_config(&path)?;
            Ok((config, ConfigSource::Platform(path)))
        }
        None => Ok((TomlConfig::default(), ConfigSource::Defaults)),
    }
}
