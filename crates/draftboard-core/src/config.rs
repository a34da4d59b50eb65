// Configuration loading and parsing (draftboard.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Name of the configuration file inside a `config/` directory.
pub const CONFIG_FILE: &str = "draftboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workbook: WorkbookConfig,
    #[serde(default)]
    pub columns: ColumnConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorkbookConfig {
    /// Directory holding one CSV file per category.
    pub path: PathBuf,
    /// Category shown at startup and listed first.
    pub default_category: String,
}

impl Default for WorkbookConfig {
    fn default() -> Self {
        WorkbookConfig {
            path: PathBuf::from("data/workbook"),
            default_category: "Overall".to_string(),
        }
    }
}

/// Header names of the columns the tracker depends on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub name: String,
    pub rank: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        ColumnConfig {
            name: "PLAYER NAME".to_string(),
            rank: "RK".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate a config file at an explicit path.
///
/// A relative `workbook.path` is resolved against the directory that contains
/// the `config/` directory, so `config/draftboard.toml` pointing at
/// `data/workbook` finds `<base>/data/workbook`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let mut config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;

    if config.workbook.path.is_relative() {
        if let Some(base) = base_dir_of(path) {
            config.workbook.path = base.join(&config.workbook.path);
        }
    }
    Ok(config)
}

/// Locate and load the configuration.
///
/// Search order: `./config/draftboard.toml`, then the platform config
/// directory. When neither exists the built-in defaults are used.
pub fn load_config() -> Result<Config, ConfigError> {
    for candidate in config_search_paths() {
        if candidate.is_file() {
            info!("Loading config from {}", candidate.display());
            return load_config_from(&candidate);
        }
    }
    info!("No {} found, using defaults", CONFIG_FILE);
    let config = Config::default();
    validate(&config)?;
    Ok(config)
}

/// Candidate config file locations in priority order.
pub fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("config").join(CONFIG_FILE));
    }
    if let Some(dirs) = directories::ProjectDirs::from("", "", "draftboard") {
        paths.push(dirs.config_dir().join(CONFIG_FILE));
    }
    paths
}

/// For `<base>/config/draftboard.toml` return `<base>`; otherwise the file's
/// own directory.
fn base_dir_of(path: &Path) -> Option<&Path> {
    let dir = path.parent()?;
    if dir.file_name().is_some_and(|n| n == "config") {
        dir.parent()
    } else {
        Some(dir)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.workbook.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "workbook.path".into(),
            message: "must not be empty".into(),
        });
    }

    let column_fields: &[(&str, &str)] = &[
        ("columns.name", config.columns.name.as_str()),
        ("columns.rank", config.columns.rank.as_str()),
    ];
    for (field, value) in column_fields {
        if value.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: field.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    if config.columns.name.trim().eq_ignore_ascii_case(config.columns.rank.trim()) {
        return Err(ConfigError::ValidationError {
            field: "columns.rank".into(),
            message: "must differ from columns.name".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
