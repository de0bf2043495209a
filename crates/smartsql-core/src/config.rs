//! Configuration schema (smartsql.toml)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// SQL dialect used when tokenizing queries for the keyword guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectConfig {
    /// SQLite, the engine soups are stored in
    Sqlite,

    /// PostgreSQL SQL dialect
    Postgres,

    /// Generic ANSI SQL
    Generic,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self::Sqlite
    }
}

/// How mutating statements are detected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardMode {
    /// Reject if `insert`, `update` or `delete` appears anywhere (case-insensitive)
    Substring,

    /// Reject only unquoted `INSERT`, `UPDATE` or `DELETE` keyword tokens
    Keyword,
}

impl Default for GuardMode {
    fn default() -> Self {
        Self::Substring
    }
}

/// Translator options
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Statement guard mode
    #[serde(default)]
    pub guard: GuardMode,

    /// Also check that the soup exists for `{soup:}` references
    #[serde(default)]
    pub validate_whole_document_soup: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQL dialect
    #[serde(default)]
    pub dialect: DialectConfig,

    /// Default catalog snapshot (JSON or TOML), relative to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Translator options
    #[serde(default)]
    pub translator: TranslatorConfig,

    /// Project root path (for resolving relative paths)
    #[serde(skip)]
    pub project_root: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dialect: DialectConfig::default(),
            catalog: None,
            translator: TranslatorConfig::default(),
            project_root: std::env::current_dir().unwrap_or_default(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        // Set project root to parent of config file
        if let Some(parent) = path.parent() {
            config.project_root = parent.to_path_buf();
        }

        Ok(config)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Catalog path resolved against the project root
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.as_ref().map(|path| {
            if path.is_relative() {
                self.project_root.join(path)
            } else {
                path.clone()
            }
        })
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
