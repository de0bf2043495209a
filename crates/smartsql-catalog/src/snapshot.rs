//! Catalog snapshot files (JSON or TOML)

use crate::memory::SoupCatalog;
use serde::{Deserialize, Serialize};
use smartsql_core::SoupSpec;
use std::path::Path;

/// Serializable list of soups with their physical names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub soups: Vec<SoupSpec>,
}

/// Errors that can occur when loading or building a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Duplicate soup: {0}")]
    DuplicateSoup(String),

    #[error("Duplicate index on {path} in soup {soup}")]
    DuplicateIndex { soup: String, path: String },
}

/// Snapshot file format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SnapshotFormat {
    Json,
    Toml,
}

impl SnapshotFormat {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

impl SoupCatalog {
    /// Load a catalog from a JSON snapshot string
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    /// Load a catalog from a TOML snapshot string
    pub fn from_toml(toml: &str) -> Result<Self, CatalogError> {
        let snapshot: CatalogSnapshot = toml::from_str(toml)
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    /// Load a catalog from a snapshot file
    ///
    /// `.toml` files are read as TOML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::IoError(format!("{}: {}", path.display(), e)))?;

        let catalog = match SnapshotFormat::from_path(path) {
            SnapshotFormat::Toml => Self::from_toml(&contents)?,
            SnapshotFormat::Json => Self::from_json(&contents)?,
        };

        tracing::debug!(path = %path.display(), soups = catalog.len(), "loaded catalog snapshot");
        Ok(catalog)
    }

    /// Save the catalog as a snapshot file
    pub fn save_to_file(&self, path: &Path) -> Result<(), CatalogError> {
        let snapshot = self.to_snapshot();

        let contents = match SnapshotFormat::from_path(path) {
            SnapshotFormat::Toml => toml::to_string_pretty(&snapshot)
                .map_err(|e| CatalogError::SerializeError(e.to_string()))?,
            SnapshotFormat::Json => serde_json::to_string_pretty(&snapshot)
                .map_err(|e| CatalogError::SerializeError(e.to_string()))?,
        };

        std::fs::write(path, contents)
            .map_err(|e| CatalogError::IoError(format!("{}: {}", path.display(), e)))
    }
}
