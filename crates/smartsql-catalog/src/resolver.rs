//! Schema resolver trait for mapping soups and paths to physical names

use std::sync::Arc;

/// Errors a resolver reports when a path cannot be mapped to a column
///
/// The `Display` text is reused verbatim in translation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("Unknown soup {0}")]
    UnknownSoup(String),

    #[error("{soup} does not have an index on {path}")]
    PathNotIndexed { soup: String, path: String },

    /// Any other resolver failure, reported as-is
    #[error("{0}")]
    Other(String),
}

/// Read-only view of the soup schema used during translation
///
/// Implementations are expected to answer from a stable snapshot for the
/// duration of one translation. Thread-safety is up to the implementation.
pub trait SchemaResolver {
    /// Physical table backing `soup_name`, if the soup exists
    fn soup_table_name(&self, soup_name: &str) -> Option<String>;

    /// Physical column backing `path` in `soup_name`
    ///
    /// Fails if the soup does not exist or the path is not indexed.
    fn column_name_for_path(&self, soup_name: &str, path: &str) -> Result<String, LookupError>;

    /// Check that a soup exists
    fn soup_exists(&self, soup_name: &str) -> bool {
        self.soup_table_name(soup_name).is_some()
    }
}

impl<R: SchemaResolver + ?Sized> SchemaResolver for &R {
    fn soup_table_name(&self, soup_name: &str) -> Option<String> {
        (**self).soup_table_name(soup_name)
    }

    fn column_name_for_path(&self, soup_name: &str, path: &str) -> Result<String, LookupError> {
        (**self).column_name_for_path(soup_name, path)
    }

    fn soup_exists(&self, soup_name: &str) -> bool {
        (**self).soup_exists(soup_name)
    }
}

impl<R: SchemaResolver + ?Sized> SchemaResolver for Box<R> {
    fn soup_table_name(&self, soup_name: &str) -> Option<String> {
        (**self).soup_table_name(soup_name)
    }

    fn column_name_for_path(&self, soup_name: &str, path: &str) -> Result<String, LookupError> {
        (**self).column_name_for_path(soup_name, path)
    }

    fn soup_exists(&self, soup_name: &str) -> bool {
        (**self).soup_exists(soup_name)
    }
}

impl<R: SchemaResolver + ?Sized> SchemaResolver for Arc<R> {
    fn soup_table_name(&self, soup_name: &str) -> Option<String> {
        (**self).soup_table_name(soup_name)
    }

    fn column_name_for_path(&self, soup_name: &str, path: &str) -> Result<String, LookupError> {
        (**self).column_name_for_path(soup_name, path)
    }

    fn soup_exists(&self, soup_name: &str) -> bool {
        (**self).soup_exists(soup_name)
    }
}

// Lets callers translate against a read lock held for the whole call.
impl<R: SchemaResolver + ?Sized> SchemaResolver for std::sync::RwLockReadGuard<'_, R> {
    fn soup_table_name(&self, soup_name: &str) -> Option<String> {
        (**self).soup_table_name(soup_name)
    }

    fn column_name_for_path(&self, soup_name: &str, path: &str) -> Result<String, LookupError> {
        (**self).column_name_for_path(soup_name, path)
    }

    fn soup_exists(&self, soup_name: &str) -> bool {
        (**self).soup_exists(soup_name)
    }
}
