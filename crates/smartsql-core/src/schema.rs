//! Soup schema types and reserved column names

use serde::{Deserialize, Serialize};

/// Column holding the whole serialized soup element
pub const SOUP_COLUMN: &str = "soup";

/// Reserved path (and physical column) of each element's unique id
pub const SOUP_ENTRY_ID: &str = "_soupEntryId";

/// Reserved path (and physical column) of each element's last modification time
pub const SOUP_LAST_MODIFIED_DATE: &str = "_soupLastModifiedDate";

/// How a path inside a `{soup:path}` reference is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// Empty path: the whole serialized element
    WholeDocument,

    /// `_soupEntryId` or `_soupLastModifiedDate`, a physical column by convention
    Reserved,

    /// Any other path; must be indexed
    Indexed,
}

impl PathKind {
    /// Classify a path
    pub fn of(path: &str) -> Self {
        match path {
            "" => Self::WholeDocument,
            SOUP_ENTRY_ID | SOUP_LAST_MODIFIED_DATE => Self::Reserved,
            _ => Self::Indexed,
        }
    }
}

/// Type of an index on a soup path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexType {
    String,
    Integer,
    Floating,
    FullText,
    Json1,
}

impl IndexType {
    /// Column type used for the physical column
    pub fn column_type(&self) -> &'static str {
        match self {
            Self::String | Self::FullText => "TEXT",
            Self::Integer => "INTEGER",
            Self::Floating => "REAL",
            Self::Json1 => "JSON",
        }
    }
}

impl std::fmt::Display for IndexType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Floating => write!(f, "floating"),
            Self::FullText => write!(f, "full_text"),
            Self::Json1 => write!(f, "json1"),
        }
    }
}

/// An indexed path and the physical column backing it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexSpec {
    /// Path inside the soup elements (e.g. `address.city`)
    pub path: String,

    /// Index type
    pub index_type: IndexType,

    /// Physical column name
    pub column_name: String,
}

impl IndexSpec {
    /// Create a new index spec
    pub fn new(path: impl Into<String>, index_type: IndexType, column_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            index_type,
            column_name: column_name.into(),
        }
    }
}

/// A soup and the physical table backing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoupSpec {
    /// Logical soup name
    pub name: String,

    /// Physical table name
    pub table_name: String,

    /// Indexed paths
    #[serde(default)]
    pub indexes: Vec<IndexSpec>,
}

impl SoupSpec {
    /// Create a soup spec with no indexes
    pub fn new(name: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: table_name.into(),
            indexes: Vec::new(),
        }
    }

    /// Builder: add an index
    pub fn with_index(mut self, index: IndexSpec) -> Self {
        self.indexes.push(index);
        self
    }

    /// Find the index on a path
    pub fn index_for_path(&self, path: &str) -> Option<&IndexSpec> {
        self.indexes.iter().find(|index| index.path == path)
    }

    /// Physical column for an indexed path
    pub fn column_for_path(&self, path: &str) -> Option<&str> {
        self.index_for_path(path).map(|index| index.column_name.as_str())
    }
}
