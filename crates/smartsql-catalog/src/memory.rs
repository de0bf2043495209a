//! In-memory soup catalog
//!
//! Holds soup and index metadata and answers resolver lookups from it.
//! Useful for:
//! - Resolving smart queries against a catalog snapshot file
//! - Unit testing translation without a live store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use smartsql_catalog::{SchemaResolver, SoupCatalog};
//! use smartsql_core::IndexType;
//!
//! let mut catalog = SoupCatalog::new();
//! catalog.register_soup("people", &[("name", IndexType::String), ("age", IndexType::Integer)]);
//!
//! assert_eq!(catalog.soup_table_name("people").as_deref(), Some("TABLE_1"));
//! assert_eq!(catalog.column_name_for_path("people", "age")?, "TABLE_1_1");
//! ```

use crate::resolver::{LookupError, SchemaResolver};
use crate::snapshot::{CatalogError, CatalogSnapshot};
use smartsql_core::{IndexSpec, IndexType, SoupSpec};
use std::collections::BTreeMap;

/// Prefix of generated physical table names
const TABLE_PREFIX: &str = "TABLE_";

/// In-memory soup catalog
///
/// Soups registered through [`SoupCatalog::register_soup`] get generated
/// physical names: `TABLE_<n>` for the table and `TABLE_<n>_<i>` for the
/// column of the i-th index. Soups inserted from a snapshot keep their names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoupCatalog {
    /// Soups by logical name
    soups: BTreeMap<String, SoupSpec>,

    /// Highest table number handed out or seen
    last_table_id: u64,
}

impl SoupCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a soup with generated physical names
    ///
    /// Registering a soup that already exists leaves it untouched and
    /// returns the existing definition.
    pub fn register_soup(&mut self, name: &str, indexes: &[(&str, IndexType)]) -> &SoupSpec {
        let last_table_id = &mut self.last_table_id;

        self.soups.entry(name.to_string()).or_insert_with(|| {
            *last_table_id += 1;
            let table_name = format!("{}{}", TABLE_PREFIX, last_table_id);

            let indexes = indexes
                .iter()
                .enumerate()
                .map(|(i, (path, index_type))| {
                    IndexSpec::new(*path, *index_type, format!("{}_{}", table_name, i))
                })
                .collect();

            tracing::debug!(soup = name, table = %table_name, "registered soup");

            SoupSpec {
                name: name.to_string(),
                table_name,
                indexes,
            }
        })
    }

    /// Insert a soup with explicit physical names
    pub fn insert_soup(&mut self, soup: SoupSpec) -> Result<(), CatalogError> {
        if self.soups.contains_key(&soup.name) {
            return Err(CatalogError::DuplicateSoup(soup.name));
        }

        for (i, index) in soup.indexes.iter().enumerate() {
            if soup.indexes[..i].iter().any(|other| other.path == index.path) {
                return Err(CatalogError::DuplicateIndex {
                    soup: soup.name.clone(),
                    path: index.path.clone(),
                });
            }
        }

        // Keep generated names clear of imported ones
        if let Some(id) = soup
            .table_name
            .strip_prefix(TABLE_PREFIX)
            .and_then(|n| n.parse::<u64>().ok())
        {
            self.last_table_id = self.last_table_id.max(id);
        }

        self.soups.insert(soup.name.clone(), soup);
        Ok(())
    }

    /// Remove a soup, returning its definition
    pub fn drop_soup(&mut self, name: &str) -> Option<SoupSpec> {
        self.soups.remove(name)
    }

    /// Get a soup definition
    pub fn soup(&self, name: &str) -> Option<&SoupSpec> {
        self.soups.get(name)
    }

    /// Soup names in sorted order
    pub fn soup_names(&self) -> impl Iterator<Item = &str> {
        self.soups.keys().map(String::as_str)
    }

    /// Number of soups
    pub fn len(&self) -> usize {
        self.soups.len()
    }

    /// Check if the catalog has no soups
    pub fn is_empty(&self) -> bool {
        self.soups.is_empty()
    }

    /// Build a catalog from a snapshot
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for soup in snapshot.soups {
            catalog.insert_soup(soup)?;
        }
        Ok(catalog)
    }

    /// Capture the catalog as a snapshot
    pub fn to_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            soups: self.soups.values().cloned().collect(),
        }
    }
}

impl SchemaResolver for SoupCatalog {
    fn soup_table_name(&self, soup_name: &str) -> Option<String> {
        self.soups.get(soup_name).map(|soup| soup.table_name.clone())
    }

    fn column_name_for_path(&self, soup_name: &str, path: &str) -> Result<String, LookupError> {
        let soup = self
            .soups
            .get(soup_name)
            .ok_or_else(|| LookupError::UnknownSoup(soup_name.to_string()))?;

        soup.column_for_path(path)
            .map(str::to_string)
            .ok_or_else(|| LookupError::PathNotIndexed {
                soup: soup_name.to_string(),
                path: path.to_string(),
            })
    }

    fn soup_exists(&self, soup_name: &str) -> bool {
        self.soups.contains_key(soup_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people_catalog() -> SoupCatalog {
        let mut catalog = SoupCatalog::new();
        catalog.register_soup("people", &[("name", IndexType::String), ("age", IndexType::Integer)]);
        catalog
    }

    #[test]
    fn register_generates_physical_names() {
        let catalog = people_catalog();
        let people = catalog.soup("people").unwrap();

        assert_eq!(people.table_name, "TABLE_1");
        assert_eq!(people.column_for_path("name"), Some("TABLE_1_0"));
        assert_eq!(people.column_for_path("age"), Some("TABLE_1_1"));
    }

    #[test]
    fn register_existing_soup_is_noop() {
        let mut catalog = people_catalog();
        let again = catalog.register_soup("people", &[("email", IndexType::String)]);

        assert_eq!(again.table_name, "TABLE_1");
        assert!(again.column_for_path("email").is_none());
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn table_ids_are_not_reused() {
        let mut catalog = people_catalog();
        catalog.drop_soup("people");
        let accounts = catalog.register_soup("accounts", &[]);

        assert_eq!(accounts.table_name, "TABLE_2");
    }

    #[test]
    fn inserted_table_names_bump_generated_ids() {
        let mut catalog = SoupCatalog::new();
        catalog.insert_soup(SoupSpec::new("legacy", "TABLE_41")).unwrap();
        catalog.insert_soup(SoupSpec::new("custom", "my_table")).unwrap();

        let fresh = catalog.register_soup("fresh", &[]);
        assert_eq!(fresh.table_name, "TABLE_42");
    }

    #[test]
    fn insert_duplicate_soup_fails() {
        let mut catalog = people_catalog();
        let result = catalog.insert_soup(SoupSpec::new("people", "TABLE_9"));

        assert!(matches!(result, Err(CatalogError::DuplicateSoup(name)) if name == "people"));
    }

    #[test]
    fn insert_duplicate_index_fails() {
        let mut catalog = SoupCatalog::new();
        let soup = SoupSpec::new("people", "TABLE_1")
            .with_index(IndexSpec::new("name", IndexType::String, "TABLE_1_0"))
            .with_index(IndexSpec::new("name", IndexType::FullText, "TABLE_1_1"));

        let result = catalog.insert_soup(soup);
        assert!(matches!(result, Err(CatalogError::DuplicateIndex { .. })));
        assert!(catalog.is_empty());
    }

    #[test]
    fn resolver_lookups() {
        let catalog = people_catalog();

        assert_eq!(catalog.soup_table_name("people").as_deref(), Some("TABLE_1"));
        assert_eq!(catalog.soup_table_name("ghosts"), None);
        assert!(catalog.soup_exists("people"));
        assert!(!catalog.soup_exists("ghosts"));

        assert_eq!(catalog.column_name_for_path("people", "age").unwrap(), "TABLE_1_1");
        assert_eq!(
            catalog.column_name_for_path("people", "email"),
            Err(LookupError::PathNotIndexed {
                soup: "people".to_string(),
                path: "email".to_string(),
            })
        );
        assert_eq!(
            catalog.column_name_for_path("ghosts", "name"),
            Err(LookupError::UnknownSoup("ghosts".to_string()))
        );
    }

    #[test]
    fn snapshot_roundtrip_keeps_names() {
        let mut catalog = people_catalog();
        catalog.register_soup("accounts", &[("owner", IndexType::String)]);

        let restored = SoupCatalog::from_snapshot(catalog.to_snapshot()).unwrap();
        assert_eq!(restored.soup("accounts").unwrap().table_name, "TABLE_2");
        assert_eq!(restored.soup_names().collect::<Vec<_>>(), vec!["accounts", "people"]);
    }
}
