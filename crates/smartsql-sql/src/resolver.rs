//! Reference resolution
//!
//! Maps a scanned reference to the text that replaces it:
//! - `{soup}` -> physical table name
//! - `{soup:}` -> whole-document column
//! - `{soup:_soupEntryId}`, `{soup:_soupLastModifiedDate}` -> the path itself
//! - `{soup:path}` -> physical column of the indexed path

use crate::error::SmartSqlError;
use crate::reference::Reference;
use smartsql_catalog::SchemaResolver;
use smartsql_core::{PathKind, SOUP_COLUMN};
use std::borrow::Cow;

/// Resolves references against a schema
pub struct ReferenceResolver<'r, R: ?Sized> {
    schema: &'r R,
    validate_whole_document_soup: bool,
}

impl<'r, R: SchemaResolver + ?Sized> ReferenceResolver<'r, R> {
    /// Create a resolver reading from `schema`
    pub fn new(schema: &'r R) -> Self {
        Self {
            schema,
            validate_whole_document_soup: false,
        }
    }

    /// Also require the soup to exist for `{soup:}` references
    pub fn validate_whole_document_soup(mut self, validate: bool) -> Self {
        self.validate_whole_document_soup = validate;
        self
    }

    /// Replacement text for a reference
    pub fn resolve<'a>(&self, reference: &Reference<'a>) -> Result<Cow<'a, str>, SmartSqlError> {
        let Some(path) = reference.path else {
            return self.table_name(reference).map(Cow::Owned);
        };

        match PathKind::of(path) {
            PathKind::WholeDocument => {
                if self.validate_whole_document_soup {
                    self.ensure_soup_exists(reference)?;
                }
                Ok(Cow::Borrowed(SOUP_COLUMN))
            }
            PathKind::Reserved => Ok(Cow::Borrowed(path)),
            PathKind::Indexed => {
                self.ensure_soup_exists(reference)?;

                self.schema
                    .column_name_for_path(reference.soup, path)
                    .map(Cow::Owned)
                    .map_err(|lookup| SmartSqlError::UnresolvedPath {
                        soup: reference.soup.to_string(),
                        path: path.to_string(),
                        lookup,
                        position: reference.position,
                    })
            }
        }
    }

    fn table_name(&self, reference: &Reference<'_>) -> Result<String, SmartSqlError> {
        self.schema
            .soup_table_name(reference.soup)
            .ok_or_else(|| unknown_soup(reference))
    }

    fn ensure_soup_exists(&self, reference: &Reference<'_>) -> Result<(), SmartSqlError> {
        if self.schema.soup_exists(reference.soup) {
            Ok(())
        } else {
            Err(unknown_soup(reference))
        }
    }
}

fn unknown_soup(reference: &Reference<'_>) -> SmartSqlError {
    SmartSqlError::UnknownSoup {
        soup: reference.soup.to_string(),
        position: reference.position,
    }
}
