//! Smart query translation
//!
//! Converts a smart query such as
//!
//! ```text
//! SELECT {people:name}, {people:_soupEntryId} FROM {people} WHERE {people:age} > 21
//! ```
//!
//! into SQL over physical names:
//!
//! ```text
//! SELECT TABLE_1_0, _soupEntryId FROM TABLE_1 WHERE TABLE_1_1 > 21
//! ```
//!
//! Only read queries are accepted, and translation is all-or-nothing: the
//! first reference that fails to resolve aborts the call.

use crate::assembler::Assembler;
use crate::error::SmartSqlError;
use crate::guard::StatementGuard;
use crate::reference::{Reference, ReferenceScanner};
use crate::resolver::ReferenceResolver;
use smartsql_catalog::SchemaResolver;
use smartsql_core::Config;

/// A reference and the text it was replaced with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    /// Full reference text including braces
    pub raw: String,

    /// Character offset of the opening `{`
    pub position: usize,

    /// Soup name
    pub soup: String,

    /// Path, `None` for table references
    pub path: Option<String>,

    /// Physical name substituted for the reference
    pub replacement: String,
}

/// Translated SQL with the references that were substituted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Translated SQL
    pub sql: String,

    /// Substituted references, in query order
    pub references: Vec<ResolvedReference>,
}

/// Smart query translator
///
/// Holds options only; the schema is passed to every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmartSqlTranslator {
    guard: StatementGuard,
    validate_whole_document_soup: bool,
}

impl SmartSqlTranslator {
    /// Create a translator with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a translator from `smartsql.toml` settings
    pub fn from_config(config: &Config) -> Self {
        Self {
            guard: StatementGuard::new(config.translator.guard, config.dialect),
            validate_whole_document_soup: config.translator.validate_whole_document_soup,
        }
    }

    /// Use a different statement guard
    pub fn with_guard(mut self, guard: StatementGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Also require the soup to exist for `{soup:}` references
    pub fn validate_whole_document_soup(mut self, validate: bool) -> Self {
        self.validate_whole_document_soup = validate;
        self
    }

    /// Translate a smart query to SQL
    pub fn translate<R>(&self, smart_sql: &str, schema: &R) -> Result<String, SmartSqlError>
    where
        R: SchemaResolver + ?Sized,
    {
        self.convert(smart_sql, schema, |_, _| {})
    }

    /// Translate a smart query and report every substitution
    pub fn explain<R>(&self, smart_sql: &str, schema: &R) -> Result<Translation, SmartSqlError>
    where
        R: SchemaResolver + ?Sized,
    {
        let mut references = Vec::new();

        let sql = self.convert(smart_sql, schema, |reference, replacement| {
            references.push(ResolvedReference {
                raw: reference.raw.to_string(),
                position: reference.position,
                soup: reference.soup.to_string(),
                path: reference.path.map(str::to_string),
                replacement: replacement.to_string(),
            });
        })?;

        Ok(Translation { sql, references })
    }

    fn convert<'a, R, F>(
        &self,
        smart_sql: &'a str,
        schema: &R,
        mut on_replace: F,
    ) -> Result<String, SmartSqlError>
    where
        R: SchemaResolver + ?Sized,
        F: FnMut(&Reference<'a>, &str),
    {
        tracing::debug!(smart_sql, "converting smart sql");

        self.guard.check(smart_sql)?;

        let resolver = ReferenceResolver::new(schema)
            .validate_whole_document_soup(self.validate_whole_document_soup);
        let mut assembler = Assembler::new(smart_sql);

        for reference in ReferenceScanner::new(smart_sql) {
            let reference = reference?;
            let replacement = resolver.resolve(&reference)?;

            tracing::trace!(reference = reference.raw, replacement = %replacement, "resolved reference");

            assembler.replace(reference.span.clone(), &*replacement);
            on_replace(&reference, &*replacement);
        }

        let sql = assembler.finish();
        tracing::debug!(sql = %sql, "converted smart sql");

        Ok(sql)
    }
}

/// Translate a smart query with default options
pub fn translate<R>(smart_sql: &str, schema: &R) -> Result<String, SmartSqlError>
where
    R: SchemaResolver + ?Sized,
{
    SmartSqlTranslator::default().translate(smart_sql, schema)
}
