//! Translation errors
//!
//! Every failure aborts the translation. Reference-scoped errors carry the
//! character offset of the offending `{` in the original query.

use smartsql_catalog::LookupError;
use smartsql_core::{Diagnostic, DiagnosticCode, Location, Severity};

/// Error raised while translating a smart query
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SmartSqlError {
    #[error("only read queries are supported")]
    UnsupportedStatement,

    #[error("Invalid soup/path reference {reference} at character {position}")]
    MalformedReference { reference: String, position: usize },

    #[error("Unknown soup {soup} at character {position}")]
    UnknownSoup { soup: String, position: usize },

    #[error("{lookup} at character {position}")]
    UnresolvedPath {
        soup: String,
        path: String,
        lookup: LookupError,
        position: usize,
    },
}

impl SmartSqlError {
    /// Stable diagnostic code for this error
    pub fn code(&self) -> DiagnosticCode {
        match self {
            Self::UnsupportedStatement => DiagnosticCode::SmartsqlUnsupportedStatement,
            Self::MalformedReference { .. } => DiagnosticCode::SmartsqlMalformedReference,
            Self::UnknownSoup { .. } => DiagnosticCode::SmartsqlUnknownSoup,
            Self::UnresolvedPath { .. } => DiagnosticCode::SmartsqlUnresolvedPath,
        }
    }

    /// Character offset of the offending reference, if reference-scoped
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::UnsupportedStatement => None,
            Self::MalformedReference { position, .. }
            | Self::UnknownSoup { position, .. }
            | Self::UnresolvedPath { position, .. } => Some(*position),
        }
    }

    /// Convert to a SmartSQL diagnostic
    ///
    /// `smart_sql` must be the query that produced this error; it is used to
    /// compute line/column and to quote the offending reference.
    pub fn to_diagnostic(&self, file: &str, smart_sql: &str) -> Diagnostic {
        let diag = Diagnostic::new(self.code(), Severity::Error, self.to_string());

        match self.position() {
            Some(position) => diag
                .with_location(Location::from_offset(file, smart_sql, position))
                .with_snippet(reference_at(smart_sql, position)),
            None => diag.with_location(Location::new(file)),
        }
    }
}

/// The `{...}` text starting at character `position`
fn reference_at(smart_sql: &str, position: usize) -> String {
    let mut snippet = String::new();
    for ch in smart_sql.chars().skip(position) {
        snippet.push(ch);
        if ch == '}' {
            break;
        }
    }
    snippet
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            SmartSqlError::UnsupportedStatement.to_string(),
            "only read queries are supported"
        );
        assert_eq!(
            SmartSqlError::MalformedReference {
                reference: "{a:b:c}".to_string(),
                position: 7,
            }
            .to_string(),
            "Invalid soup/path reference {a:b:c} at character 7"
        );
        assert_eq!(
            SmartSqlError::UnknownSoup { soup: "ghosts".to_string(), position: 14 }.to_string(),
            "Unknown soup ghosts at character 14"
        );
        assert_eq!(
            SmartSqlError::UnresolvedPath {
                soup: "people".to_string(),
                path: "email".to_string(),
                lookup: LookupError::PathNotIndexed {
                    soup: "people".to_string(),
                    path: "email".to_string(),
                },
                position: 7,
            }
            .to_string(),
            "people does not have an index on email at character 7"
        );
    }

    #[test]
    fn codes_and_positions() {
        let err = SmartSqlError::UnknownSoup { soup: "x".to_string(), position: 3 };
        assert_eq!(err.code(), DiagnosticCode::SmartsqlUnknownSoup);
        assert_eq!(err.position(), Some(3));

        assert_eq!(SmartSqlError::UnsupportedStatement.position(), None);
        assert_eq!(
            SmartSqlError::UnsupportedStatement.code(),
            DiagnosticCode::SmartsqlUnsupportedStatement
        );
    }

    #[test]
    fn diagnostic_points_at_reference() {
        let query = "SELECT {people:name}\nFROM {ghosts}";
        let err = SmartSqlError::UnknownSoup { soup: "ghosts".to_string(), position: 26 };

        let diag = err.to_diagnostic("queries/q.sql", query);
        assert_eq!(diag.code, DiagnosticCode::SmartsqlUnknownSoup);
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.snippet.as_deref(), Some("{ghosts}"));

        let location = diag.location.unwrap();
        assert_eq!(location.line, Some(2));
        assert_eq!(location.column, Some(6));
    }

    #[test]
    fn diagnostic_for_statement_rejection_has_no_offset() {
        let diag = SmartSqlError::UnsupportedStatement.to_diagnostic("<query>", "DELETE FROM t");
        let location = diag.location.unwrap();

        assert_eq!(location.offset, None);
        assert!(diag.snippet.is_none());
    }
}
