//! Diagnostic codes and error reporting
//!
//! IMPORTANT: Diagnostic codes are versioned and stable.
//! NEVER rename or remove codes - they are part of the public API.
//! Add new codes with new names only.

use serde::{Deserialize, Serialize};

/// Diagnostic code registry (v1)
///
/// These codes are STABLE and VERSIONED.
/// Do NOT rename or remove codes - only add new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    // Smart query translation (1xxx)
    /// The query contains a mutating statement keyword
    SmartsqlUnsupportedStatement,

    /// A `{...}` reference has more than one `:` separator
    SmartsqlMalformedReference,

    /// A referenced soup has no physical table
    SmartsqlUnknownSoup,

    /// A referenced path is not indexed for its soup
    SmartsqlUnresolvedPath,

    // Catalog (2xxx)
    /// Catalog snapshot could not be loaded
    CatalogLoadError,

    // General (9xxx)
    /// Failed to read an input file
    IoError,

    /// General informational message
    Info,
}

impl DiagnosticCode {
    /// Get the diagnostic code as a stable string identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmartsqlUnsupportedStatement => "SMARTSQL_UNSUPPORTED_STATEMENT",
            Self::SmartsqlMalformedReference => "SMARTSQL_MALFORMED_REFERENCE",
            Self::SmartsqlUnknownSoup => "SMARTSQL_UNKNOWN_SOUP",
            Self::SmartsqlUnresolvedPath => "SMARTSQL_UNRESOLVED_PATH",
            Self::CatalogLoadError => "CATALOG_LOAD_ERROR",
            Self::IoError => "IO_ERROR",
            Self::Info => "INFO",
        }
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message
    Info,

    /// Warning - should be reviewed but not blocking
    Warn,

    /// Error - the query cannot be executed
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Source location of a smart query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File path, or `<query>` for inline queries
    pub file: String,

    /// Character offset into the query (0-indexed)
    pub offset: Option<usize>,

    /// Optional line number (1-indexed)
    pub line: Option<usize>,

    /// Optional column number (1-indexed)
    pub column: Option<usize>,
}

impl Location {
    /// Create a new location with just a file path
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            offset: None,
            line: None,
            column: None,
        }
    }

    /// Create a location from a character offset into `text`
    ///
    /// Line and column are derived by counting characters, so the
    /// offset matches what translation errors report.
    pub fn from_offset(file: impl Into<String>, text: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;

        for ch in text.chars().take(offset) {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Self {
            file: file.into(),
            offset: Some(offset),
            line: Some(line),
            column: Some(column),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{}:{}:{}", self.file, line, column),
            (Some(line), None) => write!(f, "{}:{}", self.file, line),
            _ => write!(f, "{}", self.file),
        }
    }
}

/// A diagnostic message with structured metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Stable diagnostic code
    pub code: DiagnosticCode,

    /// Severity level
    pub severity: Severity,

    /// Human-readable message
    pub message: String,

    /// Source location (best-effort)
    pub location: Option<Location>,

    /// The offending text, e.g. the raw `{...}` reference
    pub snippet: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic with minimal fields
    pub fn new(code: DiagnosticCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            location: None,
            snippet: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the offending snippet
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }
}
