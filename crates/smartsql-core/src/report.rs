//! Report schema (stable v1)
//!
//! This schema is STABLE and VERSIONED.
//! Breaking changes require a new version.

use serde::{Deserialize, Serialize};
use crate::diagnostic::{Diagnostic, Severity};

/// Report schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportVersion {
    /// Major version (breaking changes)
    pub major: u32,

    /// Minor version (backward-compatible additions)
    pub minor: u32,
}

impl ReportVersion {
    /// Current report schema version
    pub const CURRENT: ReportVersion = ReportVersion { major: 1, minor: 0 };
}

impl std::fmt::Display for ReportVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Summary statistics for a report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total number of diagnostics
    pub total: usize,

    /// Number of errors
    pub errors: usize,

    /// Number of warnings
    pub warnings: usize,

    /// Number of info messages
    pub info: usize,

    /// Number of smart queries checked
    pub queries_checked: usize,

    /// Number of smart queries that translated cleanly
    pub queries_translated: usize,
}

/// Check report (report.json v1)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Schema version
    pub version: ReportVersion,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Summary statistics
    pub summary: ReportSummary,

    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,

    /// Metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Report {
    /// Create a new empty report
    pub fn new() -> Self {
        Self {
            version: ReportVersion::CURRENT,
            timestamp: chrono::Utc::now().to_rfc3339(),
            summary: ReportSummary::default(),
            diagnostics: Vec::new(),
            metadata: None,
        }
    }

    /// Builder: attach free-form metadata
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Record the outcome of checking one query
    ///
    /// A query counts as translated when it produced no error diagnostics.
    pub fn record_query(&mut self, diagnostics: Vec<Diagnostic>) {
        self.summary.queries_checked += 1;

        if !diagnostics.iter().any(|d| d.severity == Severity::Error) {
            self.summary.queries_translated += 1;
        }

        for diagnostic in diagnostics {
            self.add_diagnostic(diagnostic);
        }
    }

    /// Add a diagnostic to the report
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.summary.errors += 1,
            Severity::Warn => self.summary.warnings += 1,
            Severity::Info => self.summary.info += 1,
        }

        self.summary.total += 1;
        self.diagnostics.push(diagnostic);
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Save to file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let json = self.to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        std::fs::write(path, json)
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticCode;

    #[test]
    fn empty_report() {
        let report = Report::new();
        assert_eq!(report.version, ReportVersion::CURRENT);
        assert_eq!(report.summary.total, 0);
        assert!(!report.has_errors());
    }

    #[test]
    fn record_queries() {
        let mut report = Report::new();

        report.record_query(Vec::new());
        report.record_query(vec![Diagnostic::new(
            DiagnosticCode::SmartsqlUnknownSoup,
            Severity::Error,
            "Unknown soup ghosts at character 14",
        )]);

        assert_eq!(report.summary.queries_checked, 2);
        assert_eq!(report.summary.queries_translated, 1);
        assert_eq!(report.summary.errors, 1);
        assert!(report.has_errors());
    }

    #[test]
    fn info_diagnostics_do_not_fail_a_query() {
        let mut report = Report::new();
        report.record_query(vec![Diagnostic::new(DiagnosticCode::Info, Severity::Info, "ok")]);

        assert_eq!(report.summary.queries_translated, 1);
        assert_eq!(report.summary.info, 1);
        assert!(!report.has_errors());
    }

    #[test]
    fn report_serialization() {
        let report = Report::new();
        let json = report.to_json().unwrap();
        assert!(json.contains("\"version\""));
        assert!(json.contains("\"queries_checked\""));
        assert!(!json.contains("\"metadata\""));
    }

    #[test]
    fn metadata_is_serialized() {
        let report = Report::new().with_metadata(serde_json::json!({ "extension": "sql" }));
        let json = report.to_json().unwrap();

        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"extension\": \"sql\""));
    }
}
