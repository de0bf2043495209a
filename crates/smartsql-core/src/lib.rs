//! SmartSQL Core
//!
//! Core domain model with stable, versioned types.
//! Never rename diagnostic codes - they are part of the public API.

pub mod diagnostic;
pub mod schema;
pub mod report;
pub mod config;

pub use diagnostic::{Diagnostic, DiagnosticCode, Severity, Location};
pub use schema::{
    IndexSpec, IndexType, PathKind, SoupSpec, SOUP_COLUMN, SOUP_ENTRY_ID, SOUP_LAST_MODIFIED_DATE,
};
pub use report::{Report, ReportSummary, ReportVersion};
pub use config::{Config, ConfigError, DialectConfig, GuardMode, TranslatorConfig};
