//! Smart SQL translation
//!
//! This crate handles:
//! - Rejecting non-read statements before translation
//! - Scanning `{soup}` and `{soup:path}` references
//! - Resolving references to physical table and column names
//! - Assembling the translated SQL with position-addressed errors

pub mod error;
pub mod guard;
pub mod reference;
pub mod resolver;
pub mod translator;
mod assembler;

pub use error::SmartSqlError;
pub use guard::StatementGuard;
pub use reference::{Reference, ReferenceScanner};
pub use resolver::ReferenceResolver;
pub use translator::{translate, ResolvedReference, SmartSqlTranslator, Translation};
