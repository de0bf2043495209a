//! Soup catalog and schema resolution
//!
//! This crate maps logical soup names and paths to the physical tables and
//! columns that back them. Translation only depends on the
//! [`SchemaResolver`] trait; [`SoupCatalog`] is the in-memory implementation,
//! loadable from JSON or TOML snapshots.
//!
//! ## Example
//!
//! ```rust,ignore
//! use smartsql_catalog::{SchemaResolver, SoupCatalog};
//!
//! let catalog = SoupCatalog::from_file(Path::new("catalog.json"))?;
//! let table = catalog.soup_table_name("people");
//! let column = catalog.column_name_for_path("people", "name")?;
//! ```

pub mod resolver;
pub mod memory;
pub mod snapshot;

pub use resolver::{SchemaResolver, LookupError};
pub use memory::SoupCatalog;
pub use snapshot::{CatalogSnapshot, CatalogError};
