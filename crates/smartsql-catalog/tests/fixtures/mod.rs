//! Test fixtures for catalog integration tests
//!
//! Reusable soup definitions modelled on a typical mobile CRM store.

#![allow(dead_code)]

use smartsql_core::{IndexSpec, IndexType, SoupSpec};

/// A people soup with explicit physical names
///
/// - `name` and `age` indexed
/// - `address.city` indexed for full-text search
pub fn people_soup() -> SoupSpec {
    SoupSpec::new("people", "TABLE_1")
        .with_index(IndexSpec::new("name", IndexType::String, "col_1"))
        .with_index(IndexSpec::new("age", IndexType::Integer, "col_2"))
        .with_index(IndexSpec::new("address.city", IndexType::FullText, "col_3"))
}

/// An accounts soup keyed by owner
pub fn accounts_soup() -> SoupSpec {
    SoupSpec::new("accounts", "TABLE_2")
        .with_index(IndexSpec::new("owner", IndexType::String, "TABLE_2_0"))
        .with_index(IndexSpec::new("balance", IndexType::Floating, "TABLE_2_1"))
}

/// A JSON snapshot with both soups
pub const CATALOG_JSON: &str = r#"{
    "soups": [
        {
            "name": "people",
            "table_name": "TABLE_1",
            "indexes": [
                { "path": "name", "index_type": "string", "column_name": "col_1" },
                { "path": "age", "index_type": "integer", "column_name": "col_2" },
                { "path": "address.city", "index_type": "full_text", "column_name": "col_3" }
            ]
        },
        {
            "name": "accounts",
            "table_name": "TABLE_2",
            "indexes": [
                { "path": "owner", "index_type": "string", "column_name": "TABLE_2_0" },
                { "path": "balance", "index_type": "floating", "column_name": "TABLE_2_1" }
            ]
        }
    ]
}"#;
