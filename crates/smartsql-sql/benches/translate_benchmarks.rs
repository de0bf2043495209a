//! Benchmarks for smart query translation
//!
//! These benchmarks measure translation throughput as the number of
//! references in a query grows, for both statement guard modes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use smartsql_catalog::SoupCatalog;
use smartsql_core::{DialectConfig, GuardMode, IndexType};
use smartsql_sql::{SmartSqlTranslator, StatementGuard};

/// Catalog with one soup indexed on `field_0..field_{n}`
fn generate_catalog(num_fields: usize) -> SoupCatalog {
    let paths: Vec<String> = (0..num_fields).map(|i| format!("field_{}", i)).collect();
    let indexes: Vec<(&str, IndexType)> = paths
        .iter()
        .map(|path| (path.as_str(), IndexType::String))
        .collect();

    let mut catalog = SoupCatalog::new();
    catalog.register_soup("records", &indexes);
    catalog
}

/// Smart query selecting every indexed field
fn generate_query(num_fields: usize) -> String {
    let columns: Vec<String> = (0..num_fields)
        .map(|i| format!("{{records:field_{}}}", i))
        .collect();

    format!(
        "SELECT {{records:_soupEntryId}}, {} FROM {{records}} WHERE {{records:field_0}} IS NOT NULL",
        columns.join(", ")
    )
}

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");

    for num_fields in [1, 10, 100] {
        let catalog = generate_catalog(num_fields);
        let query = generate_query(num_fields);

        let substring = SmartSqlTranslator::new();
        group.bench_with_input(BenchmarkId::new("substring_guard", num_fields), &query, |b, query| {
            b.iter(|| substring.translate(black_box(query), &catalog))
        });

        let keyword = SmartSqlTranslator::new()
            .with_guard(StatementGuard::new(GuardMode::Keyword, DialectConfig::Sqlite));
        group.bench_with_input(BenchmarkId::new("keyword_guard", num_fields), &query, |b, query| {
            b.iter(|| keyword.translate(black_box(query), &catalog))
        });
    }

    group.finish();
}

fn bench_plain_sql(c: &mut Criterion) {
    let catalog = generate_catalog(1);
    let translator = SmartSqlTranslator::new();
    let query = "SELECT a, b, c FROM t WHERE a > 1 ORDER BY b LIMIT 10".repeat(50);

    c.bench_function("translate_plain_sql", |b| {
        b.iter(|| translator.translate(black_box(&query), &catalog))
    });
}

criterion_group!(benches, bench_translate, bench_plain_sql);
criterion_main!(benches);
