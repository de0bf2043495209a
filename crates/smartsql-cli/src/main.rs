use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use walkdir::WalkDir;

use smartsql_catalog::SoupCatalog;
use smartsql_core::{Config, Diagnostic, DiagnosticCode, Report, Severity};
use smartsql_sql::SmartSqlTranslator;

/// Environment variable naming the default catalog snapshot
const CATALOG_ENV: &str = "SMARTSQL_CATALOG";

/// Config file picked up from the working directory
const DEFAULT_CONFIG: &str = "smartsql.toml";

/// SmartSQL - translate smart queries over soups into plain SQL
#[derive(Parser)]
#[command(name = "smartsql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: smartsql.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog snapshot (JSON or TOML); overrides config and SMARTSQL_CATALOG
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a smart query and print the SQL
    Translate {
        /// Smart query (reads --file or stdin if omitted)
        query: Option<String>,

        /// Read the smart query from a file
        #[arg(short, long, conflicts_with = "query")]
        file: Option<PathBuf>,
    },

    /// Show how each reference in a smart query resolves
    Explain {
        /// Smart query (reads --file or stdin if omitted)
        query: Option<String>,

        /// Read the smart query from a file
        #[arg(short, long, conflicts_with = "query")]
        file: Option<PathBuf>,
    },

    /// Translate every smart query file in a directory and write a report
    Check {
        /// Directory to scan
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output file for report.json
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// File extension of smart query files
        #[arg(long, default_value = "sql")]
        ext: String,
    },

    /// List the soups and indexed paths in the catalog
    Soups,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Before tracing so RUST_LOG can come from .env
    dotenvy::dotenv().ok();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    tracing::debug!(
        guard = ?config.translator.guard,
        dialect = ?config.dialect,
        "translator settings"
    );

    let translator = SmartSqlTranslator::from_config(&config);
    let catalog_path = catalog_path(cli.catalog.as_deref(), std::env::var_os(CATALOG_ENV), &config);

    match cli.command {
        Commands::Translate { query, file } => {
            let catalog = load_catalog(&catalog_path?)?;
            let smart_sql = read_query(query, file.as_deref())?;
            translate_command(&translator, &catalog, &smart_sql)
        }
        Commands::Explain { query, file } => {
            let catalog = load_catalog(&catalog_path?)?;
            let smart_sql = read_query(query, file.as_deref())?;
            explain_command(&translator, &catalog, &smart_sql)
        }
        Commands::Check { dir, output, ext } => {
            check_command(&translator, catalog_path, &dir, &output, &ext)
        }
        Commands::Soups => {
            let catalog = load_catalog(&catalog_path?)?;
            soups_command(&catalog)
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load the config given on the command line, else `smartsql.toml` if present
fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let default = Path::new(DEFAULT_CONFIG);
    if default.exists() {
        Config::from_file(default)
            .with_context(|| format!("Failed to load config {}", default.display()))
    } else {
        tracing::debug!("no config file found, using defaults");
        Ok(Config::default())
    }
}

/// Catalog location: --catalog, then SMARTSQL_CATALOG, then the config file
fn catalog_path(flag: Option<&Path>, env: Option<OsString>, config: &Config) -> Result<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| env.filter(|value| !value.is_empty()).map(PathBuf::from))
        .or_else(|| config.catalog_path())
        .ok_or_else(|| anyhow::anyhow!(
            "No catalog configured. Pass --catalog, set {}, or add `catalog = \"...\"` to {}.",
            CATALOG_ENV,
            DEFAULT_CONFIG
        ))
}

fn load_catalog(path: &Path) -> Result<SoupCatalog> {
    tracing::info!(path = %path.display(), "loading catalog");

    let catalog = SoupCatalog::from_file(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;

    tracing::info!(soups = catalog.len(), "catalog loaded");
    Ok(catalog)
}

/// Smart query from the argument, a file, or stdin
fn read_query(query: Option<String>, file: Option<&Path>) -> Result<String> {
    match (query, file) {
        (Some(query), _) => Ok(query),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        (None, None) => std::io::read_to_string(std::io::stdin())
            .context("Failed to read smart query from stdin"),
    }
}

/// Translate command - print translated SQL
fn translate_command(translator: &SmartSqlTranslator, catalog: &SoupCatalog, smart_sql: &str) -> Result<()> {
    match translator.translate(smart_sql, catalog) {
        Ok(sql) => {
            println!("{}", sql);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Explain command - show each substitution
fn explain_command(translator: &SmartSqlTranslator, catalog: &SoupCatalog, smart_sql: &str) -> Result<()> {
    let translation = match translator.explain(smart_sql, catalog) {
        Ok(translation) => translation,
        Err(e) => {
            let diag = e.to_diagnostic("<query>", smart_sql);
            print_diagnostic(&diag);
            std::process::exit(1);
        }
    };

    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Smart Query Translation".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    if translation.references.is_empty() {
        println!("{}", "No soup references found".yellow());
    } else {
        println!("{}", "References:".bold());
        println!();

        for reference in &translation.references {
            println!(
                "  {:>5}  {} -> {}",
                reference.position,
                reference.raw.yellow(),
                reference.replacement.green()
            );
        }
    }

    println!();
    println!("{}", "SQL:".bold());
    println!("{}", translation.sql);
    println!();
    println!("{}", "=".repeat(60).bright_blue());

    Ok(())
}

/// Check command - write the report, print a summary, fail on errors
fn check_command(
    translator: &SmartSqlTranslator,
    catalog_path: Result<PathBuf>,
    dir: &Path,
    output: &Path,
    ext: &str,
) -> Result<()> {
    let report = check_directory(translator, catalog_path, dir, ext);

    report.save_to_file(output)
        .with_context(|| format!("Failed to write report {}", output.display()))?;
    tracing::info!(path = %output.display(), "report saved");

    print_report_summary(&report);

    if report.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Translate every `*.<ext>` file under `dir` into a report
///
/// A catalog that cannot be loaded is reported as a single
/// `CATALOG_LOAD_ERROR` diagnostic and no file is checked.
fn check_directory(
    translator: &SmartSqlTranslator,
    catalog_path: Result<PathBuf>,
    dir: &Path,
    ext: &str,
) -> Report {
    let mut report = Report::new().with_metadata(serde_json::json!({
        "directory": dir.display().to_string(),
        "extension": ext,
        "catalog": catalog_path.as_ref().ok().map(|path| path.display().to_string()),
    }));

    let catalog = match catalog_path.and_then(|path| load_catalog(&path)) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(error = %e, "catalog could not be loaded");
            report.add_diagnostic(Diagnostic::new(
                DiagnosticCode::CatalogLoadError,
                Severity::Error,
                format!("{:#}", e),
            ));
            return report;
        }
    };

    tracing::info!(dir = %dir.display(), ext, "checking smart queries");

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                report.add_diagnostic(Diagnostic::new(
                    DiagnosticCode::IoError,
                    Severity::Error,
                    e.to_string(),
                ));
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().and_then(|e| e.to_str()) != Some(ext) {
            continue;
        }

        let display_path = path.display().to_string();

        let smart_sql = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                report.record_query(vec![Diagnostic::new(
                    DiagnosticCode::IoError,
                    Severity::Error,
                    format!("Failed to read {}: {}", display_path, e),
                )]);
                continue;
            }
        };

        match translator.translate(&smart_sql, &catalog) {
            Ok(_) => {
                tracing::debug!(file = %display_path, "translated");
                report.record_query(Vec::new());
            }
            Err(e) => {
                tracing::debug!(file = %display_path, error = %e, "translation failed");
                report.record_query(vec![e.to_diagnostic(&display_path, &smart_sql)]);
            }
        }
    }

    report
}

/// Soups command - list catalog contents
fn soups_command(catalog: &SoupCatalog) -> Result<()> {
    if catalog.is_empty() {
        println!("{}", "Catalog has no soups".yellow());
        return Ok(());
    }

    for name in catalog.soup_names() {
        let Some(soup) = catalog.soup(name) else {
            continue;
        };

        println!("{} {}", soup.name.bold(), format!("({})", soup.table_name).dimmed());

        for index in &soup.indexes {
            println!(
                "  {:<30} {:<10} {:<8} {}",
                index.path,
                index.index_type.to_string(),
                index.index_type.column_type(),
                index.column_name.green()
            );
        }
    }

    Ok(())
}

fn print_diagnostic(diag: &Diagnostic) {
    let severity = match diag.severity {
        Severity::Error => "error".red().bold(),
        Severity::Warn => "warn".yellow().bold(),
        Severity::Info => "info".blue().bold(),
    };

    println!("{}[{}]: {}", severity, diag.code, diag.message);

    if let Some(location) = &diag.location {
        println!("  {} {}", "-->".bright_blue(), location);
    }

    if let Some(snippet) = &diag.snippet {
        println!("  {} {}", "|".bright_blue(), snippet.yellow());
    }
}

fn print_report_summary(report: &Report) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "SmartSQL Check Report".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!(
        "{} {} checked, {} translated",
        "Queries:".bold(),
        report.summary.queries_checked,
        report.summary.queries_translated.to_string().green()
    );

    if report.diagnostics.is_empty() {
        println!("{}", "✓ All smart queries translate".green().bold());
    } else {
        println!();
        for diag in &report.diagnostics {
            print_diagnostic(diag);
            println!();
        }

        println!(
            "{} {} errors, {} warnings",
            "Summary:".bold(),
            report.summary.errors.to_string().red(),
            report.summary.warnings.to_string().yellow()
        );
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
}
