//! Read-only statement guard
//!
//! Runs on the whole query before any reference is scanned.

use crate::error::SmartSqlError;
use smartsql_core::{DialectConfig, GuardMode};
use sqlparser::dialect::{Dialect, GenericDialect, PostgreSqlDialect, SQLiteDialect};
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, Tokenizer};

/// Words that mark a mutating statement
const MUTATING_WORDS: [&str; 3] = ["insert", "update", "delete"];

/// Rejects queries that could modify data
///
/// In [`GuardMode::Substring`] mode any occurrence of `insert`, `update` or
/// `delete` in the lowercased query is rejected, including inside string
/// literals, comments and identifiers such as `updated_at`.
///
/// [`GuardMode::Keyword`] tokenizes the query and only rejects unquoted
/// `INSERT`, `UPDATE` and `DELETE` keywords. When the query cannot be
/// tokenized it falls back to the substring check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatementGuard {
    mode: GuardMode,
    dialect: DialectConfig,
}

impl StatementGuard {
    /// Create a guard
    pub fn new(mode: GuardMode, dialect: DialectConfig) -> Self {
        Self { mode, dialect }
    }

    /// Guard mode
    pub fn mode(&self) -> GuardMode {
        self.mode
    }

    /// Fail with [`SmartSqlError::UnsupportedStatement`] if `query` is not read-only
    pub fn check(&self, query: &str) -> Result<(), SmartSqlError> {
        let mutating = match self.mode {
            GuardMode::Substring => contains_mutating_word(query),
            GuardMode::Keyword => self.contains_mutating_keyword(query),
        };

        if mutating {
            Err(SmartSqlError::UnsupportedStatement)
        } else {
            Ok(())
        }
    }

    fn contains_mutating_keyword(&self, query: &str) -> bool {
        let dialect = dialect_for(self.dialect);

        match Tokenizer::new(dialect.as_ref(), query).tokenize() {
            Ok(tokens) => tokens.iter().any(|token| {
                matches!(
                    token,
                    Token::Word(word)
                        if matches!(word.keyword, Keyword::INSERT | Keyword::UPDATE | Keyword::DELETE)
                )
            }),
            Err(e) => {
                tracing::debug!(error = %e, "could not tokenize query, using substring guard");
                contains_mutating_word(query)
            }
        }
    }
}

fn contains_mutating_word(query: &str) -> bool {
    let lowercase = query.to_lowercase();
    MUTATING_WORDS.iter().any(|word| lowercase.contains(word))
}

/// Tokenizer dialect for a dialect config
fn dialect_for(dialect: DialectConfig) -> Box<dyn Dialect> {
    match dialect {
        DialectConfig::Sqlite => Box::new(SQLiteDialect {}),
        DialectConfig::Postgres => Box::new(PostgreSqlDialect {}),
        DialectConfig::Generic => Box::new(GenericDialect {}),
    }
}
