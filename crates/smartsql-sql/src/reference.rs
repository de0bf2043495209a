//! `{soup}` and `{soup:path}` reference scanning
//!
//! A reference is `{`, one or more characters other than `}`, then `}`.
//! Matches are found left to right and never overlap. The body is split on
//! `:` into a soup name and an optional path; a body with more than one `:`
//! is malformed.

use crate::error::SmartSqlError;
use smartsql_core::PathKind;
use std::ops::Range;
use std::str::CharIndices;

/// A placeholder found in a smart query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Full text including braces
    pub raw: &'a str,

    /// Soup name (text before the `:`)
    pub soup: &'a str,

    /// Path (text after the `:`), `None` for `{soup}`
    pub path: Option<&'a str>,

    /// Byte range of `raw` in the query
    pub span: Range<usize>,

    /// Character offset of the opening `{`
    ///
    /// Counts Unicode scalar values. Text outside the Basic Multilingual
    /// Plane (e.g. `𝄞`) counts as one character here, where a UTF-16 based
    /// offset would count two.
    pub position: usize,
}

impl<'a> Reference<'a> {
    /// Text between the braces
    pub fn body(&self) -> &'a str {
        &self.raw[1..self.raw.len() - 1]
    }

    /// Check if this is a `{soup}` table reference
    pub fn is_table(&self) -> bool {
        self.path.is_none()
    }

    /// Kind of path for `{soup:path}` references
    pub fn path_kind(&self) -> Option<PathKind> {
        self.path.map(PathKind::of)
    }
}

/// An opening brace whose closing brace has not been seen yet
#[derive(Debug, Clone, Copy)]
struct OpenBrace {
    /// Byte offset of `{`
    start: usize,

    /// Character offset of `{`
    position: usize,

    /// Number of `:` seen in the body so far
    colons: usize,
}

/// Lazy left-to-right scanner over the references of a smart query
///
/// Yields each reference in order. A malformed reference is yielded as an
/// error, after which the scanner is exhausted.
pub struct ReferenceScanner<'a> {
    query: &'a str,
    chars: CharIndices<'a>,
    /// Characters consumed so far
    consumed: usize,
    failed: bool,
}

impl<'a> ReferenceScanner<'a> {
    /// Create a scanner over `query`
    pub fn new(query: &'a str) -> Self {
        Self {
            query,
            chars: query.char_indices(),
            consumed: 0,
            failed: false,
        }
    }

    fn finish(&mut self, open: OpenBrace, close: usize) -> Result<Reference<'a>, SmartSqlError> {
        let raw = &self.query[open.start..close + 1];
        let body = &self.query[open.start + 1..close];
        let span = open.start..close + 1;

        let (soup, path) = match open.colons {
            0 => (body, None),
            1 => match body.split_once(':') {
                Some((soup, path)) => (soup, Some(path)),
                None => (body, None),
            },
            _ => {
                self.failed = true;
                return Err(SmartSqlError::MalformedReference {
                    reference: raw.to_string(),
                    position: open.position,
                });
            }
        };

        Ok(Reference {
            raw,
            soup,
            path,
            span,
            position: open.position,
        })
    }
}

impl<'a> Iterator for ReferenceScanner<'a> {
    type Item = Result<Reference<'a>, SmartSqlError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut open: Option<OpenBrace> = None;

        while let Some((offset, ch)) = self.chars.next() {
            let position = self.consumed;
            self.consumed += 1;

            match ch {
                '{' if open.is_none() => {
                    open = Some(OpenBrace {
                        start: offset,
                        position,
                        colons: 0,
                    });
                }
                '}' => {
                    if let Some(brace) = open {
                        // `{}` is not a reference
                        if offset == brace.start + 1 {
                            open = None;
                        } else {
                            return Some(self.finish(brace, offset));
                        }
                    }
                }
                ':' => {
                    if let Some(brace) = open.as_mut() {
                        brace.colons += 1;
                    }
                }
                _ => {}
            }
        }

        // An unterminated `{` is literal text
        None
    }
}

impl std::iter::FusedIterator for ReferenceScanner<'_> {}
