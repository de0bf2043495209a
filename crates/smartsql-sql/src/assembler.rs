//! Output assembly
//!
//! Copies the literal text of the smart query and splices in replacements.

use std::ops::Range;

/// Builds translated SQL from a source query and ordered replacements
///
/// Replacements must be pushed left to right with non-overlapping spans.
pub(crate) struct Assembler<'a> {
    source: &'a str,
    output: String,
    /// Byte offset in `source` up to which text has been emitted
    copied: usize,
}

impl<'a> Assembler<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            source,
            output: String::with_capacity(source.len()),
            copied: 0,
        }
    }

    /// Emit the literal text before `span`, then `replacement` in its place
    pub(crate) fn replace(&mut self, span: Range<usize>, replacement: &str) {
        debug_assert!(span.start >= self.copied, "replacements out of order");

        self.output.push_str(&self.source[self.copied..span.start]);
        self.output.push_str(replacement);
        self.copied = span.end;
    }

    /// Emit the trailing literal text and return the output
    pub(crate) fn finish(mut self) -> String {
        self.output.push_str(&self.source[self.copied..]);
        self.output
    }
}
