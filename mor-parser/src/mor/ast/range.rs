//! Position tracking for source locations
//!
//! Lexers hand out `(Token, std::ops::Range<usize>)` pairs; byte offsets are only turned
//! into human-facing [`Position`]s when the typed model is built or an error is reported.
//!
//! - [`Position`] - a 1-based line:column position; columns count characters, not bytes
//! - [`SourceLocation`] - converts byte offsets to positions with a binary search over
//!   the line starts of one source text

use std::fmt;
use std::ops::Range as ByteRange;

/// A line:column position in a source text. Both components start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Provides fast conversion from byte offsets to line/column positions
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];

        // A line ends at `\n`, `\r\n` or a lone `\r`, as in the lexers
        let bytes = source.as_bytes();
        for (byte_pos, &byte) in bytes.iter().enumerate() {
            let ends_line = match byte {
                b'\n' => true,
                b'\r' => bytes.get(byte_pos + 1) != Some(&b'\n'),
                _ => false,
            };
            if ends_line {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a line/column position.
    ///
    /// Offsets past the end of the source clamp to the end.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());

        Position::new(line + 1, column + 1)
    }

    /// Position of the first byte of a span.
    pub fn span_start(&self, span: &ByteRange<usize>) -> Position {
        self.byte_to_position(span.start)
    }

    /// The source text covered by a span.
    pub fn slice(&self, span: &ByteRange<usize>) -> &'a str {
        self.source.get(span.clone()).unwrap_or("")
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Get the total number of lines in the source
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
