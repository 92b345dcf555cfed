//! Error types
//!
//!     Every failure is terminal for the operation in progress: a parse either yields a full
//!     model or one of these errors, never a partial tree.
//!
//!         - [LexError]: input the tokenizers do not recognize, or an indented row that closes
//!           no open block.
//!         - [SyntaxError]: a token the grammar did not expect at that point.
//!         - [ParseError]: either of the above, tagged with the file name or stream label.
//!         - [ProjectionError]: a table row lacks a column needed to rebuild an entry, or
//!           holds a value the column does not accept.
//!         - [MorError]: the umbrella for the library's fallible operations.

use thiserror::Error;

use crate::mor::ast::range::Position;
use crate::mor::table::{Column, RowKey};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("{position}: unrecognized input {text:?}")]
    UnrecognizedInput { position: Position, text: String },

    #[error("{position}: indentation of width {width} does not match any enclosing block")]
    Indentation { position: Position, width: usize },
}

impl LexError {
    pub fn position(&self) -> Position {
        match self {
            LexError::UnrecognizedInput { position, .. } | LexError::Indentation { position, .. } => {
                *position
            }
        }
    }
}

/// A grammar violation. `expected` lists what would have been accepted at `position`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{position}: {message}")]
pub struct SyntaxError {
    pub position: Position,
    pub found: Option<String>,
    pub expected: Vec<String>,
    /// The production being parsed when the error occurred, when known
    pub context: Option<String>,
    pub message: String,
}

impl SyntaxError {
    pub fn new(
        position: Position,
        found: Option<String>,
        mut expected: Vec<String>,
        context: Option<String>,
    ) -> Self {
        expected.sort();
        expected.dedup();

        let found_text = found.as_deref().unwrap_or("end of input");
        let mut message = format!("unexpected {}", found_text);
        if !expected.is_empty() {
            message.push_str(&format!(", expected {}", expected.join(" or ")));
        }
        if let Some(context) = &context {
            message.push_str(&format!(" while parsing {}", context));
        }

        Self {
            position,
            found,
            expected,
            context,
            message,
        }
    }

    /// An error with a free-form description, for checks made after the grammar matched.
    pub fn custom(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            found: None,
            expected: Vec::new(),
            context: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{source_name}:{error}")]
    Lex {
        source_name: String,
        #[source]
        error: LexError,
    },

    #[error("{source_name}:{error}")]
    Syntax {
        source_name: String,
        #[source]
        error: SyntaxError,
    },
}

impl ParseError {
    pub fn source_name(&self) -> &str {
        match self {
            ParseError::Lex { source_name, .. } | ParseError::Syntax { source_name, .. } => {
                source_name
            }
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex { error, .. } => error.position(),
            ParseError::Syntax { error, .. } => error.position,
        }
    }
}

/// Failure of the lexing or parsing stages before a source name is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StageError {
    Lex(LexError),
    Syntax(SyntaxError),
}

impl StageError {
    pub(crate) fn named(self, source_name: &str) -> ParseError {
        let source_name = source_name.to_string();
        match self {
            StageError::Lex(error) => ParseError::Lex { source_name, error },
            StageError::Syntax(error) => ParseError::Syntax { source_name, error },
        }
    }
}

impl From<LexError> for StageError {
    fn from(error: LexError) -> Self {
        StageError::Lex(error)
    }
}

impl From<SyntaxError> for StageError {
    fn from(error: SyntaxError) -> Self {
        StageError::Syntax(error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("row {key} has no {column} column")]
    MissingColumn { column: Column, key: RowKey },

    #[error("row {key} has {value:?} in its {column} column")]
    InvalidValue {
        column: Column,
        key: RowKey,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum MorError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error("table error: {0}")]
    Table(#[from] csv::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_message() {
        let error = SyntaxError::new(
            Position::new(2, 5),
            Some("'='".to_string()),
            vec!["'{'".to_string(), "'['".to_string(), "'{'".to_string()],
            Some("category".to_string()),
        );
        assert_eq!(
            error.to_string(),
            "2:5: unexpected '=', expected '[' or '{' while parsing category"
        );
    }

    #[test]
    fn test_parse_error_names_its_source() {
        let error = StageError::Lex(LexError::UnrecognizedInput {
            position: Position::new(1, 4),
            text: "\u{b}".to_string(),
        })
        .named("nouns.cut");

        assert_eq!(error.source_name(), "nouns.cut");
        assert_eq!(error.position(), Position::new(1, 4));
        assert_eq!(error.to_string(), "nouns.cut:1:4: unrecognized input \"\\u{b}\"");
    }
}
