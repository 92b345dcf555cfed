//! Morcomb tokens
//!
//!     Tier headers are keywords; everything else on a line is either a `^` candidate
//!     separator or a run of text. Inline whitespace carries its indentation width (a tab
//!     counts as four columns, any other blank as one) so the indentation pass can compare
//!     line starts without going back to the source.
//!
//!     Indent and Dedent are never produced by logos. They are injected by the
//!     [indentation](super::indentation) pass with empty spans.

use logos::Logos;
use std::fmt;

/// Columns a tab advances when measuring indentation
pub const TAB_WIDTH: usize = 4;

pub fn indentation_width(blank: &str) -> usize {
    blank
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
pub enum TierToken {
    #[token("*CHI:")]
    SpeakerTier,

    #[token("%mor:")]
    MorTier,

    #[token("%comb:")]
    CombTier,

    #[token("%penn:")]
    PennTier,

    #[token("%ort:")]
    OrtTier,

    #[token("@G:")]
    IdTier,

    #[token("^")]
    Caret,

    #[regex(r"\r\n|\r|\n")]
    Newline,

    #[regex(r"[ \t\x0C]+", |lex| indentation_width(lex.slice()))]
    Spaces(usize),

    #[regex(r"[^\s\^]+", |lex| lex.slice().to_owned())]
    Text(String),

    // Synthetic tokens from the indentation pass
    Indent,
    Dedent,
}

impl TierToken {
    /// How the token is named in error messages
    pub fn describe(&self) -> String {
        match self {
            TierToken::Newline => "end of line".to_string(),
            TierToken::Spaces(_) => "whitespace".to_string(),
            TierToken::Indent => "indented block".to_string(),
            TierToken::Dedent => "end of indented block".to_string(),
            TierToken::Text(text) => format!("{:?}", text),
            other => format!("'{}'", other),
        }
    }
}

impl fmt::Display for TierToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TierToken::SpeakerTier => "*CHI:",
            TierToken::MorTier => "%mor:",
            TierToken::CombTier => "%comb:",
            TierToken::PennTier => "%penn:",
            TierToken::OrtTier => "%ort:",
            TierToken::IdTier => "@G:",
            TierToken::Caret => "^",
            TierToken::Newline => "\n",
            TierToken::Spaces(_) => " ",
            TierToken::Text(text) => text,
            TierToken::Indent => "<indent>",
            TierToken::Dedent => "<dedent>",
        };
        f.write_str(text)
    }
}
