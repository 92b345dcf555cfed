//! Dictionary tokens
//!
//!     The dictionary lexer is deliberately coarse: delimiters get their own tokens, and
//!     every other run of non-blank characters is a single Text token. What a run means (a
//!     phon, a feature key, part of a gloss) is decided by the grammar, and the exact text
//!     of multi-token items is recovered by slicing the source with the token spans.

use logos::Logos;
use std::fmt;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)]
pub enum Token {
    #[token("%")]
    Percent,

    #[token("@")]
    At,

    #[token("{")]
    OpenBrace,

    #[token("}")]
    CloseBrace,

    #[token("[")]
    OpenBracket,

    #[token("]")]
    CloseBracket,

    #[token("=")]
    Equals,

    #[token("\"")]
    Quote,

    #[regex(r"\r\n|\r|\n")]
    Newline,

    #[regex(r"[ \t\x0C]+")]
    Whitespace,

    #[regex(r#"[^\s{}\[\]%@="]+"#, |lex| lex.slice().to_owned())]
    Text(String),
}

impl Token {
    pub fn is_blank(&self) -> bool {
        matches!(self, Token::Whitespace | Token::Newline)
    }

    /// How the token is named in error messages
    pub fn describe(&self) -> String {
        match self {
            Token::Newline => "end of line".to_string(),
            Token::Whitespace => "whitespace".to_string(),
            Token::Text(text) => format!("{:?}", text),
            other => format!("'{}'", other),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Percent => "%",
            Token::At => "@",
            Token::OpenBrace => "{",
            Token::CloseBrace => "}",
            Token::OpenBracket => "[",
            Token::CloseBracket => "]",
            Token::Equals => "=",
            Token::Quote => "\"",
            Token::Newline => "\n",
            Token::Whitespace => " ",
            Token::Text(text) => text,
        };
        f.write_str(text)
    }
}
