//! Core tokenization using the logos lexer
//!
//!     Runs a logos lexer over the whole source and keeps the byte range of every token.
//!     The first input logos cannot match aborts tokenization with a positioned
//!     [LexError](crate::mor::error::LexError).

use logos::Logos;
use std::ops::Range;

use crate::mor::ast::range::SourceLocation;
use crate::mor::error::LexError;

pub fn tokenize<'s, T>(source: &'s str) -> Result<Vec<(T, Range<usize>)>, LexError>
where
    T: Logos<'s, Source = str>,
    T::Extras: Default,
{
    let mut lexer = T::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(_) => {
                let span = lexer.span();
                return Err(LexError::UnrecognizedInput {
                    position: SourceLocation::new(source).byte_to_position(span.start),
                    text: lexer.slice().to_string(),
                });
            }
        }
    }

    tracing::trace!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}
