//! Lexer
//!
//!     Tokenization for the dictionary and morcomb formats. Both start with a logos lexer
//!     producing `(Token, Range<usize>)` pairs, see [base_tokenization](base_tokenization).
//!     The byte ranges are never altered by later stages: the grammar uses them to slice the
//!     exact source text of multi-token items, and the builder turns them into positions.
//!
//! The Lexing Pipelines
//!
//!     Dictionary files: core tokenization only. Lines are separated by Newline tokens and
//!     blanks are kept, since a tab between phon and category is part of the format.
//!     See [tokens](tokens).
//!
//!     Morcomb files:
//!         1. Core tokenization, see [tier_tokens](tier_tokens).
//!         2. Indentation mapping, see [indentation](indentation). Continuation rows become
//!            Indent ... Dedent blocks under the tier they continue, so the grammar can treat
//!            them like bracketed groups.
//!
//!     Rule files are split into classified lines instead, see
//!     [rules::lines](crate::mor::rules::lines).

pub mod base_tokenization;
pub mod indentation;
pub mod tier_tokens;
pub mod tokens;

use std::ops::Range;

pub use base_tokenization::tokenize;
pub use indentation::IndentationMapper;
pub use tier_tokens::TierToken;
pub use tokens::Token;

use crate::mor::error::LexError;

/// Preprocesses source text to ensure it ends with a newline.
///
/// Every line-terminated production (comments, preambles, tiers) can then rely on a final
/// newline token.
pub fn ensure_source_ends_with_newline(source: &str) -> String {
    if !source.is_empty() && !source.ends_with('\n') && !source.ends_with('\r') {
        format!("{}\n", source)
    } else {
        source.to_string()
    }
}

/// Tokenize a dictionary source.
pub fn lex_dictionary(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    tokenize::<Token>(source)
}

/// Tokenize a morcomb source and map its indentation.
pub fn lex_annotation(source: &str) -> Result<Vec<(TierToken, Range<usize>)>, LexError> {
    let tokens = tokenize::<TierToken>(source)?;
    IndentationMapper::new(source).map(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_trailing_newline() {
        assert_eq!(ensure_source_ends_with_newline("a"), "a\n");
        assert_eq!(ensure_source_ends_with_newline("a\n"), "a\n");
        assert_eq!(ensure_source_ends_with_newline("a\r"), "a\r");
        assert_eq!(ensure_source_ends_with_newline(""), "");
    }

    #[test]
    fn test_lex_annotation_injects_blocks() {
        let source = "%mor:\ta\n\tb\n";
        let tokens = lex_annotation(source).expect("lex");
        let kinds: Vec<TierToken> = tokens.into_iter().map(|(t, _)| t).collect();
        assert!(kinds.contains(&TierToken::Indent));
        assert_eq!(kinds.last(), Some(&TierToken::Dedent));
    }
}
