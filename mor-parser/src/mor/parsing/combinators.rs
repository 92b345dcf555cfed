//! Helpers shared by the grammars: running a parser over a token vector and turning
//! chumsky's errors into [SyntaxError]s.

use chumsky::prelude::*;
use chumsky::Stream;
use std::hash::Hash;

use crate::mor::ast::range::SourceLocation;
use crate::mor::error::SyntaxError;
use crate::mor::lexing::{TierToken, Token};
use crate::mor::parsing::ir::Span;

/// Tokens that can be named in error messages
pub(crate) trait DescribeToken: Clone + Hash + Eq {
    fn describe(&self) -> String;
}

impl DescribeToken for Token {
    fn describe(&self) -> String {
        Token::describe(self)
    }
}

impl DescribeToken for TierToken {
    fn describe(&self) -> String {
        TierToken::describe(self)
    }
}

/// The span from the first to the last of a run of token spans.
pub(crate) fn cover(spans: &[Span]) -> Option<Span> {
    Some(spans.first()?.start..spans.last()?.end)
}

/// Run a grammar over a token vector. End of input is reported at `source_len`.
pub(crate) fn run<T, O, P>(
    parser: &P,
    tokens: Vec<(T, Span)>,
    source_len: usize,
) -> Result<O, Vec<Simple<T>>>
where
    T: DescribeToken,
    P: Parser<T, O, Error = Simple<T>>,
{
    let eoi = source_len..source_len;
    parser.parse(Stream::from_iter(eoi, tokens.into_iter()))
}

/// Collapse chumsky's errors into the one that got furthest into the input.
pub(crate) fn to_syntax_error<T: DescribeToken>(
    errors: Vec<Simple<T>>,
    locator: &SourceLocation,
) -> SyntaxError {
    let Some(error) = errors.into_iter().max_by_key(|e| e.span().start) else {
        let end = locator.byte_to_position(locator.source().len());
        return SyntaxError::custom(end, "invalid input");
    };

    let position = locator.byte_to_position(error.span().start);
    if let chumsky::error::SimpleReason::Custom(message) = error.reason() {
        return SyntaxError::custom(position, message.clone());
    }

    let expected = error
        .expected()
        .map(|token| match token {
            Some(token) => token.describe(),
            None => "end of input".to_string(),
        })
        .collect();
    let found = error.found().map(DescribeToken::describe);
    let context = error.label().map(str::to_string);

    SyntaxError::new(position, found, expected, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover() {
        assert_eq!(cover(&[2..4, 4..5, 7..9]), Some(2..9));
        assert_eq!(cover(&[]), None);
    }

    #[test]
    fn test_furthest_error_wins() {
        let source = "ab\ncd\n";
        let locator = SourceLocation::new(source);
        let near = Simple::expected_input_found(0..1, vec![Some(Token::OpenBrace)], None);
        let far = Simple::expected_input_found(
            3..4,
            vec![Some(Token::OpenBracket)],
            Some(Token::Equals),
        );

        let error = to_syntax_error(vec![near, far], &locator);
        assert_eq!(error.position.line, 2);
        assert_eq!(error.found.as_deref(), Some("'='"));
        assert_eq!(error.expected, vec!["'['".to_string()]);
    }
}
