//! Dictionary grammar
//!
//!     document := blank* (comment blank*)* preamble* entry*
//!     preamble := "@" text-to-end-of-line anchored
//!     entry    := phon anchored category anchored (sem anchored)? (gloss anchored)?
//!     phon     := TEXT non-blank*                  (stops at blanks, "{" and "%")
//!     category := "{" blank* attrval* "}" | attrval+
//!     attrval  := "[" word (blank word)* "]"
//!     sem      := "=" not-(= or %)* "="
//!     gloss    := '"' not-(" or %)* '"'
//!     comment  := "%" not-newline* NEWLINE
//!     anchored := blank* (comment blank*)*
//!
//!     Every production is a function returning a chumsky parser. Item text is never
//!     assembled from tokens; each node records the spans needed to slice it from the source.

use chumsky::prelude::*;

use crate::mor::lexing::Token;
use crate::mor::parsing::combinators::cover;
use crate::mor::parsing::ir::{
    AttrValNode, CategoryNode, CommentNode, DelimitedNode, DictionaryNode, EntryNode, PhonNode,
    PreambleNode, Span,
};

pub(crate) type ParserError = Simple<Token>;

fn token_span(token: Token) -> impl Parser<Token, Span, Error = ParserError> + Clone {
    just(token).map_with_span(|_, span| span)
}

fn inline_blanks() -> impl Parser<Token, (), Error = ParserError> + Clone {
    just(Token::Whitespace).repeated().ignored()
}

fn blanks() -> impl Parser<Token, (), Error = ParserError> + Clone {
    filter(Token::is_blank).repeated().ignored()
}

pub(crate) fn comment() -> impl Parser<Token, CommentNode, Error = ParserError> + Clone {
    let body = filter(|t: &Token| *t != Token::Newline).map_with_span(|_, span| span);

    token_span(Token::Percent)
        .then(body.repeated())
        .then_ignore(just(Token::Newline))
        .map(|(marker, body)| CommentNode {
            marker,
            text: cover(&body),
        })
        .labelled("comment")
}

/// Comments anchored to the item just parsed, with the blanks around them.
fn anchored() -> impl Parser<Token, Vec<CommentNode>, Error = ParserError> + Clone {
    blanks().ignore_then(comment().then_ignore(blanks()).repeated())
}

fn phon() -> impl Parser<Token, PhonNode, Error = ParserError> + Clone {
    let head = filter(|t: &Token| matches!(t, Token::Text(_))).map_with_span(|_, span| span);
    let tail = filter(|t: &Token| {
        !matches!(
            t,
            Token::Whitespace | Token::Newline | Token::OpenBrace | Token::Percent
        )
    })
    .map_with_span(|_, span| span);

    head.then(tail.repeated())
        .map(|(first, rest): (Span, Vec<Span>)| match rest.last() {
            Some(last) => first.start..last.end,
            None => first,
        })
        .labelled("surface form")
        .then(anchored())
        .map(|(span, comments)| PhonNode { span, comments })
}

/// A feature key or value: a run of tokens up to a blank or a bracket.
fn feature_word() -> impl Parser<Token, Span, Error = ParserError> + Clone {
    filter(|t: &Token| {
        !matches!(
            t,
            Token::Whitespace
                | Token::Newline
                | Token::OpenBrace
                | Token::OpenBracket
                | Token::CloseBracket
                | Token::Percent
        )
    })
    .map_with_span(|_, span| span)
    .repeated()
    .at_least(1)
    .map(|spans: Vec<Span>| cover(&spans).unwrap_or_default())
}

fn attr_val() -> impl Parser<Token, AttrValNode, Error = ParserError> + Clone {
    token_span(Token::OpenBracket)
        .then_ignore(inline_blanks())
        .then(feature_word().labelled("feature name"))
        .then(inline_blanks().ignore_then(feature_word()).repeated())
        .then_ignore(inline_blanks())
        .then_ignore(just(Token::CloseBracket))
        .then(anchored())
        .map(|(((open, key), values), comments)| AttrValNode {
            open,
            key,
            values,
            comments,
        })
        .labelled("feature bracket")
}

fn category() -> impl Parser<Token, CategoryNode, Error = ParserError> + Clone {
    let braced = token_span(Token::OpenBrace)
        .then_ignore(blanks())
        .then(attr_val().repeated())
        .then_ignore(just(Token::CloseBrace))
        .then(anchored())
        .map(|((open, attrvals), comments)| CategoryNode {
            start: open.start,
            attrvals,
            comments,
        });

    // Without braces, comments after the last bracket belong to the category
    let bare = attr_val()
        .repeated()
        .at_least(1)
        .map(|mut attrvals: Vec<AttrValNode>| {
            let start = attrvals.first().map_or(0, |av| av.open.start);
            let comments = attrvals
                .last_mut()
                .map(|av| std::mem::take(&mut av.comments))
                .unwrap_or_default();
            CategoryNode {
                start,
                attrvals,
                comments,
            }
        });

    braced.or(bare).labelled("category")
}

fn delimited(
    delimiter: Token,
    what: &'static str,
) -> impl Parser<Token, DelimitedNode, Error = ParserError> + Clone {
    let closing = delimiter.clone();
    let body = filter(move |t: &Token| *t != closing && *t != Token::Percent)
        .map_with_span(|_, span| span);

    token_span(delimiter.clone())
        .then(body.repeated())
        .then_ignore(just(delimiter))
        .then(anchored())
        .map(|((open, body), comments)| DelimitedNode {
            open,
            inner: cover(&body),
            comments,
        })
        .labelled(what)
}

pub(crate) fn entry() -> impl Parser<Token, EntryNode, Error = ParserError> + Clone {
    phon()
        .then(category())
        .then(delimited(Token::Equals, "translation").or_not())
        .then(delimited(Token::Quote, "gloss").or_not())
        .map(|(((phon, cat), sem), gloss)| EntryNode {
            phon,
            cat,
            sem,
            gloss,
        })
}

fn preamble() -> impl Parser<Token, PreambleNode, Error = ParserError> + Clone {
    let value = filter(|t: &Token| !matches!(t, Token::Percent | Token::Newline))
        .map_with_span(|_, span| span);

    token_span(Token::At)
        .then(value.repeated().at_least(1))
        .then(anchored())
        .map(|((marker, value), comments)| PreambleNode {
            marker,
            value: cover(&value).unwrap_or_default(),
            comments,
        })
        .labelled("preamble")
}

/// A whole dictionary file.
pub(crate) fn dictionary() -> impl Parser<Token, DictionaryNode, Error = ParserError> {
    blanks()
        .ignore_then(comment().then_ignore(blanks()).repeated())
        .then(preamble().repeated())
        .then(entry().repeated())
        .then_ignore(end())
        .map(|((comments, preambles), entries)| DictionaryNode {
            comments,
            preambles,
            entries,
        })
}

/// Exactly one entry, e.g. the remainder of a `% DISABLED:` comment.
pub(crate) fn entry_line() -> impl Parser<Token, EntryNode, Error = ParserError> {
    blanks().ignore_then(entry()).then_ignore(end())
}

/// Exactly one category, e.g. a table cell.
pub(crate) fn category_cell() -> impl Parser<Token, CategoryNode, Error = ParserError> {
    blanks().ignore_then(category()).then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mor::lexing::{ensure_source_ends_with_newline, lex_dictionary};
    use crate::mor::parsing::combinators::run;

    fn parse_with<O>(
        parser: impl Parser<Token, O, Error = ParserError>,
        source: &str,
    ) -> Result<O, Vec<ParserError>> {
        let source = ensure_source_ends_with_newline(source);
        let tokens = lex_dictionary(&source).expect("lex");
        run(&parser, tokens, source.len())
    }

    #[test]
    fn test_entry_spans() {
        let source = "cat\t{[scat n]} =animal= \"a feline\"\n";
        let entry = parse_with(entry_line(), source).expect("parse");

        assert_eq!(&source[entry.phon.span.clone()], "cat");
        assert_eq!(entry.cat.start, 4);
        assert_eq!(entry.cat.attrvals.len(), 1);
        assert_eq!(&source[entry.cat.attrvals[0].key.clone()], "scat");
        let sem = entry.sem.expect("sem");
        assert_eq!(&source[sem.inner.expect("inner")], "animal");
        let gloss = entry.gloss.expect("gloss");
        assert_eq!(&source[gloss.inner.expect("inner")], "a feline");
    }

    #[test]
    fn test_empty_delimiters_have_no_inner_span() {
        let entry = parse_with(entry_line(), "x\t{} == \"\"").expect("parse");
        assert_eq!(entry.sem.expect("sem").inner, None);
        assert_eq!(entry.gloss.expect("gloss").inner, None);
    }

    #[test]
    fn test_bare_brackets_are_a_category() {
        let source = "cat\t[scat n] [num sg] % tail\n";
        let entry = parse_with(entry_line(), source).expect("parse");
        assert_eq!(entry.cat.attrvals.len(), 2);
        assert_eq!(entry.cat.comments.len(), 1);
        assert!(entry.cat.attrvals[1].comments.is_empty());
    }

    #[test]
    fn test_comments_anchor_to_preceding_item() {
        let source = "cat % one\n% two\n\t{[scat n]}\n% three\n";
        let entry = parse_with(entry_line(), source).expect("parse");
        assert_eq!(entry.phon.comments.len(), 2);
        assert_eq!(entry.cat.comments.len(), 1);
    }

    #[test]
    fn test_document_sections() {
        let source = "% head\n@UTF8\n% after preamble\ncat\t{[scat n]}\ndog\t{[scat n]}\n";
        let document = parse_with(dictionary(), source).expect("parse");
        assert_eq!(document.comments.len(), 1);
        assert_eq!(document.preambles.len(), 1);
        assert_eq!(document.preambles[0].comments.len(), 1);
        assert_eq!(document.entries.len(), 2);
    }

    #[test]
    fn test_entry_without_category_fails() {
        assert!(parse_with(dictionary(), "cat =animal=\n").is_err());
    }

    #[test]
    fn test_multiword_value_list() {
        let source = "x\t{[scat adj n]}\n";
        let entry = parse_with(entry_line(), source).expect("parse");
        assert_eq!(entry.cat.attrvals[0].values.len(), 2);
    }
}
