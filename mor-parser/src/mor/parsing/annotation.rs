//! Morcomb grammar
//!
//!     annotation := NEWLINE* amble* sentence* amble*
//!     amble      := TEXT("@...") rest-of-line NEWLINE+
//!     sentence   := line(*CHI:) tier(%mor:, candidates) tier(%comb:) tier(%penn:) tier(%ort:)
//!                   line(@G:)
//!     line(H)    := H SPACES? rest-of-line NEWLINE+
//!     tier(H, c) := H SPACES? row(c) NEWLINE+ block(c)?
//!     block(c)   := INDENT (row(c) NEWLINE+ | block(c))+ DEDENT
//!     row(c)     := c (SPACES c)* SPACES?
//!     candidates := TEXT ("^" TEXT)*
//!
//!     The Indent/Dedent tokens come from the indentation pass, so a continuation block is
//!     parsed like any bracketed group. The cells of every row of a tier, block rows included,
//!     are concatenated in order.

use chumsky::prelude::*;

use crate::mor::lexing::TierToken;
use crate::mor::parsing::combinators::cover;
use crate::mor::parsing::ir::{AnnotationNode, LineNode, SentenceNode, Span, TierNode};

pub(crate) type ParserError = Simple<TierToken>;

fn header(token: TierToken) -> impl Parser<TierToken, Span, Error = ParserError> + Clone {
    just(token).map_with_span(|_, span| span)
}

fn space() -> impl Parser<TierToken, (), Error = ParserError> + Clone {
    filter(|t: &TierToken| matches!(t, TierToken::Spaces(_))).ignored()
}

fn newlines() -> impl Parser<TierToken, (), Error = ParserError> + Clone {
    just(TierToken::Newline)
        .repeated()
        .at_least(1)
        .ignored()
        .labelled("end of line")
}

fn text() -> impl Parser<TierToken, Span, Error = ParserError> + Clone {
    filter(|t: &TierToken| matches!(t, TierToken::Text(_))).map_with_span(|_, span| span)
}

fn rest_of_line() -> impl Parser<TierToken, Option<Span>, Error = ParserError> + Clone {
    filter(|t: &TierToken| {
        !matches!(
            t,
            TierToken::Newline | TierToken::Indent | TierToken::Dedent
        )
    })
    .map_with_span(|_, span| span)
    .repeated()
    .map(|spans: Vec<Span>| cover(&spans))
}

/// `n|dog^v|dog`: one span per alternative.
fn candidates() -> impl Parser<TierToken, Vec<Span>, Error = ParserError> + Clone {
    text()
        .then(just(TierToken::Caret).ignore_then(text()).repeated())
        .map(|(first, rest)| {
            let mut alternatives = Vec::with_capacity(rest.len() + 1);
            alternatives.push(first);
            alternatives.extend(rest);
            alternatives
        })
        .labelled("candidate list")
}

/// A plain cell; a stray `^` is kept as part of the cell text.
fn cell() -> impl Parser<TierToken, Span, Error = ParserError> + Clone {
    filter(|t: &TierToken| matches!(t, TierToken::Text(_) | TierToken::Caret))
        .map_with_span(|_, span| span)
        .repeated()
        .at_least(1)
        .map(|spans: Vec<Span>| cover(&spans).unwrap_or_default())
}

fn row<C, P>(cell: P) -> impl Parser<TierToken, Vec<C>, Error = ParserError> + Clone
where
    P: Parser<TierToken, C, Error = ParserError> + Clone,
{
    cell.separated_by(space()).allow_trailing()
}

fn tier<C, P>(
    token: TierToken,
    name: &'static str,
    cell: P,
) -> impl Parser<TierToken, TierNode<C>, Error = ParserError> + Clone
where
    C: Clone + 'static,
    P: Parser<TierToken, C, Error = ParserError> + Clone + 'static,
{
    let continuation = recursive(|block| {
        just(TierToken::Indent)
            .ignore_then(
                row(cell.clone())
                    .then_ignore(newlines())
                    .or(block)
                    .repeated()
                    .at_least(1),
            )
            .then_ignore(just(TierToken::Dedent))
            .map(|rows: Vec<Vec<C>>| rows.into_iter().flatten().collect::<Vec<C>>())
    });

    header(token)
        .then_ignore(space().or_not())
        .then(row(cell))
        .then_ignore(newlines())
        .then(continuation.or_not())
        .map(|((header, mut cells), more)| {
            cells.extend(more.unwrap_or_default());
            TierNode { header, cells }
        })
        .labelled(name)
}

fn line(
    token: TierToken,
    name: &'static str,
) -> impl Parser<TierToken, LineNode, Error = ParserError> + Clone {
    header(token)
        .then_ignore(space().or_not())
        .then(rest_of_line())
        .then_ignore(newlines())
        .map(|(header, text)| LineNode { header, text })
        .labelled(name)
}

fn amble() -> impl Parser<TierToken, Span, Error = ParserError> + Clone {
    filter(|t: &TierToken| matches!(t, TierToken::Text(text) if text.starts_with('@')))
        .map_with_span(|_, span: Span| span)
        .then(rest_of_line())
        .then_ignore(newlines())
        .map(|(marker, rest)| match rest {
            Some(rest) => marker.start..rest.end,
            None => marker,
        })
        .labelled("@ line")
}

fn sentence() -> impl Parser<TierToken, SentenceNode, Error = ParserError> + Clone {
    line(TierToken::SpeakerTier, "*CHI: tier")
        .then(tier(TierToken::MorTier, "%mor: tier", candidates()))
        .then(tier(TierToken::CombTier, "%comb: tier", cell()))
        .then(tier(TierToken::PennTier, "%penn: tier", cell()))
        .then(tier(TierToken::OrtTier, "%ort: tier", cell()))
        .then(line(TierToken::IdTier, "@G: tier"))
        .map(|(((((speaker, mor), comb), penn), ort), id)| SentenceNode {
            speaker,
            mor,
            comb,
            penn,
            ort,
            id,
        })
        .labelled("sentence")
}

/// A whole morcomb file.
pub(crate) fn annotation() -> impl Parser<TierToken, AnnotationNode, Error = ParserError> {
    just(TierToken::Newline)
        .repeated()
        .ignore_then(amble().repeated())
        .then(sentence().repeated())
        .then(amble().repeated())
        .then_ignore(end())
        .map(|((preambles, sentences), postambles)| AnnotationNode {
            preambles,
            sentences,
            postambles,
        })
}
