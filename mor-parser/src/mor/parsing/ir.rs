//! Intermediate representation produced by the grammars
//!
//!     These nodes hold byte spans only. No text is copied and no position is computed at
//!     this stage; the [building](crate::mor::building) stage slices the source and turns
//!     spans into positions. Every production returns its trailing comments as an explicit
//!     `comments` field.

use std::ops::Range;

pub(crate) type Span = Range<usize>;

// Dictionary

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CommentNode {
    /// The `%` marker
    pub marker: Span,
    /// Everything after the marker up to the end of the line, if anything
    pub text: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PhonNode {
    pub span: Span,
    pub comments: Vec<CommentNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AttrValNode {
    pub open: Span,
    pub key: Span,
    pub values: Vec<Span>,
    pub comments: Vec<CommentNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryNode {
    /// Offset of the opening brace, or of the first bracket for a bare category
    pub start: usize,
    pub attrvals: Vec<AttrValNode>,
    pub comments: Vec<CommentNode>,
}

/// `=sem=` or `"gloss"`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DelimitedNode {
    pub open: Span,
    /// Between the delimiters; `None` when they are adjacent
    pub inner: Option<Span>,
    pub comments: Vec<CommentNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EntryNode {
    pub phon: PhonNode,
    pub cat: CategoryNode,
    pub sem: Option<DelimitedNode>,
    pub gloss: Option<DelimitedNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PreambleNode {
    pub marker: Span,
    pub value: Span,
    pub comments: Vec<CommentNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DictionaryNode {
    pub comments: Vec<CommentNode>,
    pub preambles: Vec<PreambleNode>,
    pub entries: Vec<EntryNode>,
}

// Morcomb

/// A single-line tier: `*CHI:` or `@G:`
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LineNode {
    pub header: Span,
    pub text: Option<Span>,
}

/// A word tier, with the cells of its continuation rows appended in order
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TierNode<C> {
    pub header: Span,
    pub cells: Vec<C>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SentenceNode {
    pub speaker: LineNode,
    /// One entry per word, one span per `^`-separated candidate
    pub mor: TierNode<Vec<Span>>,
    pub comb: TierNode<Span>,
    pub penn: TierNode<Span>,
    pub ort: TierNode<Span>,
    pub id: LineNode,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AnnotationNode {
    /// Each span covers a whole `@...` line without its newline
    pub preambles: Vec<Span>,
    pub sentences: Vec<SentenceNode>,
    pub postambles: Vec<Span>,
}
