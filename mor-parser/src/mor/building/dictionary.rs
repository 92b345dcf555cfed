//! Dictionary builder
//!
//! Walks a [DictionaryNode] and constructs a [Dictionary].
//!
//! Disabled entries
//!
//!     A masked entry is written as `% DISABLED: phon\t{...} =sem=`, followed by its comments
//!     on their own lines. To the grammar that is just a run of comments, anchored to
//!     whatever precedes it. The builder looks at every comment run that can end an entry
//!     list position (the tail of the last item of each entry, the tail of the last preamble,
//!     and the document comments when there are no preambles) and, for each comment whose
//!     remainder parses as a complete entry, inserts a disabled [LexEntry] at that point.
//!     Comments after it, up to the next disabled entry, become that entry's own comments.

use chumsky::prelude::*;

use crate::mor::ast::{
    AstNode, AttrValue, Cat, CatAttrVal, Comment, Dictionary, Gloss, LexEntry, Meta, Phon,
    Position, Preamble, Sem, SourceLocation, DISABLED_MARKER,
};
use crate::mor::lexing::{ensure_source_ends_with_newline, lex_dictionary, Token};
use crate::mor::parsing::combinators::run;
use crate::mor::parsing::dictionary::ParserError;
use crate::mor::parsing::ir::{
    AttrValNode, CategoryNode, CommentNode, DelimitedNode, DictionaryNode, EntryNode, PhonNode,
    PreambleNode,
};

/// The single-entry grammar, used to re-read the body of `% DISABLED:` comments.
pub(crate) type EntryGrammar = BoxedParser<'static, Token, EntryNode, ParserError>;

pub(crate) struct DictionaryBuilder<'a, 'g> {
    locator: SourceLocation<'a>,
    entry_grammar: &'g EntryGrammar,
    /// Whether nodes get positions; text re-read from a comment or a table cell has none
    located: bool,
}

impl<'a, 'g> DictionaryBuilder<'a, 'g> {
    pub(crate) fn new(source: &'a str, entry_grammar: &'g EntryGrammar, located: bool) -> Self {
        Self {
            locator: SourceLocation::new(source),
            entry_grammar,
            located,
        }
    }

    pub(crate) fn build(&self, name: &str, node: DictionaryNode) -> Dictionary {
        let mut dictionary = Dictionary::new(name);
        let mut disabled = Vec::new();

        if node.preambles.is_empty() {
            let (comments, entries) = self.unfold_disabled(&node.comments);
            dictionary.comments = comments;
            disabled = entries;
        } else {
            dictionary.comments = self.comments(&node.comments);
        }

        let preamble_count = node.preambles.len();
        for (i, preamble) in node.preambles.iter().enumerate() {
            let (comments, entries) = if i + 1 == preamble_count {
                self.unfold_disabled(&preamble.comments)
            } else {
                (self.comments(&preamble.comments), Vec::new())
            };
            dictionary
                .preambles
                .push(self.preamble(preamble).with_comments(comments));
            disabled.extend(entries);
        }
        dictionary.entries.extend(disabled);

        for entry in &node.entries {
            let (built, disabled) = self.entry_with_tail(entry);
            dictionary.entries.push(built);
            dictionary.entries.extend(disabled);
        }

        tracing::debug!(
            name,
            entries = dictionary.entries.len(),
            disabled = dictionary.disabled_count(),
            "built dictionary"
        );
        dictionary
    }

    fn position(&self, offset: usize) -> Option<Position> {
        self.located.then(|| self.locator.byte_to_position(offset))
    }

    fn meta(&self, offset: usize, comments: Vec<Comment>) -> Meta {
        Meta {
            position: self.position(offset),
            comments,
        }
    }

    pub(crate) fn comment(&self, node: &CommentNode) -> Comment {
        let text = node
            .text
            .as_ref()
            .map_or("", |span| self.locator.slice(span));
        Comment {
            value: text.trim().to_string(),
            meta: self.meta(node.marker.start, Vec::new()),
        }
    }

    fn comments(&self, nodes: &[CommentNode]) -> Vec<Comment> {
        nodes.iter().map(|node| self.comment(node)).collect()
    }

    fn phon(&self, node: &PhonNode) -> Phon {
        Phon {
            value: self.locator.slice(&node.span).to_string(),
            meta: self.meta(node.span.start, self.comments(&node.comments)),
        }
    }

    fn attr_val(&self, node: &AttrValNode) -> CatAttrVal {
        let values = node
            .values
            .iter()
            .map(|span| self.locator.slice(span).to_string())
            .collect();
        CatAttrVal {
            key: self.locator.slice(&node.key).to_string(),
            value: AttrValue::from_tokens(values),
            meta: self.meta(node.open.start, self.comments(&node.comments)),
        }
    }

    pub(crate) fn category(&self, node: &CategoryNode) -> Cat {
        Cat {
            attrvals: node.attrvals.iter().map(|av| self.attr_val(av)).collect(),
            meta: self.meta(node.start, self.comments(&node.comments)),
        }
    }

    /// The value and metadata of a `=sem=` or `"gloss"` node; empty when absent.
    fn delimited(&self, node: Option<&DelimitedNode>, comments: Vec<Comment>) -> (String, Meta) {
        match node {
            Some(node) => {
                let value = node
                    .inner
                    .as_ref()
                    .map_or("", |span| self.locator.slice(span));
                (value.to_string(), self.meta(node.open.start, comments))
            }
            None => (String::new(), Meta::default()),
        }
    }

    pub(crate) fn entry(&self, node: &EntryNode) -> LexEntry {
        let (sem, sem_meta) = self.delimited(
            node.sem.as_ref(),
            node.sem
                .as_ref()
                .map(|n| self.comments(&n.comments))
                .unwrap_or_default(),
        );
        let (gloss, gloss_meta) = self.delimited(
            node.gloss.as_ref(),
            node.gloss
                .as_ref()
                .map(|n| self.comments(&n.comments))
                .unwrap_or_default(),
        );

        let phon = self.phon(&node.phon);
        let position = phon.position();
        LexEntry {
            phon,
            cat: self.category(&node.cat),
            sem: Sem {
                value: sem,
                meta: sem_meta,
            },
            gloss: Gloss {
                value: gloss,
                meta: gloss_meta,
            },
            enabled: true,
            meta: Meta {
                position,
                comments: Vec::new(),
            },
        }
    }

    /// An entry plus the disabled entries hidden in the comments after its last item.
    fn entry_with_tail(&self, node: &EntryNode) -> (LexEntry, Vec<LexEntry>) {
        let mut entry = self.entry(node);
        let tail = match (&node.gloss, &node.sem) {
            (Some(gloss), _) => &gloss.comments,
            (None, Some(sem)) => &sem.comments,
            (None, None) => &node.cat.comments,
        };

        let (comments, disabled) = self.unfold_disabled(tail);
        if node.gloss.is_some() {
            entry.gloss.meta.comments = comments;
        } else if node.sem.is_some() {
            entry.sem.meta.comments = comments;
        } else {
            entry.cat.meta.comments = comments;
        }
        (entry, disabled)
    }

    fn preamble(&self, node: &PreambleNode) -> Preamble {
        Preamble {
            value: self.locator.slice(&node.value).trim_end().to_string(),
            meta: self.meta(node.marker.start, Vec::new()),
        }
    }

    /// Split a comment run into the comments that stay where they are and the disabled
    /// entries that follow them.
    fn unfold_disabled(&self, nodes: &[CommentNode]) -> (Vec<Comment>, Vec<LexEntry>) {
        let mut kept = Vec::new();
        let mut disabled: Vec<LexEntry> = Vec::new();

        for node in nodes {
            let comment = self.comment(node);
            if let Some(entry) = self.disabled_entry(&comment) {
                disabled.push(entry);
            } else if let Some(last) = disabled.last_mut() {
                last.meta.comments.push(comment);
            } else {
                kept.push(comment);
            }
        }
        (kept, disabled)
    }

    fn disabled_entry(&self, comment: &Comment) -> Option<LexEntry> {
        let body = comment.value.strip_prefix(DISABLED_MARKER)?.trim();
        if body.is_empty() {
            return None;
        }

        let source = ensure_source_ends_with_newline(body);
        let tokens = lex_dictionary(&source).ok()?;
        let node = run(self.entry_grammar, tokens, source.len()).ok()?;

        let mut entry = DictionaryBuilder::new(&source, self.entry_grammar, false)
            .entry(&node)
            .with_enabled(false);
        entry.meta.position = comment.position();
        tracing::trace!(phon = %entry.phon.value, "unfolded disabled entry");
        Some(entry)
    }
}
