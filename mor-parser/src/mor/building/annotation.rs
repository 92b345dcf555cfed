//! Annotation builder
//!
//! Walks an [AnnotationNode] and constructs an [Annotation]. The four word tiers of each
//! sentence are zipped into [Word]s by position; a word's position is that of its first
//! present cell, looking at the tiers in `%mor:`, `%comb:`, `%penn:`, `%ort:` order.

use crate::mor::ast::{AnalysisCandidates, Annotation, Sentence, SourceLocation, Word};
use crate::mor::parsing::ir::{AnnotationNode, LineNode, SentenceNode, Span};

pub(crate) struct AnnotationBuilder<'a> {
    locator: SourceLocation<'a>,
}

impl<'a> AnnotationBuilder<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self {
            locator: SourceLocation::new(source),
        }
    }

    pub(crate) fn build(&self, node: AnnotationNode) -> Annotation {
        let annotation = Annotation {
            preambles: node.preambles.iter().map(|span| self.amble(span)).collect(),
            sentences: node.sentences.iter().map(|s| self.sentence(s)).collect(),
            postambles: node.postambles.iter().map(|span| self.amble(span)).collect(),
        };
        tracing::debug!(sentences = annotation.sentences.len(), "built annotation");
        annotation
    }

    fn amble(&self, span: &Span) -> String {
        let line = self.locator.slice(span);
        line.strip_prefix('@').unwrap_or(line).trim_end().to_string()
    }

    fn line_text(&self, node: &LineNode) -> String {
        node.text
            .as_ref()
            .map_or("", |span| self.locator.slice(span))
            .trim()
            .to_string()
    }

    fn cells(&self, spans: &[Span]) -> Vec<String> {
        spans
            .iter()
            .map(|span| self.locator.slice(span).to_string())
            .collect()
    }

    fn sentence(&self, node: &SentenceNode) -> Sentence {
        let mor = node
            .mor
            .cells
            .iter()
            .filter_map(|alternatives| AnalysisCandidates::new(self.cells(alternatives)))
            .collect();

        let mut words = Word::zip_columns(
            mor,
            self.cells(&node.comb.cells),
            self.cells(&node.penn.cells),
            self.cells(&node.ort.cells),
        );
        for (i, word) in words.iter_mut().enumerate() {
            let first = node
                .mor
                .cells
                .get(i)
                .and_then(|alternatives| alternatives.first())
                .or_else(|| node.comb.cells.get(i))
                .or_else(|| node.penn.cells.get(i))
                .or_else(|| node.ort.cells.get(i));
            word.meta.position = first.map(|span| self.locator.span_start(span));
        }

        let mut sentence = Sentence::new(
            self.line_text(&node.id),
            self.line_text(&node.speaker),
            words,
        );
        sentence.meta.position = Some(self.locator.span_start(&node.speaker.header));
        sentence
    }
}
