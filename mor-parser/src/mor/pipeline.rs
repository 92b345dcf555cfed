//! Processing pipeline for the MOR formats
//!
//! Every format goes through the same sequence of stages:
//!
//! 1. **Tokenization**: logos lexers, plus the indentation pass for morcomb files
//! 2. **Parsing**: chumsky grammars over the tokens, producing span-only nodes
//! 3. **Building**: typed model with positions and anchored comments
//!
//! The grammars are built once per parser value. Construct a [MorParser] (or one of the
//! format parsers) and reuse it for every file; nothing is initialized behind the caller's
//! back.
//!
//! # Usage
//!
//!     let parser = MorParser::new();
//!     let document = parser.parse("nouns.cut", source)?;
//!     let text = serialize(&document, true);
//!
//! The free functions [parse], [serialize], [to_table], [from_table] and [mask_redundant]
//! are the engine's entry points for callers that handle one document at a time.

use std::path::Path;

use chumsky::prelude::*;

use crate::mor::ast::{Annotation, Cat, Dictionary, LexEntry, SourceLocation};
use crate::mor::building::{AnnotationBuilder, DictionaryBuilder, EntryGrammar};
use crate::mor::error::{ParseError, ProjectionError, StageError};
use crate::mor::formats::{to_morcomb_string, to_mordict_string};
use crate::mor::lexing::{
    ensure_source_ends_with_newline, lex_annotation, lex_dictionary, TierToken, Token,
};
use crate::mor::masking::{self, MaskingRules};
use crate::mor::parsing::combinators::{run, to_syntax_error};
use crate::mor::parsing::ir::{AnnotationNode, CategoryNode, DictionaryNode};
use crate::mor::parsing::{annotation, dictionary};
use crate::mor::table::{self, Table};

/// The text formats a [Document] can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Dictionary,
    Morcomb,
}

impl Format {
    /// The format implied by a file extension, when there is one.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "cut" | "dict" => Some(Format::Dictionary),
            "mor" | "morcomb" => Some(Format::Morcomb),
            _ => None,
        }
    }

    /// The format of a source: by extension when the name has a known one, otherwise
    /// morcomb when some line opens a `*CHI:` tier.
    pub fn detect(name: &str, source: &str) -> Self {
        Self::from_path(Path::new(name)).unwrap_or_else(|| {
            if source.lines().any(|line| line.starts_with("*CHI:")) {
                Format::Morcomb
            } else {
                Format::Dictionary
            }
        })
    }
}

#[derive(Debug, Clone)]
pub enum Document {
    Dictionary(Dictionary),
    Annotation(Annotation),
}

impl Document {
    pub fn format(&self) -> Format {
        match self {
            Document::Dictionary(_) => Format::Dictionary,
            Document::Annotation(_) => Format::Morcomb,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Document::Dictionary(dictionary) => Some(dictionary),
            Document::Annotation(_) => None,
        }
    }

    pub fn as_annotation(&self) -> Option<&Annotation> {
        match self {
            Document::Annotation(annotation) => Some(annotation),
            Document::Dictionary(_) => None,
        }
    }
}

impl From<Dictionary> for Document {
    fn from(dictionary: Dictionary) -> Self {
        Document::Dictionary(dictionary)
    }
}

impl From<Annotation> for Document {
    fn from(annotation: Annotation) -> Self {
        Document::Annotation(annotation)
    }
}

/// Dictionary files, single entries and single categories
pub struct DictionaryParser {
    document: BoxedParser<'static, Token, DictionaryNode, dictionary::ParserError>,
    entry: EntryGrammar,
    category: BoxedParser<'static, Token, CategoryNode, dictionary::ParserError>,
}

impl DictionaryParser {
    pub fn new() -> Self {
        Self {
            document: dictionary::dictionary().boxed(),
            entry: dictionary::entry_line().boxed(),
            category: dictionary::category_cell().boxed(),
        }
    }

    pub fn parse(&self, name: &str, source: &str) -> Result<Dictionary, ParseError> {
        let source = ensure_source_ends_with_newline(source);
        let node = self
            .run_grammar(&self.document, &source)
            .map_err(|error| error.named(name))?;
        Ok(DictionaryBuilder::new(&source, &self.entry, true).build(name, node))
    }

    /// Parse one entry line. The entry and its parts get no positions.
    pub fn parse_entry(&self, name: &str, text: &str) -> Result<LexEntry, ParseError> {
        let source = ensure_source_ends_with_newline(text);
        let node = self
            .run_grammar(&self.entry, &source)
            .map_err(|error| error.named(name))?;
        Ok(DictionaryBuilder::new(&source, &self.entry, false).entry(&node))
    }

    /// Parse a category on its own, braced or bare, e.g. a table cell.
    pub fn parse_category(&self, name: &str, text: &str) -> Result<Cat, ParseError> {
        let source = ensure_source_ends_with_newline(text);
        let node = self
            .run_grammar(&self.category, &source)
            .map_err(|error| error.named(name))?;
        Ok(DictionaryBuilder::new(&source, &self.entry, false).category(&node))
    }

    fn run_grammar<O>(
        &self,
        grammar: &BoxedParser<'static, Token, O, dictionary::ParserError>,
        source: &str,
    ) -> Result<O, StageError> {
        let locator = SourceLocation::new(source);
        let tokens = lex_dictionary(source)?;
        tracing::debug!(tokens = tokens.len(), "tokenized dictionary source");
        run(grammar, tokens, source.len())
            .map_err(|errors| to_syntax_error(errors, &locator).into())
    }
}

impl Default for DictionaryParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Morcomb annotation files
pub struct AnnotationParser {
    grammar: BoxedParser<'static, TierToken, AnnotationNode, annotation::ParserError>,
}

impl AnnotationParser {
    pub fn new() -> Self {
        Self {
            grammar: annotation::annotation().boxed(),
        }
    }

    pub fn parse(&self, name: &str, source: &str) -> Result<Annotation, ParseError> {
        self.parse_stages(source).map_err(|error| error.named(name))
    }

    fn parse_stages(&self, source: &str) -> Result<Annotation, StageError> {
        let source = ensure_source_ends_with_newline(source);
        let locator = SourceLocation::new(&source);
        let tokens = lex_annotation(&source)?;
        tracing::debug!(tokens = tokens.len(), "tokenized morcomb source");

        let node = run(&self.grammar, tokens, source.len())
            .map_err(|errors| to_syntax_error(errors, &locator))?;
        let annotation = AnnotationBuilder::new(&source).build(node);
        tracing::debug!(sentences = annotation.sentences.len(), "built annotation");
        Ok(annotation)
    }
}

impl Default for AnnotationParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parser for every text format, picking the format per source.
#[derive(Default)]
pub struct MorParser {
    pub dictionary: DictionaryParser,
    pub annotation: AnnotationParser,
}

impl MorParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a source whose format is detected from its name and content.
    pub fn parse(&self, name: &str, source: &str) -> Result<Document, ParseError> {
        self.parse_as(Format::detect(name, source), name, source)
    }

    pub fn parse_as(&self, format: Format, name: &str, source: &str) -> Result<Document, ParseError> {
        tracing::debug!(name, ?format, "parsing");
        match format {
            Format::Dictionary => self.dictionary.parse(name, source).map(Document::from),
            Format::Morcomb => self.annotation.parse(name, source).map(Document::from),
        }
    }
}

/// Parse one source. `name` labels errors and names the dictionary.
pub fn parse(name: &str, source: &str) -> Result<Document, ParseError> {
    MorParser::new().parse(name, source)
}

/// Write a document back to its text format. Morcomb files carry no comments, so
/// `include_comments` only affects dictionaries.
pub fn serialize(document: &Document, include_comments: bool) -> String {
    match document {
        Document::Dictionary(dictionary) => to_mordict_string(dictionary, include_comments),
        Document::Annotation(annotation) => to_morcomb_string(annotation),
    }
}

/// The rows of a document. A morcomb annotation has no entries and gives an empty table.
pub fn to_table(document: &Document) -> Table {
    match document {
        Document::Dictionary(dictionary) => table::to_table(dictionary),
        Document::Annotation(_) => Table::default(),
    }
}

/// A dictionary holding the entries of a table. Row keys, positions, document comments
/// and preambles are not restored. The dictionary takes the name shared by every row, or
/// an untitled name when the rows disagree or there are none.
pub fn from_table(rows: &Table) -> Result<Document, ProjectionError> {
    let mut names = rows.iter().map(|row| row.key.dict_name.as_str());
    let shared = names
        .next()
        .filter(|first| names.all(|name| name == *first))
        .map(str::to_string);
    let mut dictionary = shared.map_or_else(Dictionary::untitled, Dictionary::new);
    dictionary.entries = table::from_table(rows)?;
    Ok(Document::Dictionary(dictionary))
}

/// Disable the redundant rows of a table past line `threshold`, with the default
/// fingerprint and score features. See [masking](crate::mor::masking) for other rules.
pub fn mask_redundant(rows: Table, threshold: i64) -> Table {
    masking::mask_redundant(rows, &MaskingRules::default().with_threshold(threshold))
}
