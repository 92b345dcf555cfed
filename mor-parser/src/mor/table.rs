//! Tabular bridge
//!
//!     A dictionary projected to rows, one per entry, for bulk analysis (duplicate detection,
//!     masking). Each row carries a [RowKey] naming where the entry came from:
//!
//!         dict_name   line  column  Phon  Category      Overall Semantics  Morphological Analysis
//!         nouns.cut   12    1       cat   {[scat n]}    =animal=           "a feline"
//!
//!     An entry built in code has no position; its key gets random negative placeholders
//!     instead, which can never be mistaken for a real line or column.
//!
//!     The projection is lossy on the way back: [from_table] rebuilds entries from the data
//!     columns and the anchored comments, and drops the keys and all positions. Document
//!     comments and preambles are not part of any row.
//!
//!     See [tsv] for the tab-separated file form.

pub mod tsv;

use std::fmt;

use rand::Rng;

use crate::mor::ast::{AstNode, Cat, Comment, Dictionary, Gloss, LexEntry, Phon, Position, Sem};
use crate::mor::error::ProjectionError;

/// The data columns of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Phon,
    Category,
    Sem,
    Gloss,
    Enabled,
}

impl Column {
    /// The columns exported to files, in order
    pub const EXPORTED: [Column; 4] = [Column::Phon, Column::Category, Column::Sem, Column::Gloss];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Phon => "Phon",
            Column::Category => "Category",
            Column::Sem => "Overall Semantics",
            Column::Gloss => "Morphological Analysis",
            Column::Enabled => "enabled",
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        [
            Column::Phon,
            Column::Category,
            Column::Sem,
            Column::Gloss,
            Column::Enabled,
        ]
        .into_iter()
        .find(|column| column.header() == header)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Where a row came from. Negative line/column values are placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowKey {
    pub dict_name: String,
    pub line: i64,
    pub column: i64,
}

impl RowKey {
    pub fn new(dict_name: impl Into<String>, line: i64, column: i64) -> Self {
        Self {
            dict_name: dict_name.into(),
            line,
            column,
        }
    }

    /// The key of an entry; each missing coordinate gets its own placeholder.
    pub fn for_position(dict_name: impl Into<String>, position: Option<Position>) -> Self {
        match position {
            Some(position) => Self::new(dict_name, position.line as i64, position.column as i64),
            None => Self::new(dict_name, placeholder(), placeholder()),
        }
    }

    pub fn is_located(&self) -> bool {
        self.line > 0 && self.column > 0
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.dict_name, self.line, self.column)
    }
}

/// A random negative integer
pub(crate) fn placeholder() -> i64 {
    -rand::thread_rng().gen_range(1..=i64::MAX)
}

/// One entry as a row. A `None` column was missing from the source of the row.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: RowKey,
    pub phon: Option<Phon>,
    pub cat: Option<Cat>,
    pub sem: Option<Sem>,
    pub gloss: Option<Gloss>,
    pub enabled: bool,
    /// The entry's own anchored comments; not exported as a column
    pub comments: Vec<Comment>,
}

impl Row {
    pub fn from_entry(dict_name: &str, entry: &LexEntry) -> Self {
        Self {
            key: RowKey::for_position(dict_name, entry.position()),
            phon: Some(entry.phon.clone()),
            cat: Some(entry.cat.clone()),
            sem: Some(entry.sem.clone()),
            gloss: Some(entry.gloss.clone()),
            enabled: entry.enabled,
            comments: entry.comments().to_vec(),
        }
    }

    fn required<'r, T>(&self, value: &'r Option<T>, column: Column) -> Result<&'r T, ProjectionError> {
        value.as_ref().ok_or_else(|| ProjectionError::MissingColumn {
            column,
            key: self.key.clone(),
        })
    }

    /// Rebuild the entry of this row, without any position.
    pub fn to_entry(&self) -> Result<LexEntry, ProjectionError> {
        let phon = unlocated(self.required(&self.phon, Column::Phon)?.clone());
        let mut cat = unlocated(self.required(&self.cat, Column::Category)?.clone());
        cat.attrvals = cat.attrvals.into_iter().map(unlocated).collect();
        let sem = unlocated(self.required(&self.sem, Column::Sem)?.clone());
        let gloss = unlocated(self.required(&self.gloss, Column::Gloss)?.clone());

        Ok(LexEntry::new(phon, cat)
            .with_sem(sem)
            .with_gloss(gloss)
            .with_enabled(self.enabled)
            .with_comments(self.comments.clone()))
    }
}

fn unlocated<T: AstNode>(mut node: T) -> T {
    node.meta_mut().position = None;
    for comment in &mut node.meta_mut().comments {
        comment.meta.position = None;
    }
    node
}

/// The rows of one or more dictionaries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// All rows of several tables, in order.
    pub fn concat(tables: impl IntoIterator<Item = Table>) -> Self {
        Self {
            rows: tables.into_iter().flat_map(|table| table.rows).collect(),
        }
    }

    /// The rows whose phon occurs in more than one row. Rows without a phon are dropped.
    pub fn duplicates_by_phon(&self) -> Self {
        let mut counts = std::collections::HashMap::new();
        for phon in self.rows.iter().filter_map(|row| row.phon.as_ref()) {
            *counts.entry(phon.value.as_str()).or_insert(0usize) += 1;
        }

        let rows = self
            .rows
            .iter()
            .filter(|row| {
                row.phon
                    .as_ref()
                    .is_some_and(|phon| counts.get(phon.value.as_str()).copied().unwrap_or(0) > 1)
            })
            .cloned()
            .collect();
        Self { rows }
    }
}

impl IntoIterator for Table {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// One row per entry of the dictionary, in order.
pub fn to_table(dictionary: &Dictionary) -> Table {
    let table: Table = dictionary
        .entries
        .iter()
        .map(|entry| Row::from_entry(&dictionary.name, entry))
        .collect();
    tracing::debug!(dictionary = %dictionary.name, rows = table.len(), "projected to table");
    table
}

/// The entries of a table's rows, in order.
pub fn from_table(table: &Table) -> Result<Vec<LexEntry>, ProjectionError> {
    table.iter().map(Row::to_entry).collect()
}

/// Replace the entries of a dictionary with the entries of a table.
pub fn update(dictionary: &mut Dictionary, table: &Table) -> Result<(), ProjectionError> {
    dictionary.entries = from_table(table)?;
    tracing::debug!(
        dictionary = %dictionary.name,
        entries = dictionary.entries.len(),
        "updated from table"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mor::ast::CatAttrVal;
    use crate::mor::pipeline::DictionaryParser;

    fn entry(phon: &str, line: usize) -> LexEntry {
        LexEntry::new(Phon::new(phon), Cat::new(vec![CatAttrVal::new("scat", "n")]))
            .at(Position::new(line, 1))
    }

    #[test]
    fn test_keys_follow_positions() {
        let dictionary = DictionaryParser::new()
            .parse("nouns.cut", "@UTF8\ncat\t{[scat n]}\ndog\t{[scat n]} =animal=\n")
            .expect("parse");
        let table = to_table(&dictionary);

        assert_eq!(table.rows[0].key, RowKey::new("nouns.cut", 2, 1));
        assert_eq!(table.rows[1].key, RowKey::new("nouns.cut", 3, 1));
    }

    #[test]
    fn test_unlocated_entries_get_negative_placeholders() {
        let mut dictionary = Dictionary::new("built");
        dictionary
            .entries
            .push(LexEntry::new(Phon::new("cat"), Cat::default()));
        let key = &to_table(&dictionary).rows[0].key;

        assert!(key.line < 0);
        assert!(key.column < 0);
        assert!(!key.is_located());
    }

    #[test]
    fn test_round_trip_drops_positions_and_keeps_comments() {
        let masked = entry("cat", 4)
            .with_enabled(false)
            .with_comments(vec![Comment::new("why")]);
        let mut dictionary = Dictionary::new("nouns.cut");
        dictionary.entries = vec![masked.clone(), entry("dog", 5)];

        let entries = from_table(&to_table(&dictionary)).expect("rebuild");
        assert_eq!(entries, dictionary.entries);
        assert!(!entries[0].enabled);
        assert_eq!(entries[0].comments(), masked.comments());
        assert!(entries.iter().all(|e| e.position().is_none()));
    }

    #[test]
    fn test_missing_column_is_a_projection_error() {
        let mut row = Row::from_entry("nouns.cut", &entry("cat", 7));
        row.sem = None;

        let error = from_table(&Table::new(vec![row])).unwrap_err();
        assert_eq!(
            error,
            ProjectionError::MissingColumn {
                column: Column::Sem,
                key: RowKey::new("nouns.cut", 7, 1),
            }
        );
        assert_eq!(error.to_string(), "row nouns.cut:7:1 has no Overall Semantics column");
    }

    #[test]
    fn test_update_replaces_entries_wholesale() {
        let mut dictionary = Dictionary::new("nouns.cut");
        dictionary.entries = vec![entry("cat", 1)];
        let table = Table::new(vec![Row::from_entry("x", &entry("dog", 9))]);

        update(&mut dictionary, &table).expect("update");
        assert_eq!(dictionary.entries.len(), 1);
        assert_eq!(dictionary.entries[0].phon.value, "dog");
    }

    #[test]
    fn test_duplicates_by_phon() {
        let rows = ["cat", "dog", "cat", "bird"]
            .iter()
            .enumerate()
            .map(|(i, phon)| Row::from_entry("nouns.cut", &entry(phon, i + 1)))
            .collect::<Table>();
        let lines: Vec<i64> = rows.duplicates_by_phon().iter().map(|r| r.key.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_concat_keeps_order() {
        let a = Table::new(vec![Row::from_entry("a.cut", &entry("cat", 1))]);
        let b = Table::new(vec![Row::from_entry("b.cut", &entry("cat", 1))]);
        let all = Table::concat([a, b]);
        let names: Vec<&str> = all.iter().map(|r| r.key.dict_name.as_str()).collect();
        assert_eq!(names, vec!["a.cut", "b.cut"]);
        assert_eq!(all.duplicates_by_phon().len(), 2);
    }

    #[test]
    fn test_column_headers() {
        for column in Column::EXPORTED {
            assert_eq!(Column::from_header(column.header()), Some(column));
        }
        assert_eq!(Column::from_header("enabled"), Some(Column::Enabled));
        assert_eq!(Column::from_header("line"), None);
    }
}
