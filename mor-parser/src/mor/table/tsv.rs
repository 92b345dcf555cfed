//! Tab-separated table files
//!
//!     dict_name	line	column	Phon	Category	Overall Semantics	Morphological Analysis
//!     nouns.cut	2	1	cat	{[scat n]}	=animal=	"a feline"
//!
//!     Cells are the dictionary text of each value (see the `Display` impls in
//!     [mordict](crate::mor::formats::mordict)). Nothing is quoted: values containing a tab or
//!     a line break cannot be written faithfully, and the dictionary format has none.
//!
//!     On input the key columns are optional (missing ones become the table name and
//!     placeholders), and any data column may be missing; the rows then fail to rebuild
//!     entries with a [ProjectionError](crate::mor::error::ProjectionError).

use std::collections::HashMap;
use std::io;

use serde::Serialize;

use super::{placeholder, Column, Row, RowKey, Table};
use crate::mor::ast::{Gloss, Phon, Sem};
use crate::mor::error::{MorError, ProjectionError};
use crate::mor::pipeline::DictionaryParser;

const KEY_HEADERS: [&str; 3] = ["dict_name", "line", "column"];

/// A row as exported: the key, then the four data columns as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub dict_name: String,
    pub line: i64,
    pub column: i64,
    #[serde(rename = "Phon")]
    pub phon: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Overall Semantics")]
    pub sem: String,
    #[serde(rename = "Morphological Analysis")]
    pub gloss: String,
}

impl From<&Row> for Record {
    fn from(row: &Row) -> Self {
        fn cell<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        Self {
            dict_name: row.key.dict_name.clone(),
            line: row.key.line,
            column: row.key.column,
            phon: cell(&row.phon),
            category: cell(&row.cat),
            sem: cell(&row.sem),
            gloss: cell(&row.gloss),
        }
    }
}

/// Read an `enabled` cell. An empty cell counts as enabled.
fn parse_enabled(value: &str, key: &RowKey) -> Result<bool, ProjectionError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ProjectionError::InvalidValue {
            column: Column::Enabled,
            key: key.clone(),
            value: value.to_string(),
        }),
    }
}

fn strip_delimiters<'t>(text: &'t str, begin: &str, end: &str) -> &'t str {
    text.strip_prefix(begin)
        .and_then(|inner| inner.strip_suffix(end))
        .unwrap_or(text)
}

impl Table {
    pub fn records(&self) -> Vec<Record> {
        self.iter().map(Record::from).collect()
    }

    /// Write the table with a header row, tab-separated and unquoted.
    pub fn write_tsv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .has_headers(false)
            .from_writer(writer);

        let headers = KEY_HEADERS
            .into_iter()
            .chain(Column::EXPORTED.iter().map(Column::header));
        writer.write_record(headers)?;
        for record in self.records() {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read a table written by [Table::write_tsv]. `name` stands in for a missing
    /// `dict_name` column and labels category parse errors.
    pub fn read_tsv<R: io::Read>(
        name: &str,
        reader: R,
        parser: &DictionaryParser,
    ) -> Result<Table, MorError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let index = |header: &str| headers.iter().position(|h| h == header);
        let keys: Vec<Option<usize>> = KEY_HEADERS.iter().map(|h| index(h)).collect();
        let columns: HashMap<Column, usize> = headers
            .iter()
            .enumerate()
            .filter_map(|(i, header)| Column::from_header(header).map(|column| (column, i)))
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line_number = record.position().map_or(0, |p| p.line());
            let key_cell = |i: usize| keys[i].and_then(|index| record.get(index));
            let cell = |column: Column| columns.get(&column).and_then(|&i| record.get(i));
            let number = |i: usize| key_cell(i).and_then(|v| v.parse::<i64>().ok());

            let cat = cell(Column::Category)
                .map(|text| parser.parse_category(&format!("{}:{}", name, line_number), text))
                .transpose()?;

            let key = RowKey::new(
                key_cell(0).unwrap_or(name),
                number(1).unwrap_or_else(placeholder),
                number(2).unwrap_or_else(placeholder),
            );
            let enabled = match cell(Column::Enabled) {
                Some(value) => parse_enabled(value, &key)?,
                None => true,
            };

            rows.push(Row {
                key,
                phon: cell(Column::Phon).map(Phon::new),
                cat,
                sem: cell(Column::Sem).map(|text| Sem::new(strip_delimiters(text, "=", "="))),
                gloss: cell(Column::Gloss).map(|text| Gloss::new(strip_delimiters(text, "\"", "\""))),
                enabled,
                comments: Vec::new(),
            });
        }

        tracing::debug!(name, rows = rows.len(), "read table");
        Ok(Table::new(rows))
    }
}
