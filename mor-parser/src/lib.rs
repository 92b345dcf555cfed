//! # mor
//!
//! Parsers and serializers for the text formats of a MOR morphological analysis toolchain:
//!
//!   - dictionary files (`.cut`): one lexical entry per line, `phon\t{[key value]} =sem= "gloss"`,
//!     with `%` comments anchored to the item they follow and `@` preamble lines.
//!   - morcomb annotation files: `*CHI:` / `%mor:` / `%comb:` / `%penn:` / `%ort:` / `@G:` tiers,
//!     where long tiers continue on indented rows.
//!   - rule files: `RULENAME:` / `CTYPE:` blocks of `if` / `then` clauses, rendered as diagrams.
//!
//! File Layout
//!
//! src/mor
//!   ├── lexing      logos tokenizers plus the indentation pass for morcomb files
//!   ├── parsing     chumsky grammars producing span-carrying intermediate nodes
//!   ├── building    intermediate nodes to the typed model (positions, comment anchoring)
//!   ├── ast         the typed model
//!   ├── formats     text, YAML and diagram writers
//!   ├── table       the row-oriented projection of a dictionary, TSV import/export
//!   ├── masking     fingerprint grouping and soft-deletion of redundant rows
//!   ├── rules       the rule-file grammar and model
//!   └── pipeline    the entry points: parse, serialize, to_table, from_table, mask_redundant
//!
//! For test fixtures and factories, see the [testing module](mor::testing).

pub mod mor;
