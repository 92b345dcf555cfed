//! AST definitions and utilities for the MOR formats
//!
//!     The typed model both dictionary and morcomb files are parsed into, and serialized from.
//!
//! Values and Containers
//!
//!     Leaf nodes (comments, phon, categories, entries, words, sentences) are values: they
//!     compare and hash by content. Source positions and anchored comments live in each
//!     node's [Meta](meta::Meta) and are left out of equality, so a parsed node equals the
//!     same node built by hand.
//!
//!     [Dictionary](elements::Dictionary) and [Annotation](elements::Annotation) are the
//!     containers. They are created by parsing (or by rebuilding from a table) and then
//!     mutated in place.
//!
//! Comment Anchoring
//!
//!     A comment belongs to the item it follows. In
//!
//!         cat % domestic
//!         	{[scat n]}
//!         % to be reviewed
//!
//!     both comments are anchored: "domestic" to the phon, "to be reviewed" to the
//!     category. Only comments before the first preamble (or entry) belong to the document.
//!
//! Positions
//!
//!     Positions are 1-based line:column pairs, see [range](range). Nodes built in code have
//!     no position.

pub mod elements;
pub mod meta;
pub mod range;
pub mod traits;

pub use elements::*;
pub use meta::Meta;
pub use range::{Position, SourceLocation};
pub use traits::{AstNode, Delimited};
