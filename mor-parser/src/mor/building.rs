//! AST building
//!
//! This module turns the span-only nodes of [parsing::ir](crate::mor::parsing::ir) into the
//! typed model of [ast](crate::mor::ast). It follows the same three steps for every node:
//!
//! 1. Slice the node's text out of the source with its spans
//! 2. Convert the first span into a [Position](crate::mor::ast::Position)
//! 3. Build the anchored comments from the node's explicit `comments` field
//!
//! The dictionary builder additionally recognizes disabled entries, which the grammar sees
//! as plain comments.

pub(crate) mod annotation;
pub(crate) mod dictionary;

pub(crate) use annotation::AnnotationBuilder;
pub(crate) use dictionary::{DictionaryBuilder, EntryGrammar};
