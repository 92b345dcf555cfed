//! Parsing
//!
//!     The grammars are chumsky parser combinators over the token vectors produced by
//!     [lexing](crate::mor::lexing), one function per production. They produce the span-only
//!     intermediate representation in [ir]; the [building](crate::mor::building) stage turns
//!     that into the typed model.
//!
//!     - [dictionary]: dictionary files, plus single entries and single categories
//!     - [annotation]: morcomb files
//!     - [combinators]: running a grammar over tokens and mapping its errors
//!
//!     Parsing is all-or-nothing. A grammar either consumes the whole token stream or fails,
//!     and the furthest failure becomes the reported [SyntaxError](crate::mor::error::SyntaxError).
//!     The rule-file grammar lives with its model in [rules](crate::mor::rules).

pub(crate) mod annotation;
pub(crate) mod combinators;
pub(crate) mod dictionary;
pub(crate) mod ir;
