//! Element-specific AST node definitions
//!
//!     Dictionary files:
//!         - [Dictionary](dictionary): the root; comments, preambles and entries.
//!         - [LexEntry](entry): phon, category, sem, gloss and the enabled flag.
//!         - [Cat](category) and its `[key value]` brackets.
//!         - [Phon, Sem, Gloss, Preamble](values): single-valued nodes.
//!         - [Comment](comment).
//!
//!     Morcomb files:
//!         - [Annotation, Sentence, Word, AnalysisCandidates](annotation).

pub mod annotation;
pub mod category;
pub mod comment;
pub mod dictionary;
pub mod entry;
pub mod values;

pub use annotation::{AnalysisCandidates, Annotation, Sentence, Word};
pub use category::{AttrValue, Cat, CatAttrVal};
pub use comment::Comment;
pub use dictionary::Dictionary;
pub use entry::{LexEntry, DISABLED_MARKER};
pub use values::{Gloss, Phon, Preamble, Sem};
