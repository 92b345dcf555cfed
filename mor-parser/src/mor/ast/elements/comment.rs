//! Comment element
//!
//!     A `%` line (or line tail) of free text. Comments carry no structure of their own; what
//!     matters is where they are anchored: after a dictionary item, after a preamble, or at the
//!     head of the document.

use super::super::meta::Meta;
use super::super::traits::AstNode;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Comment {
    /// The text after `%`, without surrounding whitespace
    pub value: String,
    pub meta: Meta,
}

impl Comment {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            meta: Meta::default(),
        }
    }
}

impl AstNode for Comment {
    fn node_type(&self) -> &'static str {
        "Comment"
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }
}
