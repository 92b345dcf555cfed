//! AST traits - Common interfaces for uniform node access
//!
//! Every node in the model carries a [`Meta`]: an optional source position and the list of
//! comments anchored after it. [`AstNode`] gives uniform access to both, and [`Delimited`]
//! describes how the single-valued dictionary nodes are written back to text.

use super::elements::Comment;
use super::meta::Meta;
use super::range::Position;

/// Common interface for all AST nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn meta(&self) -> &Meta;
    fn meta_mut(&mut self) -> &mut Meta;

    fn position(&self) -> Option<Position> {
        self.meta().position
    }

    /// Comments anchored right after this node, in source order
    fn comments(&self) -> &[Comment] {
        &self.meta().comments
    }

    fn at(mut self, position: Position) -> Self
    where
        Self: Sized,
    {
        self.meta_mut().position = Some(position);
        self
    }

    fn with_comments(mut self, comments: Vec<Comment>) -> Self
    where
        Self: Sized,
    {
        self.meta_mut().comments = comments;
        self
    }
}

/// Single-valued nodes written as `BEGIN value END`.
///
/// Omittable nodes disappear from the output entirely when their value is empty, while
/// their anchored comments are still written.
pub trait Delimited: AstNode {
    const BEGIN: &'static str;
    const END: &'static str;
    const OMITTABLE: bool;

    fn value(&self) -> &str;

    fn is_empty(&self) -> bool {
        self.value().is_empty()
    }
}
