//! Single-valued dictionary elements
//!
//!     Phon, Sem, Gloss and Preamble all hold one string and differ only in how they are
//!     delimited in the source:
//!
//!         | Node     | begin | end     | omitted when empty |
//!         |----------|-------|---------|--------------------|
//!         | Phon     |       |         | no                 |
//!         | Sem      | `=`   | `=`     | yes                |
//!         | Gloss    | `"`   | `"`     | yes                |
//!         | Preamble | `@`   | newline | yes                |
//!
//!     An absent Sem or Gloss is represented by the empty value, never by an Option.

use super::super::meta::Meta;
use super::super::traits::{AstNode, Delimited};

macro_rules! delimited_node {
    ($(#[$doc:meta])* $name:ident, $begin:expr, $end:expr, omittable = $omittable:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
        pub struct $name {
            pub value: String,
            pub meta: Meta,
        }

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self {
                    value: value.into(),
                    meta: Meta::default(),
                }
            }
        }

        impl AstNode for $name {
            fn node_type(&self) -> &'static str {
                stringify!($name)
            }

            fn meta(&self) -> &Meta {
                &self.meta
            }

            fn meta_mut(&mut self) -> &mut Meta {
                &mut self.meta
            }
        }

        impl Delimited for $name {
            const BEGIN: &'static str = $begin;
            const END: &'static str = $end;
            const OMITTABLE: bool = $omittable;

            fn value(&self) -> &str {
                &self.value
            }
        }
    };
}

delimited_node!(
    /// The surface form an entry is looked up by. Always written, even when empty.
    Phon, "", "", omittable = false
);
delimited_node!(
    /// The overall semantics (translation) of an entry, `=...=`.
    Sem, "=", "=", omittable = true
);
delimited_node!(
    /// The morphological analysis gloss of an entry, `"..."`.
    Gloss, "\"", "\"", omittable = true
);
delimited_node!(
    /// A header line of a dictionary, `@...`.
    Preamble, "@", "\n", omittable = true
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mor::ast::range::Position;
    use crate::mor::ast::Comment;

    #[test]
    fn test_equality_ignores_position_and_comments() {
        let parsed = Sem::new("animal")
            .at(Position::new(12, 9))
            .with_comments(vec![Comment::new("check")]);
        assert_eq!(parsed, Sem::new("animal"));
        assert_ne!(parsed, Sem::new("animals"));
    }

    #[test]
    fn test_delimiter_table() {
        assert_eq!((Sem::BEGIN, Sem::END, Sem::OMITTABLE), ("=", "=", true));
        assert_eq!((Gloss::BEGIN, Gloss::END), ("\"", "\""));
        assert!(!Phon::OMITTABLE);
        assert_eq!(Preamble::END, "\n");
    }

    #[test]
    fn test_empty_is_canonical_absence() {
        assert!(Gloss::default().is_empty());
        assert_eq!(Gloss::default(), Gloss::new(""));
    }
}
