//! Node metadata: source position and anchored comments.
//!
//! Metadata never takes part in value equality or hashing. Two `Phon("cat")` nodes are equal
//! whether they came from line 3 or were built by hand, and whatever comments follow them.

use std::hash::{Hash, Hasher};

use super::elements::Comment;
use super::range::Position;

#[derive(Debug, Clone, Default)]
pub struct Meta {
    /// Absent for synthesized nodes
    pub position: Option<Position>,
    pub comments: Vec<Comment>,
}

impl Meta {
    pub fn at(position: Position) -> Self {
        Self {
            position: Some(position),
            comments: Vec::new(),
        }
    }
}

impl PartialEq for Meta {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for Meta {}

impl Hash for Meta {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_meta_is_transparent_to_equality() {
        let located = Meta {
            position: Some(Position::new(4, 1)),
            comments: vec![Comment::new("note")],
        };
        assert_eq!(located, Meta::default());
        assert_eq!(hash_of(&located), hash_of(&Meta::default()));
    }
}
