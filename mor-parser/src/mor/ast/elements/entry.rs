//! Lexical entry element
//!
//!     One dictionary line: `phon\t{category} =sem= "gloss"`. An entry is a value: two
//!     entries are equal when their four fields are, regardless of where they came from and
//!     of whether they are enabled.
//!
//!     A disabled entry is still part of the dictionary. It is written as a single
//!     `% DISABLED: ...` line so that the text stays loadable by tools that do not know about
//!     masking, and so that its anchored comments are kept.

use std::hash::{Hash, Hasher};

use super::super::meta::Meta;
use super::super::traits::AstNode;
use super::category::Cat;
use super::values::{Gloss, Phon, Sem};

/// The comment prefix marking a disabled entry.
pub const DISABLED_MARKER: &str = "DISABLED:";

#[derive(Debug, Clone)]
pub struct LexEntry {
    pub phon: Phon,
    pub cat: Cat,
    pub sem: Sem,
    pub gloss: Gloss,
    pub enabled: bool,
    pub meta: Meta,
}

impl LexEntry {
    pub fn new(phon: Phon, cat: Cat) -> Self {
        Self {
            phon,
            cat,
            sem: Sem::default(),
            gloss: Gloss::default(),
            enabled: true,
            meta: Meta::default(),
        }
    }

    pub fn with_sem(mut self, sem: Sem) -> Self {
        self.sem = sem;
        self
    }

    pub fn with_gloss(mut self, gloss: Gloss) -> Self {
        self.gloss = gloss;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl PartialEq for LexEntry {
    fn eq(&self, other: &Self) -> bool {
        self.phon == other.phon
            && self.cat == other.cat
            && self.sem == other.sem
            && self.gloss == other.gloss
    }
}

impl Eq for LexEntry {}

impl Hash for LexEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.phon.hash(state);
        self.cat.hash(state);
        self.sem.hash(state);
        self.gloss.hash(state);
    }
}

impl AstNode for LexEntry {
    fn node_type(&self) -> &'static str {
        "LexEntry"
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }
}
