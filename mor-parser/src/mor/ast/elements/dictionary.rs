//! Dictionary element
//!
//!     The root of a parsed dictionary file: leading document comments, `@` preambles and the
//!     entries, each kept in source order. A dictionary is a mutable container; the masking
//!     pipeline swaps its entry list wholesale rather than editing entries in place.

use rand::Rng;

use super::comment::Comment;
use super::entry::LexEntry;
use super::values::Preamble;

#[derive(Debug, Clone)]
pub struct Dictionary {
    /// File name or stream label the dictionary was read from
    pub name: String,
    pub comments: Vec<Comment>,
    pub preambles: Vec<Preamble>,
    pub entries: Vec<LexEntry>,
}

impl Dictionary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comments: Vec::new(),
            preambles: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// A dictionary with a generated `<UNTITLED>XXXXXXX` name.
    pub fn untitled() -> Self {
        let tag: u32 = rand::thread_rng().gen_range(1..=0x0FFF_FFFF);
        Self::new(format!("<UNTITLED>{:07X}", tag))
    }

    pub fn enabled_entries(&self) -> impl Iterator<Item = &LexEntry> {
        self.entries.iter().filter(|e| e.enabled)
    }

    pub fn disabled_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.enabled).count()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::untitled()
    }
}
