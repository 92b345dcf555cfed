//! Dictionary text serializer
//!
//!     The inverse of parsing. Each node kind is written as `BEGIN value END` (see
//!     [Delimited](crate::mor::ast::Delimited)) followed by its anchored comments:
//!
//!         - a comment is `% text` and a newline; a node ending mid-line is separated from
//!           its first comment by one space
//!         - an entry is phon, a tab, the category, then ` =sem=` and ` "gloss"` when
//!           non-empty; the category is always braced, even when read without braces
//!         - a disabled entry is `% DISABLED: ` followed by the entry text without comments,
//!           with every line break flattened to a space; the comments of its parts follow
//!           on their own lines, then the entry's own comments
//!
//!     Every entry ends with exactly one newline. With `include_comments = false` all
//!     comments are dropped, document comments included.
//!
//!     `Display` for the model's nodes is their serialization without comments, without the
//!     final newline. Table cells are rendered this way.

use std::fmt;
use std::io;

use super::emitter::Emitter;
use crate::mor::ast::{
    AstNode, Cat, CatAttrVal, Comment, Delimited, Dictionary, Gloss, LexEntry, Phon, Preamble,
    Sem, DISABLED_MARKER,
};

pub struct MordictSerializer {
    include_comments: bool,
    out: Emitter,
}

impl MordictSerializer {
    pub fn new(include_comments: bool) -> Self {
        Self {
            include_comments,
            out: Emitter::new(),
        }
    }

    pub fn serialize(mut self, dictionary: &Dictionary) -> String {
        self.dictionary(dictionary);
        self.out.into_string()
    }

    fn dictionary(&mut self, dictionary: &Dictionary) {
        if self.include_comments {
            for comment in &dictionary.comments {
                self.comment(comment);
            }
        }
        for preamble in &dictionary.preambles {
            self.delimited(preamble);
        }
        for entry in &dictionary.entries {
            self.entry(entry);
        }
    }

    fn comment(&mut self, comment: &Comment) {
        if comment.value.is_empty() {
            self.out.write("%");
        } else {
            self.out.write("% ");
            self.out.write(&comment.value);
        }
        self.out.write("\n");
    }

    fn anchored(&mut self, comments: &[Comment]) {
        if !self.include_comments || comments.is_empty() {
            return;
        }
        if !self.out.at_line_start() {
            self.out.write(" ");
        }
        for comment in comments {
            self.comment(comment);
        }
    }

    fn delimited<D: Delimited>(&mut self, node: &D) {
        if !D::OMITTABLE || !node.is_empty() {
            self.out.write(D::BEGIN);
            self.out.write(node.value());
            self.out.write(D::END);
        }
        self.anchored(node.comments());
    }

    fn attr_val(&mut self, attr_val: &CatAttrVal) {
        self.out.write("[");
        self.out.write(&attr_val.key);
        self.out.write(" ");
        self.out.write(&attr_val.value.to_string());
        self.out.write("]");
        self.anchored(attr_val.comments());
    }

    fn cat(&mut self, cat: &Cat) {
        self.out.write("{");
        for attr_val in &cat.attrvals {
            self.attr_val(attr_val);
        }
        self.out.write("}");
        self.anchored(cat.comments());
    }

    /// Phon, category, sem and gloss with their anchored comments.
    fn entry_fields(&mut self, entry: &LexEntry) {
        self.delimited(&entry.phon);
        self.out.write("\t");
        self.cat(&entry.cat);
        if !entry.sem.is_empty() {
            self.out.write(" ");
        }
        self.delimited(&entry.sem);
        if !entry.gloss.is_empty() {
            self.out.write(" ");
        }
        self.delimited(&entry.gloss);
    }

    fn entry(&mut self, entry: &LexEntry) {
        if entry.enabled {
            self.entry_fields(entry);
        } else {
            let mut fields = MordictSerializer::new(false);
            fields.entry_fields(entry);
            let flat = fields
                .out
                .into_string()
                .replace("\r\n", " ")
                .replace(&['\n', '\r'][..], " ");

            self.out.ensure_newline();
            self.out.write("% ");
            self.out.write(DISABLED_MARKER);
            self.out.write(" ");
            self.out.write(flat.trim_end());
            self.out.ensure_newline();
            if self.include_comments {
                for comment in field_comments(entry) {
                    self.comment(comment);
                }
            }
        }

        self.anchored(entry.comments());
        self.out.ensure_newline();
    }
}

/// Comments anchored inside an entry, in the order they appear in its enabled form.
fn field_comments(entry: &LexEntry) -> impl Iterator<Item = &Comment> {
    entry
        .phon
        .comments()
        .iter()
        .chain(entry.cat.attrvals.iter().flat_map(|av| av.comments().iter()))
        .chain(entry.cat.comments())
        .chain(entry.sem.comments())
        .chain(entry.gloss.comments())
}

/// Serialize a whole dictionary.
pub fn to_mordict_string(dictionary: &Dictionary, include_comments: bool) -> String {
    MordictSerializer::new(include_comments).serialize(dictionary)
}

/// Serialize a whole dictionary into a byte sink.
pub fn write_mordict<W: io::Write>(
    dictionary: &Dictionary,
    include_comments: bool,
    writer: &mut W,
) -> io::Result<()> {
    writer.write_all(to_mordict_string(dictionary, include_comments).as_bytes())
}

macro_rules! display_as_mordict {
    ($($node:ty => $method:ident),* $(,)?) => {
        $(
            impl fmt::Display for $node {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let mut serializer = MordictSerializer::new(false);
                    serializer.$method(self);
                    let text = serializer.out.as_str();
                    f.write_str(text.trim_end_matches(&['\n', '\r'][..]))
                }
            }
        )*
    };
}

display_as_mordict!(
    Phon => delimited,
    Sem => delimited,
    Gloss => delimited,
    Preamble => delimited,
    Comment => comment,
    CatAttrVal => attr_val,
    Cat => cat,
    LexEntry => entry,
);
