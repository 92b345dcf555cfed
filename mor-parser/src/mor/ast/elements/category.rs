//! Category (feature bundle) elements
//!
//!     A category is an ordered list of `[key value...]` brackets. Keys may repeat and the
//!     repetition is meaningful (`[comp n|dog] [comp n|house]`), so lookups by key always
//!     yield an iterator, which is empty when the key is absent.
//!
//!     The shape of a bracket's value is decided by how many tokens followed the key:
//!         - none: the empty string
//!         - one: a single token
//!         - more: the ordered list of tokens

use std::fmt;

use super::super::meta::Meta;
use super::super::traits::AstNode;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrValue {
    Single(String),
    List(Vec<String>),
}

impl AttrValue {
    /// Build a value from the tokens that followed a key, by arity.
    pub fn from_tokens(mut tokens: Vec<String>) -> Self {
        match tokens.len() {
            0 => AttrValue::Single(String::new()),
            1 => AttrValue::Single(tokens.pop().unwrap_or_default()),
            _ => AttrValue::List(tokens),
        }
    }

    /// The tokens of this value, in order. The empty value has none.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            AttrValue::Single(s) if s.is_empty() => Vec::new(),
            AttrValue::Single(s) => vec![s.as_str()],
            AttrValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AttrValue::Single(s) => s.is_empty(),
            AttrValue::List(items) => items.is_empty(),
        }
    }
}

impl Default for AttrValue {
    fn default() -> Self {
        AttrValue::Single(String::new())
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Single(s) => f.write_str(s),
            AttrValue::List(items) => f.write_str(&items.join(" ")),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Single(value.to_string())
    }
}

impl From<Vec<&str>> for AttrValue {
    fn from(values: Vec<&str>) -> Self {
        AttrValue::from_tokens(values.into_iter().map(str::to_string).collect())
    }
}

/// One `[key value...]` bracket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CatAttrVal {
    pub key: String,
    pub value: AttrValue,
    pub meta: Meta,
}

impl CatAttrVal {
    pub fn new(key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            meta: Meta::default(),
        }
    }
}

impl AstNode for CatAttrVal {
    fn node_type(&self) -> &'static str {
        "CatAttrVal"
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }
}

/// The `{...}` feature bundle of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Cat {
    pub attrvals: Vec<CatAttrVal>,
    pub meta: Meta,
}

impl Cat {
    pub fn new(attrvals: Vec<CatAttrVal>) -> Self {
        Self {
            attrvals,
            meta: Meta::default(),
        }
    }

    /// Every bracket with the given key, in source order.
    pub fn get<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a CatAttrVal> + 'a {
        self.attrvals.iter().filter(move |av| av.key == key)
    }

    /// The values of every bracket with the given key, in source order.
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a AttrValue> + 'a {
        self.get(key).map(|av| &av.value)
    }

    /// How many brackets carry the given key.
    pub fn count(&self, key: &str) -> usize {
        self.get(key).count()
    }

    pub fn is_empty(&self) -> bool {
        self.attrvals.is_empty()
    }
}

impl AstNode for Cat {
    fn node_type(&self) -> &'static str {
        "Cat"
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }
}
