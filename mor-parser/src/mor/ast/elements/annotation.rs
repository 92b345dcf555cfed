//! Sentence-annotation (morcomb) elements
//!
//!     A morcomb file is a list of sentences framed by `@` preambles and postambles. Each
//!     sentence is read tier by tier:
//!
//!         *CHI:   the utterance
//!         %mor:   one candidate list per word, alternatives separated by `^`
//!         %comb:  one combined form per word
//!         %penn:  one syntactic tag per word
//!         %ort:   one orthographic form per word
//!         @G:     the sentence identifier
//!
//!     The four word tiers are columns: the n-th cell of every tier describes the n-th word.
//!     Tiers may disagree in length; the shorter ones are padded (`None` candidates, empty
//!     strings) rather than truncating the longer ones.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::meta::Meta;
use super::super::traits::AstNode;

/// The alternative morphological analyses of one word. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalysisCandidates {
    alternatives: Vec<String>,
}

impl AnalysisCandidates {
    /// Returns `None` for an empty list of alternatives.
    pub fn new(alternatives: Vec<String>) -> Option<Self> {
        if alternatives.is_empty() {
            None
        } else {
            Some(Self { alternatives })
        }
    }

    pub fn single(analysis: impl Into<String>) -> Self {
        Self {
            alternatives: vec![analysis.into()],
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        self.alternatives.len() > 1
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }
}

impl fmt::Display for AnalysisCandidates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.alternatives.join("^"))
    }
}

/// One word: a cell from each of the four word tiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Word {
    #[serde(rename = "SynCat", default, deserialize_with = "crate::mor::formats::yaml::null_as_empty")]
    pub penn: String,
    #[serde(rename = "Orthography", default, deserialize_with = "crate::mor::formats::yaml::null_as_empty")]
    pub ort: String,
    #[serde(rename = "Phon", default, deserialize_with = "crate::mor::formats::yaml::null_as_empty")]
    pub comb: String,
    #[serde(rename = "Mors", default)]
    pub candidates: Option<AnalysisCandidates>,
    #[serde(skip)]
    pub meta: Meta,
}

impl Word {
    pub fn new(
        candidates: Option<AnalysisCandidates>,
        comb: impl Into<String>,
        penn: impl Into<String>,
        ort: impl Into<String>,
    ) -> Self {
        Self {
            penn: penn.into(),
            ort: ort.into(),
            comb: comb.into(),
            candidates,
            meta: Meta::default(),
        }
    }

    /// Recombine per-tier columns into words, padding the shorter columns.
    pub fn zip_columns(
        mor: Vec<AnalysisCandidates>,
        comb: Vec<String>,
        penn: Vec<String>,
        ort: Vec<String>,
    ) -> Vec<Word> {
        let width = mor.len().max(comb.len()).max(penn.len()).max(ort.len());
        let mut mor = mor.into_iter();
        let mut comb = comb.into_iter();
        let mut penn = penn.into_iter();
        let mut ort = ort.into_iter();

        (0..width)
            .map(|_| {
                Word::new(
                    mor.next(),
                    comb.next().unwrap_or_default(),
                    penn.next().unwrap_or_default(),
                    ort.next().unwrap_or_default(),
                )
            })
            .collect()
    }
}

impl AstNode for Word {
    fn node_type(&self) -> &'static str {
        "Word"
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "CHI")]
    pub utterance: String,
    #[serde(rename = "Words", default)]
    pub words: Vec<Word>,
    #[serde(skip)]
    pub meta: Meta,
}

impl Sentence {
    pub fn new(id: impl Into<String>, utterance: impl Into<String>, words: Vec<Word>) -> Self {
        Self {
            id: id.into(),
            utterance: utterance.into(),
            words,
            meta: Meta::default(),
        }
    }
}

impl AstNode for Sentence {
    fn node_type(&self) -> &'static str {
        "Sentence"
    }

    fn meta(&self) -> &Meta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut Meta {
        &mut self.meta
    }
}

/// The root of a parsed morcomb file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub preambles: Vec<String>,
    #[serde(rename = "contents", default)]
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub postambles: Vec<String>,
}
