//! YAML encoding of annotations
//!
//!     preambles: [Begin]
//!     contents:
//!     - ID: s1
//!       CHI: the dogs
//!       Words:
//!       - SynCat: DT
//!         Orthography: the
//!         Phon: the
//!         Mors: det|the
//!       - SynCat: NNS
//!         Orthography: dogs
//!         Phon: dogs
//!         Mors:
//!         - n|dog-PL
//!         - v|dog-3S
//!     postambles: [End]
//!
//!     An unambiguous word's candidates are written inline as a plain scalar and an ambiguous
//!     word's as a block sequence. Both shapes are accepted on input; an empty sequence is not.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::mor::ast::{AnalysisCandidates, Annotation};

pub fn to_yaml(annotation: &Annotation) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(annotation)
}

pub fn from_yaml(text: &str) -> Result<Annotation, serde_yaml::Error> {
    serde_yaml::from_str(text)
}

impl Serialize for AnalysisCandidates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.alternatives() {
            [only] => serializer.serialize_str(only),
            alternatives => serializer.collect_seq(alternatives),
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum CandidatesRepr {
    Inline(String),
    Block(Vec<String>),
}

impl<'de> Deserialize<'de> for AnalysisCandidates {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match CandidatesRepr::deserialize(deserializer)? {
            CandidatesRepr::Inline(analysis) => Ok(AnalysisCandidates::single(analysis)),
            CandidatesRepr::Block(alternatives) => AnalysisCandidates::new(alternatives)
                .ok_or_else(|| de::Error::invalid_length(0, &"at least one candidate")),
        }
    }
}

/// Read a missing or `null` string field as the empty string.
pub(crate) fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
