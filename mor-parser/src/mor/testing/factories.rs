//! Factories for tokens and model nodes

use std::ops::Range;

use crate::mor::ast::{AnalysisCandidates, Cat, CatAttrVal, LexEntry, Phon, Word};

/// Pair tokens with byte ranges, as the lexers return them.
pub fn mk_tokens<T: Clone>(tokens: &[(T, usize, usize)]) -> Vec<(T, Range<usize>)> {
    tokens
        .iter()
        .map(|(token, start, end)| (token.clone(), *start..*end))
        .collect()
}

/// A category of single-valued brackets, in order.
pub fn cat(attrvals: &[(&str, &str)]) -> Cat {
    Cat::new(
        attrvals
            .iter()
            .map(|(key, value)| CatAttrVal::new(*key, *value))
            .collect(),
    )
}

/// An enabled entry with empty sem and gloss.
pub fn entry(phon: &str, attrvals: &[(&str, &str)]) -> LexEntry {
    LexEntry::new(Phon::new(phon), cat(attrvals))
}

/// A word with the given candidates; an empty slice gives the padding `None`.
pub fn word(candidates: &[&str], comb: &str, penn: &str, ort: &str) -> Word {
    let candidates = AnalysisCandidates::new(candidates.iter().map(|c| c.to_string()).collect());
    Word::new(candidates, comb, penn, ort)
}
