//! Masking of redundant entries
//!
//!     Dictionaries grow by appending generated entries to a hand-curated head. Generated
//!     entries often repeat a curated one with less information; masking disables them
//!     instead of deleting them, so their comments survive.
//!
//!     1. Rows are grouped by fingerprint: the phon, the values of every bracket with the
//!        fingerprint feature (`scat` by default) in order, and the sem.
//!     2. Each row is scored: the number of brackets with the score feature (`comp` by
//!        default), plus one for a non-empty gloss.
//!     3. A row is disabled when it lies past the threshold line and scores below the best
//!        row of its group. Rows up to the threshold are never touched.
//!
//!     Rows missing a fingerprint column are left as they are, and so are rows without a
//!     source position: their placeholder keys say nothing about the threshold.

use std::collections::HashMap;

use crate::mor::ast::{AttrValue, Dictionary};
use crate::mor::error::ProjectionError;
use crate::mor::table::{self, Row, Table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskingRules {
    /// Rows on lines up to this one are never masked
    pub threshold: i64,
    pub fingerprint_feature: String,
    pub score_feature: String,
}

impl Default for MaskingRules {
    fn default() -> Self {
        Self {
            threshold: 10000,
            fingerprint_feature: "scat".to_string(),
            score_feature: "comp".to_string(),
        }
    }
}

impl MaskingRules {
    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Fingerprint {
    phon: String,
    features: Vec<AttrValue>,
    sem: String,
}

impl MaskingRules {
    fn fingerprint(&self, row: &Row) -> Option<Fingerprint> {
        let cat = row.cat.as_ref()?;
        Some(Fingerprint {
            phon: row.phon.as_ref()?.value.clone(),
            features: cat.values(&self.fingerprint_feature).cloned().collect(),
            sem: row.sem.as_ref()?.value.clone(),
        })
    }

    fn score(&self, row: &Row) -> usize {
        let features = row
            .cat
            .as_ref()
            .map_or(0, |cat| cat.count(&self.score_feature));
        let glossed = row.gloss.as_ref().is_some_and(|g| !g.value.is_empty());
        features + usize::from(glossed)
    }
}

/// Disable every redundant row of a table.
pub fn mask_redundant(mut rows: Table, rules: &MaskingRules) -> Table {
    let mut groups: HashMap<Fingerprint, Vec<usize>> = HashMap::new();
    for (i, row) in rows.rows.iter().enumerate() {
        if let Some(fingerprint) = rules.fingerprint(row) {
            groups.entry(fingerprint).or_default().push(i);
        }
    }

    let mut masked = 0;
    for members in groups.values() {
        let scores: Vec<usize> = members.iter().map(|&i| rules.score(&rows.rows[i])).collect();
        let best = scores.iter().copied().max().unwrap_or(0);

        for (&i, &score) in members.iter().zip(&scores) {
            let row = &mut rows.rows[i];
            if row.key.is_located() && row.key.line > rules.threshold && score < best {
                tracing::trace!(key = %row.key, score, best, "masking row");
                row.enabled = false;
                masked += 1;
            }
        }
    }

    tracing::debug!(groups = groups.len(), masked, "masked redundant rows");
    rows
}

/// Mask the redundant entries of a dictionary in place.
pub fn apply_masking(dictionary: &mut Dictionary, rules: &MaskingRules) -> Result<(), ProjectionError> {
    let rows = mask_redundant(table::to_table(dictionary), rules);
    table::update(dictionary, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mor::ast::{AstNode, Cat, CatAttrVal, Comment, Gloss, LexEntry, Phon, Position, Sem};
    use crate::mor::formats::to_mordict_string;

    fn entry(line: usize, comps: usize, gloss: &str) -> LexEntry {
        let mut attrvals = vec![CatAttrVal::new("scat", "n")];
        attrvals.extend((0..comps).map(|i| CatAttrVal::new("comp", format!("n|{}", i).as_str())));
        LexEntry::new(Phon::new("cat"), Cat::new(attrvals))
            .with_sem(Sem::new("animal"))
            .with_gloss(Gloss::new(gloss))
            .at(Position::new(line, 1))
    }

    fn dictionary(entries: Vec<LexEntry>) -> Dictionary {
        let mut dictionary = Dictionary::new("nouns.cut");
        dictionary.entries = entries;
        dictionary
    }

    fn enabled(rows: &Table) -> Vec<bool> {
        rows.iter().map(|row| row.enabled).collect()
    }

    #[test]
    fn test_entry_without_gloss_is_masked_past_threshold() {
        let rows = table::to_table(&dictionary(vec![
            entry(50000, 0, "a feline"),
            entry(50001, 0, ""),
        ]));
        let masked = mask_redundant(rows, &MaskingRules::default());
        assert_eq!(enabled(&masked), vec![true, false]);
    }

    #[test]
    fn test_rows_up_to_threshold_are_untouched() {
        let rows = table::to_table(&dictionary(vec![
            entry(10000, 0, ""),
            entry(10001, 2, ""),
        ]));
        let masked = mask_redundant(rows, &MaskingRules::default());
        assert_eq!(enabled(&masked), vec![true, true]);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let rows = table::to_table(&dictionary(vec![entry(3, 2, ""), entry(4, 1, "")]));
        let masked = mask_redundant(rows, &MaskingRules::default().with_threshold(0));
        assert_eq!(enabled(&masked), vec![true, false]);
    }

    #[test]
    fn test_unlocated_rows_are_never_masked() {
        let unlocated = |comps, gloss| {
            let mut entry = entry(1, comps, gloss);
            entry.meta.position = None;
            entry
        };
        for threshold in [0, -1, i64::MIN] {
            let rows = table::to_table(&dictionary(vec![unlocated(2, "g"), unlocated(0, "")]));
            assert!(rows.iter().all(|row| !row.key.is_located()));
            let masked = mask_redundant(rows, &MaskingRules::default().with_threshold(threshold));
            assert_eq!(enabled(&masked), vec![true, true], "threshold {}", threshold);
        }
    }

    #[test]
    fn test_ties_are_kept() {
        let rows = table::to_table(&dictionary(vec![
            entry(20000, 1, ""),
            entry(20001, 0, "g"),
        ]));
        let masked = mask_redundant(rows, &MaskingRules::default());
        assert_eq!(enabled(&masked), vec![true, true]);
    }

    #[test]
    fn test_different_fingerprints_do_not_compete() {
        let other = LexEntry::new(
            Phon::new("cat"),
            Cat::new(vec![CatAttrVal::new("scat", "v")]),
        )
        .at(Position::new(20001, 1))
        .with_sem(Sem::new("animal"));
        let rows = table::to_table(&dictionary(vec![entry(20000, 3, "g"), other]));
        let masked = mask_redundant(rows, &MaskingRules::default());
        assert_eq!(enabled(&masked), vec![true, true]);
    }

    #[test]
    fn test_rows_without_fingerprint_are_skipped() {
        let mut rows = table::to_table(&dictionary(vec![
            entry(20000, 2, "g"),
            entry(20001, 0, ""),
        ]));
        rows.rows[1].sem = None;
        let masked = mask_redundant(rows, &MaskingRules::default());
        assert_eq!(enabled(&masked), vec![true, true]);
    }

    #[test]
    fn test_apply_masking_keeps_comments() {
        let mut dict = dictionary(vec![
            entry(50000, 0, "a feline"),
            entry(50001, 0, "").with_comments(vec![Comment::new("generated")]),
        ]);
        apply_masking(&mut dict, &MaskingRules::default()).expect("mask");

        assert!(!dict.entries[1].enabled);
        assert_eq!(
            to_mordict_string(&dict, true),
            "cat\t{[scat n]} =animal= \"a feline\"\n\
             % DISABLED: cat\t{[scat n]} =animal=\n\
             % generated\n"
        );
    }
}
