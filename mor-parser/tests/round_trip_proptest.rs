//! Property-based tests for the round-trip laws
//!
//! - a disabled entry reads back disabled, with the same content and comments
//! - comments after an item stay anchored to it, in order
//! - empty sem and gloss never appear in the output; phon and category always do
//! - a table round-trip keeps entry content and drops positions
//! - single candidates are written inline and several as a block

use mor_parser::mor::ast::{
    AnalysisCandidates, Annotation, AstNode, Cat, CatAttrVal, Comment, Dictionary, Gloss,
    LexEntry, Phon, Sem, Sentence, Word,
};
use mor_parser::mor::formats::{from_yaml, to_mordict_string, to_yaml};
use mor_parser::mor::pipeline::DictionaryParser;
use mor_parser::mor::table::{from_table, to_table};
use proptest::prelude::*;

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z|:-]{0,7}"
}

fn attr_val_strategy() -> impl Strategy<Value = CatAttrVal> {
    ("[a-z]{2,5}", prop::collection::vec(word_strategy(), 0..3)).prop_map(|(key, values)| {
        let values: Vec<&str> = values.iter().map(String::as_str).collect();
        CatAttrVal::new(key, values)
    })
}

/// Free text for sem, gloss and comments: words separated by single spaces
fn text_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z]{1,6}", 0..3).prop_map(|words| words.join(" "))
}

fn entry_strategy() -> impl Strategy<Value = LexEntry> {
    (
        "[a-z]{1,8}",
        prop::collection::vec(attr_val_strategy(), 0..4),
        text_strategy(),
        text_strategy(),
    )
        .prop_map(|(phon, attrvals, sem, gloss)| {
            LexEntry::new(Phon::new(phon), Cat::new(attrvals))
                .with_sem(Sem::new(sem))
                .with_gloss(Gloss::new(gloss))
        })
}

fn comments_strategy() -> impl Strategy<Value = Vec<Comment>> {
    prop::collection::vec("[a-z]{1,6}( [a-z]{1,6})?", 0..4)
        .prop_map(|values| values.into_iter().map(Comment::new).collect())
}

fn dictionary_of(entries: Vec<LexEntry>) -> Dictionary {
    let mut dictionary = Dictionary::new("prop.cut");
    dictionary.entries = entries;
    dictionary
}

fn comment_values(comments: &[Comment]) -> Vec<&str> {
    comments.iter().map(|c| c.value.as_str()).collect()
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_disabled_entry_round_trip(
            first in entry_strategy(),
            masked in entry_strategy(),
            comments in comments_strategy(),
        ) {
            let masked = masked.with_enabled(false).with_comments(comments.clone());
            let dictionary = dictionary_of(vec![first, masked.clone()]);
            let text = to_mordict_string(&dictionary, true);

            let parser = DictionaryParser::new();
            let reparsed = parser.parse("prop.cut", &text).expect("reparse");

            prop_assert_eq!(reparsed.entries.len(), 2);
            let entry = &reparsed.entries[1];
            prop_assert!(!entry.enabled);
            prop_assert_eq!(entry, &masked);
            prop_assert_eq!(comment_values(entry.comments()), comment_values(&comments));
            prop_assert_eq!(to_mordict_string(&reparsed, true), text);
        }

        #[test]
        fn test_comments_stay_anchored(
            entry in entry_strategy(),
            comments in comments_strategy(),
        ) {
            let entry = entry.with_sem(Sem::default()).with_gloss(Gloss::default());
            let line = to_mordict_string(&dictionary_of(vec![entry]), false);
            let mut source = line.clone();
            for comment in &comments {
                source.push_str(&format!("% {}\n", comment.value));
            }

            let parser = DictionaryParser::new();
            let parsed = parser.parse("prop.cut", &source).expect("parse");
            let cat = &parsed.entries[0].cat;
            prop_assert_eq!(comment_values(cat.comments()), comment_values(&comments));

            // The first comment moves up to the entry line; the rest follow in order
            let written = to_mordict_string(&parsed, true);
            prop_assert!(written.starts_with(line.trim_end()));
            prop_assert_eq!(written.lines().count(), 1.max(comments.len()));

            let reparsed = parser.parse("prop.cut", &written).expect("reparse");
            prop_assert_eq!(
                comment_values(reparsed.entries[0].cat.comments()),
                comment_values(&comments)
            );
            prop_assert_eq!(to_mordict_string(&reparsed, true), written);
        }

        #[test]
        fn test_empty_values_are_omitted(entry in entry_strategy()) {
            let text = to_mordict_string(&dictionary_of(vec![entry.clone()]), true);

            let expected_prefix = format!("{}\t{{", entry.phon.value);
            prop_assert!(text.starts_with(&expected_prefix));
            prop_assert_eq!(text.contains('='), !entry.sem.value.is_empty());
            prop_assert_eq!(text.contains('"'), !entry.gloss.value.is_empty());
            prop_assert!(text.ends_with('\n') && !text.ends_with("\n\n"));
        }

        #[test]
        fn test_table_round_trip(
            entries in prop::collection::vec(entry_strategy(), 0..6),
            enabled in prop::collection::vec(any::<bool>(), 6),
        ) {
            let entries: Vec<LexEntry> = entries
                .into_iter()
                .zip(enabled)
                .map(|(entry, enabled)| entry.with_enabled(enabled))
                .collect();
            let rebuilt = from_table(&to_table(&dictionary_of(entries.clone()))).expect("rebuild");

            prop_assert_eq!(&rebuilt, &entries);
            for (rebuilt, original) in rebuilt.iter().zip(&entries) {
                prop_assert_eq!(rebuilt.enabled, original.enabled);
                prop_assert!(rebuilt.position().is_none());
            }
        }

        #[test]
        fn test_candidates_flow_and_block(
            alternatives in prop::collection::vec("[a-z]{1,5}\\|[a-z]{1,5}", 1..4),
        ) {
            let candidates = AnalysisCandidates::new(alternatives.clone()).expect("non-empty");
            let annotation = Annotation {
                preambles: Vec::new(),
                sentences: vec![Sentence::new(
                    "s1",
                    "x",
                    vec![Word::new(Some(candidates.clone()), "x", "X", "x")],
                )],
                postambles: Vec::new(),
            };
            let yaml = to_yaml(&annotation).expect("yaml");

            if alternatives.len() == 1 {
                let inline = format!("Mors: {}\n", alternatives[0]);
                prop_assert!(yaml.contains(&inline));
            } else {
                prop_assert!(yaml.contains("Mors:\n"));
            }

            let decoded = from_yaml(&yaml).expect("decode");
            let word = &decoded.sentences[0].words[0];
            prop_assert_eq!(word.candidates.as_ref(), Some(&candidates));
        }
    }
}
