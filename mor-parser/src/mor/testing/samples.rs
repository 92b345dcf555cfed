//! Curated sample documents
//!
//!     The files live in `tests/fixtures/` and are compiled in, so unit tests, integration
//!     tests and the CLI tests all read the same text.
//!
//!     Every sample is a fixed point of parse-then-serialize: writing its parsed model back
//!     yields the file byte for byte.

use crate::mor::ast::{Annotation, Dictionary};
use crate::mor::pipeline::{AnnotationParser, DictionaryParser};
use crate::mor::rules::{RuleParser, RuleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// Document comments, two preambles, three entries and a disabled one
    Nouns,
    /// Two sentences between `@Begin` and `@End`, one with an ambiguous word
    Sentences,
    /// Three rules, two clauses in the start rule
    Rules,
}

impl Sample {
    pub const ALL: [Sample; 3] = [Sample::Nouns, Sample::Sentences, Sample::Rules];

    pub fn file_name(&self) -> &'static str {
        match self {
            Sample::Nouns => "nouns.cut",
            Sample::Sentences => "sentences.mor",
            Sample::Rules => "rules.crule",
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Sample::Nouns => include_str!("../../../tests/fixtures/nouns.cut"),
            Sample::Sentences => include_str!("../../../tests/fixtures/sentences.mor"),
            Sample::Rules => include_str!("../../../tests/fixtures/rules.crule"),
        }
    }

    /// # Panics
    ///
    /// If the sample is not a dictionary or does not parse.
    pub fn dictionary(&self) -> Dictionary {
        assert_eq!(*self, Sample::Nouns, "{} is not a dictionary", self.file_name());
        DictionaryParser::new()
            .parse(self.file_name(), self.source())
            .unwrap_or_else(|e| panic!("sample {} failed to parse: {}", self.file_name(), e))
    }

    /// # Panics
    ///
    /// If the sample is not a morcomb file or does not parse.
    pub fn annotation(&self) -> Annotation {
        assert_eq!(*self, Sample::Sentences, "{} is not a morcomb file", self.file_name());
        AnnotationParser::new()
            .parse(self.file_name(), self.source())
            .unwrap_or_else(|e| panic!("sample {} failed to parse: {}", self.file_name(), e))
    }

    /// # Panics
    ///
    /// If the sample is not a rule file or does not parse.
    pub fn rule_set(&self) -> RuleSet {
        assert_eq!(*self, Sample::Rules, "{} is not a rule file", self.file_name());
        RuleParser::new()
            .parse(self.file_name(), self.source())
            .unwrap_or_else(|e| panic!("sample {} failed to parse: {}", self.file_name(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mor::ast::AstNode;
    use crate::mor::formats::{to_morcomb_string, to_mordict_string};
    use crate::mor::testing::factories::{entry, word};

    #[test]
    fn test_nouns_sample() {
        let dictionary = Sample::Nouns.dictionary();
        assert_eq!(dictionary.comments.len(), 2);
        assert_eq!(dictionary.preambles.len(), 2);

        let phons: Vec<&str> = dictionary.entries.iter().map(|e| e.phon.value.as_str()).collect();
        assert_eq!(phons, vec!["cat", "dog", "dogg", "bird"]);
        assert_eq!(dictionary.entries[3], entry("bird", &[("scat", "n")]));

        let dog = &dictionary.entries[1];
        let sem_comments: Vec<&str> = dog.sem.comments().iter().map(|c| c.value.as_str()).collect();
        assert_eq!(sem_comments, vec!["compound", "review later"]);

        let masked = &dictionary.entries[2];
        assert!(!masked.enabled);
        assert_eq!(masked.comments()[0].value, "typo");
    }

    #[test]
    fn test_sentences_sample() {
        let annotation = Sample::Sentences.annotation();
        assert_eq!(annotation.preambles, vec!["Begin"]);
        assert_eq!(annotation.postambles, vec!["End"]);
        assert_eq!(
            annotation.sentences[0].words[1],
            word(&["n|dog-PL", "v|dog-3S"], "dogs", "NNS", "dogs")
        );
    }

    #[test]
    fn test_rules_sample() {
        let rule_set = Sample::Rules.rule_set();
        let names: Vec<&str> = rule_set.rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["n-start", "n:pl", "end"]);
        assert_eq!(
            rule_set.rules[0].clauses[1].conditions,
            vec!["STARTCAT = [scat pro] [pers 3]"]
        );
    }

    #[test]
    fn test_text_samples_are_fixed_points() {
        assert_eq!(
            to_mordict_string(&Sample::Nouns.dictionary(), true),
            Sample::Nouns.source()
        );
        assert_eq!(
            to_morcomb_string(&Sample::Sentences.annotation()),
            Sample::Sentences.source()
        );
    }
}
