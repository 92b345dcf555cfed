//! Morcomb text serializer
//!
//!     @preamble
//!     *CHI:	utterance
//!     %mor:	candidates of word 1
//!     	candidates of word 2
//!     %comb:	w1 w2
//!     %penn:	t1 t2
//!     %ort:	o1 o2
//!     @G:	identifier
//!     @postamble
//!
//!     Every `%mor:` word after the first goes on its own continuation row. Padding cells
//!     (missing candidates, empty strings) are left out, so a padded sentence reads back with
//!     the short tiers short again.

use std::fmt;

use super::emitter::Emitter;
use crate::mor::ast::{Annotation, Sentence, Word};

#[derive(Default)]
pub struct MorcombSerializer {
    out: Emitter,
}

impl MorcombSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serialize(mut self, annotation: &Annotation) -> String {
        for amble in &annotation.preambles {
            self.amble(amble);
        }
        for sentence in &annotation.sentences {
            self.sentence(sentence);
        }
        for amble in &annotation.postambles {
            self.amble(amble);
        }
        self.out.into_string()
    }

    fn amble(&mut self, amble: &str) {
        self.out.write("@");
        self.out.write(amble);
        self.out.write("\n");
    }

    fn tier(&mut self, header: &str, cells: Vec<String>, separator: &str) {
        self.out.write(header);
        self.out.write("\t");
        self.out.write(&cells.join(separator));
        self.out.write("\n");
    }

    fn sentence(&mut self, sentence: &Sentence) {
        let words = &sentence.words;
        let cells = |column: fn(&Word) -> &str| -> Vec<String> {
            words
                .iter()
                .map(column)
                .filter(|cell| !cell.is_empty())
                .map(str::to_string)
                .collect()
        };

        self.tier("*CHI:", vec![sentence.utterance.clone()], "");
        let mor = words
            .iter()
            .filter_map(|word| word.candidates.as_ref().map(|c| c.to_string()))
            .collect();
        self.tier("%mor:", mor, "\n\t");
        self.tier("%comb:", cells(|w| w.comb.as_str()), " ");
        self.tier("%penn:", cells(|w| w.penn.as_str()), " ");
        self.tier("%ort:", cells(|w| w.ort.as_str()), " ");
        self.tier("@G:", vec![sentence.id.clone()], "");
    }
}

pub fn to_morcomb_string(annotation: &Annotation) -> String {
    MorcombSerializer::new().serialize(annotation)
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut serializer = MorcombSerializer::new();
        serializer.sentence(self);
        f.write_str(serializer.out.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mor::ast::AnalysisCandidates;

    fn cands(alts: &[&str]) -> Option<AnalysisCandidates> {
        AnalysisCandidates::new(alts.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_sentence_layout() {
        let annotation = Annotation {
            preambles: vec!["Begin".into()],
            sentences: vec![Sentence::new(
                "s1",
                "the dogs",
                vec![
                    Word::new(cands(&["det|the"]), "the", "DT", "the"),
                    Word::new(cands(&["n|dog-PL", "v|dog-3S"]), "dogs", "NNS", ""),
                ],
            )],
            postambles: vec!["End".into()],
        };

        insta::assert_snapshot!(to_morcomb_string(&annotation), @r###"
        @Begin
        *CHI:	the dogs
        %mor:	det|the
        	n|dog-PL^v|dog-3S
        %comb:	the dogs
        %penn:	DT NNS
        %ort:	the
        @G:	s1
        @End
        "###);
    }

    #[test]
    fn test_padding_is_dropped() {
        let sentence = Sentence::new("x", "hi", vec![Word::new(None, "hi", "", "")]);
        assert_eq!(
            sentence.to_string(),
            "*CHI:\thi\n%mor:\t\n%comb:\thi\n%penn:\t\n%ort:\t\n@G:\tx\n"
        );
    }
}
