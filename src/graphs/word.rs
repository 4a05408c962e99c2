//! The `word` fallback class (spec §4.2): anything no semantic class
//! claims falls through to here, tagged verbatim and re-emitted verbatim.
//! It is the lowest-priority branch of `CLASSIFY` (see `crate::classify`'s
//! weight table) so that a compose failure elsewhere never stops
//! `normalize` from producing output.

use crate::fst::{add_weight, char_range, closure_n, concat2, delete, union_all, Fst};
use crate::graphs::{field, wrap_class, ClassGrammar};

/// Per-character cost baked into the fallback run itself, not just the
/// flat per-token bump `classify.rs` applies to every class: that bump
/// lands once per token regardless of how many characters the token
/// spans, so without this a single `word` token swallowing `119号` whole
/// would cost the same as one swallowing just `号` — making the greedy
/// whole-span match *cheaper* than `cardinal("119") + word("号")` and
/// defeating spec §4.4's central disambiguation (`119号` is a house
/// number, not literal passthrough). Charging per character instead means
/// every extra character `word` swallows instead of ceding to a cheaper
/// class raises its path weight, so shortest-path search prefers the split.
const CHAR_PENALTY: f32 = 1.0;

/// Printable, non-space characters this crate's grammars ever tag:
/// ASCII printable, CJK punctuation and fullwidth forms, kana, and the
/// CJK Unified Ideographs block. A genuine sigma/rho wildcard matcher
/// would cover this more cheaply; `rustfst`'s public API doesn't expose
/// one, so the fallback alphabet is this explicit (if generous) range
/// union instead.
pub fn not_space() -> Fst {
    union_all([
        char_range(0x21, 0x7E),   // ASCII printable, excl. space
        char_range(0x3000, 0x303F), // CJK punctuation (incl. 、。「」etc, minus the ideographic space at 0x3000 handled by preprocessor)
        char_range(0x3040, 0x30FF), // hiragana + katakana
        char_range(0x4E00, 0x9FFF), // CJK unified ideographs
        char_range(0xFF01, 0xFF5E), // fullwidth forms
    ])
}

/// Strip the `"<class> { <field>: \"...\" }"` envelope a class's tagger
/// wrapped around an already-spoken value, leaving the value itself.
/// Used by every class whose tagger renders its own final spoken form
/// (cardinal, date's cardinal-backed day/year spans, telephone digit
/// strings) rather than deferring rendering to a separate verbalizer
/// pass.
pub fn identity_field_verbalizer(class_name: &str, field_name: &str) -> Fst {
    identity_field_verbalizer_over(class_name, field_name, &not_space())
}

/// As `identity_field_verbalizer`, but restricted to a caller-supplied
/// content alphabet (tighter than `not_space` when a class's rendered
/// value only ever contains its own morpheme set).
pub fn identity_field_verbalizer_over(class_name: &str, field_name: &str, content: &Fst) -> Fst {
    let prefix = delete(&format!("{class_name} {{ {field_name}: \""));
    let suffix = delete("\" }");
    let value = closure_n(content, 0, None);
    concat2(&concat2(&prefix, &value), &suffix)
}

pub struct Word {
    pub grammar: ClassGrammar,
}

impl Word {
    pub fn build() -> Self {
        let weighted_char = add_weight(&not_space(), CHAR_PENALTY);
        let run = closure_n(&weighted_char, 1, None);
        let tagger = wrap_class("word", field("name", &run));
        let verbalizer = identity_field_verbalizer("word", "name");
        Self {
            grammar: ClassGrammar {
                name: "word",
                tagger,
                verbalizer,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fst::{accept, compose, shortest_path_n};

    #[test]
    fn tags_a_run_of_non_space_chars() {
        let w = Word::build();
        let composed = compose(&accept("hello"), &w.grammar.tagger).unwrap();
        let (_, out, _) = &shortest_path_n(&composed, 1).unwrap()[0];
        assert_eq!(out, "word { name: \"hello\" }");
    }

    #[test]
    fn verbalizer_strips_envelope() {
        let w = Word::build();
        let composed = compose(&accept("word { name: \"hello\" }"), &w.grammar.verbalizer).unwrap();
        let (_, out, _) = &shortest_path_n(&composed, 1).unwrap()[0];
        assert_eq!(out, "hello");
    }

    #[test]
    fn longer_match_costs_strictly_more_than_shorter_match() {
        let w = Word::build();
        let short = compose(&accept("ab"), &w.grammar.tagger).unwrap();
        let long = compose(&accept("abcd"), &w.grammar.tagger).unwrap();
        let (_, _, short_weight) = shortest_path_n(&short, 1).unwrap()[0].clone();
        let (_, _, long_weight) = shortest_path_n(&long, 1).unwrap()[0].clone();
        assert!(long_weight > short_weight);
    }
}
