//! Cardinal numbers (spec §4.3).
//!
//! `zh` uses the positional morphemes `十/百/千/万/亿`; `ja` uses
//! `十/百/千/万/億`. Both share the same construction: a per-length-class
//! union of positional digit readings, followed by a cleanup pass that
//! collapses internal zero runs to a single separator morpheme and trims
//! the one that would otherwise trail the whole number.
//!
//! The positional reading is built directly from `rustfst` composition
//! rather than as a hand-rolled string algorithm: for each possible digit
//! count (1 to 12, the spec's stated limit) every position's digit maps to
//! `word + positional suffix (+ group suffix)` via `cross`, and the
//! resulting "naive" rendering (one zero-morpheme per zero digit, with no
//! run-collapsing yet) is cleaned up by two further composed rules, not by
//! post-processing the string in Rust.

use crate::config::Language;
use crate::data::Tables;
use crate::error::Result;
use crate::fst::{accept, closure_n, concat2, cross, delete, union_all, Fst};
use crate::graphs::{field, wrap_class, ClassGrammar};

const MAX_DIGITS: usize = 12;

/// Language-specific morpheme set for positional cardinal reading.
struct Morphemes {
    digit_words: Vec<(String, String)>,
    zero_word: String,
    /// Index 0 = units (no suffix), 1 = tens, 2 = hundreds, 3 = thousands.
    slot_suffix: [&'static str; 4],
    /// Suffix appended once after the units slot of a non-unit group.
    group_suffix: [&'static str; 3], // group 0 (units): "", group 1: 万/萬, group 2: 亿/億
    /// Whether digit `2` becomes `两`/two-equivalent when it is the
    /// leading digit of the whole number and directly precedes
    /// 千/万(萬)/亿(億). Only `zh` has this rule.
    two_substitution: Option<&'static str>,
}

fn zh_morphemes(tables: &Tables) -> Morphemes {
    Morphemes {
        digit_words: tables.digit.clone(),
        zero_word: "零".to_string(),
        slot_suffix: ["", "十", "百", "千"],
        group_suffix: ["", "万", "亿"],
        two_substitution: Some("两"),
    }
}

fn ja_morphemes(tables: &Tables) -> Morphemes {
    Morphemes {
        digit_words: tables.digit.clone(),
        zero_word: "零".to_string(),
        slot_suffix: ["", "十", "百", "千"],
        group_suffix: ["", "万", "億"],
        two_substitution: None,
    }
}

fn word_for_digit(m: &Morphemes, d: char) -> String {
    m.digit_words
        .iter()
        .find(|(k, _)| k == &d.to_string())
        .map(|(_, v)| v.clone())
        .unwrap_or_default()
}

/// Build the naive (pre-cleanup) positional reading FST for every digit
/// count from 1 to `MAX_DIGITS`.
fn naive_positional_reading(m: &Morphemes) -> Fst {
    let mut by_length = Vec::with_capacity(MAX_DIGITS);
    for len in 1..=MAX_DIGITS {
        let mut chain: Option<Fst> = None;
        for idx in 0..len {
            let v = len - 1 - idx;
            let slot = v % 4;
            let group = v / 4;
            let mut position = Vec::new();
            // digit 0 at this position: provisional zero morpheme, no suffix.
            position.push(cross("0", &m.zero_word));
            for d in 1..=9u8 {
                let dc = (b'0' + d) as char;
                let mut word = word_for_digit(m, dc);
                if dc == '2' && idx == 0 {
                    if let Some(two) = m.two_substitution {
                        if slot == 3 || (slot == 0 && group > 0) {
                            word = two.to_string();
                        }
                    }
                }
                let mut out = word;
                out.push_str(m.slot_suffix[slot]);
                if slot == 0 && group > 0 {
                    out.push_str(m.group_suffix[group.min(2)]);
                }
                position.push(cross(&dc.to_string(), &out));
            }
            let position_fst = union_all(position);
            chain = Some(match chain {
                None => position_fst,
                Some(prev) => concat2(&prev, &position_fst),
            });
        }
        if let Some(c) = chain {
            by_length.push(c);
        }
    }
    union_all(by_length)
}

/// Collapse any run of one or more zero-morphemes to a single one.
fn collapse_zero_runs(zero_word: &str) -> Fst {
    let one = accept(zero_word);
    let rest = closure_n(&delete(zero_word), 0, None);
    concat2(&one, &rest)
}

/// Delete a single trailing zero-morpheme, if the string ends with one.
fn trim_trailing_zero(zero_word: &str, any_char: &Fst) -> Fst {
    let prefix = closure_n(any_char, 0, None);
    let drop_last = concat2(&prefix, &delete(zero_word));
    let keep_last = prefix;
    union_all([drop_last, keep_last])
}

/// Surface acceptor for "any single output character we might emit":
/// digit-word glyphs plus the morphemes. Used only as `sigma` for the two
/// cleanup passes above, not as a general-purpose alphabet.
fn output_alphabet(m: &Morphemes) -> Fst {
    let mut chars = String::new();
    for (_, w) in &m.digit_words {
        chars.push_str(w);
    }
    chars.push_str(&m.zero_word);
    for s in m.slot_suffix.iter().chain(m.group_suffix.iter()) {
        chars.push_str(s);
    }
    let unique: std::collections::HashSet<char> = chars.chars().collect();
    union_all(unique.into_iter().map(|c| accept(&c.to_string())))
}

/// Optional leading sign: `-` or `负`/`マイナス` maps to the spoken
/// negative marker.
fn sign(lang: Language) -> Fst {
    match lang {
        Language::Zh => union_all([cross("-", "负"), accept("负")]),
        Language::Ja => union_all([cross("-", "マイナス"), accept("マイナス")]),
    }
}

/// Comma-grouped digits (`1,500`) with the commas stripped before
/// conversion.
fn comma_digits() -> Fst {
    let digit = union_all((0..10).map(|d| accept(&d.to_string())));
    let grouped_sep = delete(",");
    concat2(
        &closure_n(&digit, 1, Some(3)),
        &closure_n(&concat2(&grouped_sep, &closure_n(&digit, 3, Some(3))), 0, None),
    )
}

/// Leading-zero digit-by-digit reading: only when the input begins with
/// `0` and is shorter than 4 digits (spec §4.3's carve-out so telephone/
/// serial grammars, not cardinal, claim longer zero-prefixed runs).
fn leading_zero_digit_by_digit(m: &Morphemes) -> Fst {
    let digit = union_all((0..10).map(|d| {
        let dc = (b'0' + d) as char;
        let word = if dc == '0' {
            m.zero_word.clone()
        } else {
            word_for_digit(m, dc)
        };
        cross(&dc.to_string(), &word)
    }));
    concat2(&accept("0"), &closure_n(&digit, 0, Some(2)))
}

/// The `cardinal` class grammar.
pub struct Cardinal {
    pub grammar: ClassGrammar,
    /// The pure numeral reading (no sign, no field wrapper), reusable by
    /// every other class that embeds a cardinal span (date, time,
    /// telephone area codes read digit-by-digit elsewhere, money,
    /// fraction, ordinal, measure).
    pub just_cardinals: Fst,
}

impl Cardinal {
    pub fn build(lang: Language, tables: &Tables) -> Result<Self> {
        let m = match lang {
            Language::Zh => zh_morphemes(tables),
            Language::Ja => ja_morphemes(tables),
        };
        let sigma = output_alphabet(&m);
        let naive = naive_positional_reading(&m);
        let collapsed = crate::fst::compose(&naive, &collapse_zero_runs(&m.zero_word))
            .unwrap_or_else(|_| naive.clone());
        let cleaned = crate::fst::compose(&collapsed, &trim_trailing_zero(&m.zero_word, &sigma))
            .unwrap_or(collapsed);

        let with_leading_zero = leading_zero_digit_by_digit(&m);
        let unsigned = union_all([
            crate::fst::compose(&comma_digits(), &cleaned).unwrap_or_else(|_| cleaned.clone()),
            with_leading_zero,
        ]);

        let signed = concat2(&closure_n(&sign(lang), 0, Some(1)), &unsigned);
        let just_cardinals = crate::fst::optimize(&signed);

        let tagger_body = field("integer", &just_cardinals);
        let tagger = wrap_class("cardinal", tagger_body);
        // The `integer` field already carries the spoken reading (the
        // tagger composes digits straight to morphemes above); the
        // verbalizer's only job is to strip the envelope back out, which
        // `crate::graphs::word::identity_field_verbalizer` does uniformly
        // for every class whose tagger pre-renders its own value.
        let content = union_all([sigma.clone(), accept("负"), accept("マイナス")]);
        let verbalizer =
            crate::graphs::word::identity_field_verbalizer_over("cardinal", "integer", &content);

        Ok(Self {
            grammar: ClassGrammar {
                name: "cardinal",
                tagger,
                verbalizer,
            },
            just_cardinals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cardinals(lang: Language) -> Fst {
        let tables = Tables::load().unwrap();
        Cardinal::build(lang, &tables).unwrap().just_cardinals
    }

    fn read(fst: &Fst, input: &str) -> String {
        let composed = crate::fst::compose(&crate::fst::accept(input), fst).unwrap();
        crate::fst::shortest_path_n(&composed, 1).unwrap()[0].1.clone()
    }

    #[test]
    fn reads_simple_digits() {
        let c = cardinals(Language::Zh);
        assert_eq!(read(&c, "5"), "五");
        assert_eq!(read(&c, "10"), "十");
        assert_eq!(read(&c, "11"), "十一");
    }

    #[test]
    fn ties_special_cases() {
        let c = cardinals(Language::Zh);
        assert_eq!(read(&c, "20"), "二十");
        assert_eq!(read(&c, "200"), "二百");
        assert_eq!(read(&c, "2000"), "两千");
        assert_eq!(read(&c, "20000"), "两万");
    }

    #[test]
    fn zero_collapsing() {
        let c = cardinals(Language::Zh);
        assert_eq!(read(&c, "1020"), "一千零二十");
        assert_eq!(read(&c, "10000"), "一万");
        assert_eq!(read(&c, "10200"), "一万零二百");
    }

    #[test]
    fn negative_sign() {
        let c = cardinals(Language::Zh);
        assert_eq!(read(&c, "-100"), "负一百");
    }

    #[test]
    fn leading_zeros_short_run() {
        let c = cardinals(Language::Zh);
        assert_eq!(read(&c, "007"), "零零七");
    }
}
