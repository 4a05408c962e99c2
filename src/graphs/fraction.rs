//! Fractions, percentages, and keyword-gated ratios (spec §4.9), grounded
//! on the NeMo `zh` `fraction.py` tagger: `N/M` reads denominator-first
//! (`四分之三` for `3/4`), `N%` reads as `百分之N`, and `N:M` is tagged as
//! a ratio either when a ratio keyword (`比例`, `比率`, ...) surrounds it,
//! or when one of the two numbers falls outside the range a clock
//! reading could hold (hour >24 or minute >59) — the same two triggers
//! `graph_ratio_with_context`/`graph_ratio_out_of_range` union in the
//! grammar this is grounded on. Without either trigger, a colon-separated
//! pair is left to `time` or `cardinal` to claim.
//!
//! `N/M` reads its denominator *before* its numerator, the reverse of
//! surface order — a plain field-extracting verbalizer can't produce that
//! without buffering one value past the other, which a linear FST can't
//! do for an unbounded cardinal range. Since real fraction numerators and
//! denominators are overwhelmingly one or two digits, this class renders
//! the whole spoken form directly in the tagger (a bounded cross product
//! over 1-99) rather than deferring to a separate reorder stage.

use crate::config::Language;
use crate::data::Tables;
use crate::fst::{accept, closure_n, compose, concat2, cross, delete, union_all, Fst};
use crate::graphs::cardinal::Cardinal;
use crate::graphs::{field, wrap_class, ClassGrammar};

const MAX_SMALL: u32 = 99;

fn ratio_keywords(lang: Language) -> Vec<&'static str> {
    match lang {
        Language::Zh => vec!["比例", "比率", "比值", "比重", "占比", "配比", "倍率", "比"],
        Language::Ja => vec!["対", "比"],
    }
}

fn small_number_reading(cardinal: &Cardinal) -> Vec<(u32, String)> {
    (1..=MAX_SMALL)
        .filter_map(|n| {
            let digits = n.to_string();
            let composed = compose(&accept(&digits), &cardinal.just_cardinals).ok()?;
            let (_, out, _) = crate::fst::shortest_path_n(&composed, 1).ok()?.into_iter().next()?;
            Some((n, out))
        })
        .collect()
}

/// `N/M` and `N%`, rendered directly as their final spoken form.
fn slash_and_percent(readings: &[(u32, String)]) -> Fst {
    let mut branches = Vec::new();
    for (num, num_word) in readings {
        branches.push(cross(&format!("{num}%"), &format!("百分之{num_word}")));
        for (den, den_word) in readings {
            branches.push(cross(
                &format!("{num}/{den}"),
                &format!("{den_word}分之{num_word}"),
            ));
        }
    }
    let spoken = union_all(branches);
    field("spoken", &spoken)
}

fn number(cardinal: &Cardinal) -> Fst {
    let digit = union_all((0..10).map(|d| accept(&d.to_string())));
    let digits = closure_n(&digit, 1, None);
    compose(&digits, &cardinal.just_cardinals).unwrap_or_else(|_| cardinal.just_cardinals.clone())
}

/// Numbers in `min..=max`, read as cardinals. Used to restrict a ratio side
/// to the range that disqualifies it as a clock reading: an hour above 24 or
/// a minute above 59 can't be time, so a colon-separated pair with a number
/// in that range is unambiguously a ratio even without a keyword. `max` is
/// a practical cutoff, not a semantic one — mirrors the 25..1000/60..1000
/// enumerations in the grammar this is grounded on.
fn number_in_range(cardinal: &Cardinal, min: u32, max: u32) -> Fst {
    let digits = union_all((min..=max).map(|i| accept(&i.to_string())));
    compose(&digits, &cardinal.just_cardinals).unwrap_or_else(|_| cardinal.just_cardinals.clone())
}

pub struct Fraction {
    pub grammar: ClassGrammar,
}

impl Fraction {
    pub fn build(lang: Language, tables: &Tables, cardinal: &Cardinal) -> Self {
        let readings = small_number_reading(cardinal);
        let slash_percent_form = slash_and_percent(&readings);

        let n = number(cardinal);
        let sign = match lang {
            Language::Zh => "比",
            Language::Ja => "対",
        };
        let keywords = ratio_keywords(lang);
        let ratio_keyword = union_all(keywords.iter().map(|k| accept(*k)));
        let delete_ratio_keyword = union_all(keywords.iter().map(|k| delete(*k)));
        let colon = cross(":", sign);
        let ratio_form_before = concat2(
            &delete_ratio_keyword,
            &concat2(&field("numerator", &n), &concat2(&colon.clone(), &field("denominator", &n))),
        );
        let ratio_form_after = concat2(
            &concat2(&field("numerator", &n), &concat2(&colon.clone(), &field("denominator", &n))),
            &ratio_keyword,
        );

        // No keyword needed when a side can't be a clock reading.
        let invalid_hour = number_in_range(cardinal, 25, 999);
        let invalid_minute = number_in_range(cardinal, 60, 999);
        let ratio_out_of_range_hour = concat2(
            &field("numerator", &invalid_hour),
            &concat2(&colon.clone(), &field("denominator", &n)),
        );
        let ratio_out_of_range_minute = concat2(
            &field("numerator", &n),
            &concat2(&colon, &field("denominator", &invalid_minute)),
        );

        let body = union_all([
            slash_percent_form,
            ratio_form_before,
            ratio_form_after,
            ratio_out_of_range_hour,
            ratio_out_of_range_minute,
        ]);
        let tagger = wrap_class("fraction", body);

        let content = {
            let set: std::collections::HashSet<char> = tables
                .digit
                .iter()
                .chain(tables.zero.iter())
                .flat_map(|(_, w)| w.chars())
                .chain(['十', '百', '千', '万', '亿', '億', '两', '负', '分', '之', '%'])
                .chain(sign.chars())
                .collect();
            crate::fst::char_class(&set.into_iter().collect::<String>())
        };
        let verbalizer = fraction_verbalizer(&content, sign);

        Self {
            grammar: ClassGrammar {
                name: "fraction",
                tagger,
                verbalizer,
            },
        }
    }
}

fn fraction_verbalizer(content: &Fst, sign: &str) -> Fst {
    let value = closure_n(content, 0, None);
    let spoken = concat2(&concat2(&delete("spoken: \""), &value.clone()), &delete("\""));
    let numerator = concat2(&concat2(&delete("numerator: \""), &value.clone()), &delete("\""));
    let denominator = concat2(&concat2(&delete("denominator: \""), &value.clone()), &delete("\""));
    let ratio = concat2(&numerator, &concat2(&accept(sign), &denominator));
    let body = union_all([spoken, ratio]);
    concat2(&concat2(&delete("fraction { "), &body), &delete(" }"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_simple_fraction() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let f = Fraction::build(Language::Zh, &tables, &cardinal);
        let composed = compose(&accept("3/4"), &f.grammar.tagger).unwrap();
        let (_, out, _) = &crate::fst::shortest_path_n(&composed, 1).unwrap()[0];
        assert_eq!(out, "fraction { spoken: \"四分之三\" }");
    }

    #[test]
    fn tags_percentage() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let f = Fraction::build(Language::Zh, &tables, &cardinal);
        assert!(compose(&accept("50%"), &f.grammar.tagger).is_ok());
    }

    #[test]
    fn tags_colon_ratio_with_keyword() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let f = Fraction::build(Language::Zh, &tables, &cardinal);
        let composed = compose(&accept("比例3:4"), &f.grammar.tagger).unwrap();
        assert!(crate::fst::shortest_path_n(&composed, 1).is_ok());
    }

    #[test]
    fn tags_colon_ratio_when_hour_out_of_range() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let f = Fraction::build(Language::Zh, &tables, &cardinal);
        // 25 can't be an hour, so this is unambiguously a ratio even
        // without a keyword.
        let composed = compose(&accept("25:4"), &f.grammar.tagger).unwrap();
        assert!(crate::fst::shortest_path_n(&composed, 1).is_ok());
    }

    #[test]
    fn tags_colon_ratio_when_minute_out_of_range() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let f = Fraction::build(Language::Zh, &tables, &cardinal);
        let composed = compose(&accept("3:60"), &f.grammar.tagger).unwrap();
        assert!(crate::fst::shortest_path_n(&composed, 1).is_ok());
    }

    #[test]
    fn rejects_plain_colon_pair_in_time_range_without_keyword() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let f = Fraction::build(Language::Zh, &tables, &cardinal);
        // 3:4 without a ratio keyword, and with both sides inside valid
        // hour/minute ranges, is left to `time`/`cardinal` to claim.
        let composed = compose(&accept("3:4"), &f.grammar.tagger).unwrap();
        assert!(crate::fst::shortest_path_n(&composed, 1).is_err());
    }
}
