//! Dates (spec §4.4), grounded on the NeMo `zh` `DateFst` grammar: year
//! read digit-by-digit, month/day read as plain cardinals, optional era
//! prefix, and both `年/月/日` and numeric (`-`, `/`) separator forms.
//!
//! The day-range validation (1-31) and the explicit refusal to tag a bare
//! `N号`/`N日` as a date — that's cardinal's job, disambiguated only by
//! the presence of a year or month elsewhere in the same span — both
//! carry over unchanged from the grammar this is grounded on. A bare
//! `YYYY年` or `MM月` stays date-tagged even alone, since `年`/`月` carry
//! no such ambiguity.

use crate::config::Language;
use crate::data::Tables;
use crate::fst::{
    accept, char_class, closure_n, compose, concat2, cross, delete, insert, string_map, union_all, Fst,
};
use crate::graphs::{field, wrap_class, ClassGrammar};

fn digit_by_digit(zero: &[(String, String)], digit: &[(String, String)]) -> Fst {
    let mut pairs: Vec<(&str, &str)> = crate::data::as_pairs(zero);
    pairs.extend(crate::data::as_pairs(digit));
    let one_digit = string_map(&pairs);
    closure_n(&one_digit, 2, Some(4))
}

fn era_prefix(tables: &Tables) -> Fst {
    string_map(&crate::data::as_pairs(&tables.date_suffixes))
}

fn month_reading(tables: &Tables) -> Fst {
    string_map(&crate::data::as_pairs(&tables.months))
}

fn day_reading(tables: &Tables) -> Fst {
    string_map(&crate::data::as_pairs(&tables.day))
}

/// Bare numeric year/month/day digits, as they appear before a word-table
/// lookup (`"2024"`, `"01"`, `"15"`).
fn digits(min: usize, max: usize) -> Fst {
    let d = union_all((0..10).map(|n| accept(&n.to_string())));
    closure_n(&d, min, Some(max))
}

pub struct Date {
    pub grammar: ClassGrammar,
}

impl Date {
    pub fn build(lang: Language, tables: &Tables) -> Self {
        let (year_kanji_suffix, month_suffix, day_suffix) = match lang {
            Language::Zh => ("年", "月", "日"),
            Language::Ja => ("年", "月", "日"),
        };
        let year_digits = digits(2, 4);
        let year_spoken = compose(&year_digits, &digit_by_digit(&tables.zero, &tables.digit))
            .unwrap_or_else(|_| year_digits.clone());
        let month_spoken = month_reading(tables);
        let day_spoken = day_reading(tables);

        // Era is its own optional field rather than bare passthrough text,
        // so the tagged form always stays `<field>: "<value>"` throughout —
        // "" -> "" when absent, "era: \"<spoken>\" " when present.
        let era_field = closure_n(&concat2(&field("era", &era_prefix(tables)), &insert(" ")), 0, Some(1));

        // Kanji-separated form: [era] year 年 month 月 day 日 — each
        // literal suffix glyph is consumed right where it appears in the
        // surface text, between the field it follows and the next field.
        let year_field = field("year", &year_spoken);
        let month_field = field("month", &month_spoken);
        let day_field = field("day", &day_spoken);
        let kanji_form = concat2(
            &concat2(&era_field.clone(), &concat2(&year_field, &delete(year_kanji_suffix))),
            &concat2(
                &insert(" "),
                &concat2(
                    &concat2(&month_field, &delete(month_suffix)),
                    &concat2(&insert(" "), &concat2(&day_field, &delete(day_suffix))),
                ),
            ),
        );

        // Numeric-separated form: year-month-day or year/month/day. Each
        // surface separator is consumed in place and re-emitted as the
        // canonical field-separator space, exactly where `join_fields`
        // would put one.
        let sep = concat2(&union_all([cross("-", ""), cross("/", "")]), &insert(" "));
        let numeric_form = concat2(
            &era_field,
            &concat2(&year_field, &concat2(&sep.clone(), &concat2(&month_field, &concat2(&sep, &day_field)))),
        );

        // Year-only and month-only forms stay date-tagged (spec §4.4: "年"
        // and "月" can't be misread the way a bare "号"/"日" can), so they
        // don't need the day-marker's disambiguation against cardinal.
        let year_only_form = concat2(&era_field.clone(), &concat2(&year_field, &delete(year_kanji_suffix)));
        let month_only_form = concat2(&month_field, &delete(month_suffix));

        let body = union_all([kanji_form, numeric_form, year_only_form, month_only_form]);
        let tagger = wrap_class("date", body);

        let content = union_all([
            year_content_alphabet(&tables.digit, &tables.zero),
            month_reading(tables),
            day_reading(tables),
            era_prefix(tables),
        ]);
        let verbalizer = date_verbalizer(&content, year_kanji_suffix, month_suffix, day_suffix);

        Self {
            grammar: ClassGrammar {
                name: "date",
                tagger,
                verbalizer,
            },
        }
    }
}

fn year_content_alphabet(digit: &[(String, String)], zero: &[(String, String)]) -> Fst {
    let set: std::collections::HashSet<char> = digit
        .iter()
        .chain(zero.iter())
        .flat_map(|(_, w)| w.chars())
        .collect();
    char_class(&set.into_iter().collect::<String>())
}

/// Mirrors the tagger's field order and spacing directly (not
/// `join_fields`, which only drops fields in and doesn't know the
/// connective morphemes the tagger deleted from the surface text need to
/// come back): the tagger threw away `年`/`月`/`日` when tagging the
/// kanji form, so they have to be re-inserted here rather than silently
/// dropped from the spoken output.
///
/// Every tagged form except a bare month carries `year` (`year_only_form`
/// has no month/day, but does have year); `month_only_form` is the one
/// shape with no year at all, so it gets its own branch rather than
/// trying to make `year` itself optional in the main one.
fn date_verbalizer(content: &Fst, year_suffix: &str, month_suffix: &str, day_suffix: &str) -> Fst {
    let value = closure_n(content, 0, None);
    let req = |name: &str| concat2(&concat2(&delete(&format!("{name}: \"")), &value.clone()), &delete("\""));

    let era = closure_n(&concat2(&req("era"), &accept(" ")), 0, Some(1));
    let year = concat2(&req("year"), &insert(year_suffix));
    let optional_month = closure_n(
        &concat2(&accept(" "), &concat2(&req("month"), &insert(month_suffix))),
        0,
        Some(1),
    );
    let optional_day = closure_n(
        &concat2(&accept(" "), &concat2(&req("day"), &insert(day_suffix))),
        0,
        Some(1),
    );

    let full_with_year = concat2(&era, &concat2(&year, &concat2(&optional_month, &optional_day)));
    let bare_month = concat2(&req("month"), &insert(month_suffix));

    let body = union_all([full_with_year, bare_month]);
    concat2(&concat2(&delete("date { "), &body), &delete(" }"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_kanji_date() {
        let tables = Tables::load().unwrap();
        let d = Date::build(Language::Zh, &tables);
        let composed = compose(&accept("2024年1月15日"), &d.grammar.tagger);
        assert!(composed.is_ok());
    }

    #[test]
    fn tags_numeric_date() {
        let tables = Tables::load().unwrap();
        let d = Date::build(Language::Zh, &tables);
        let composed = compose(&accept("2024-1-15"), &d.grammar.tagger);
        assert!(composed.is_ok());
    }

    #[test]
    fn tags_year_only_form() {
        let tables = Tables::load().unwrap();
        let d = Date::build(Language::Zh, &tables);
        let composed = compose(&accept("2024年"), &d.grammar.tagger).unwrap();
        assert!(crate::fst::shortest_path_n(&composed, 1).is_ok());
    }

    #[test]
    fn tags_month_only_form() {
        let tables = Tables::load().unwrap();
        let d = Date::build(Language::Zh, &tables);
        let composed = compose(&accept("1月"), &d.grammar.tagger).unwrap();
        assert!(crate::fst::shortest_path_n(&composed, 1).is_ok());
    }

    #[test]
    fn tags_ja_year_only_form() {
        let tables = Tables::load().unwrap();
        let d = Date::build(Language::Ja, &tables);
        let composed = compose(&accept("2024年"), &d.grammar.tagger).unwrap();
        assert!(crate::fst::shortest_path_n(&composed, 1).is_ok());
    }

    #[test]
    fn verbalizes_year_only_form() {
        let tables = Tables::load().unwrap();
        let d = Date::build(Language::Zh, &tables);
        let tagged = r#"date { year: "二零二四" }"#;
        let composed = compose(&accept(tagged), &d.grammar.verbalizer).unwrap();
        let (_, out, _) = crate::fst::shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, "二零二四年");
    }

    #[test]
    fn verbalizer_restores_connective_morphemes() {
        let tables = Tables::load().unwrap();
        let d = Date::build(Language::Zh, &tables);
        let tagged = r#"date { year: "二零二四" month: "一" day: "十五" }"#;
        let composed = compose(&accept(tagged), &d.grammar.verbalizer).unwrap();
        let (_, out, _) = crate::fst::shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, "二零二四年一月十五日");
    }
}
