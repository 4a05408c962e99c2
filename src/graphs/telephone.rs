//! Telephone numbers (spec §4.6), grounded on the NeMo `zh` `telephone.py`
//! tagger: digits are read with the phone-specific digit map (`1` → `幺`,
//! distinguishing it from cardinal's `一`), mobile numbers are 11 digits,
//! service/emergency numbers are 3, 5 or 10 digits and are only tagged in
//! the presence of a triggering keyword (`电话`, `热线`, `拨打`, ...) so a
//! bare `119` still falls to `cardinal`/house-number reading elsewhere,
//! and an optional `+86`/`+1`/`+44`/`+81`/`+82` country-code prefix is
//! recognized. `ja` reuses the same per-digit reading shape but keeps its
//! own digit map (`0` → `ゼロ`, `2` → `ニー`, distinct from `address_number`
//! .rs`'s `マル`-for-zero final-segment reading) and, since a ja number is
//! conventionally hyphen-grouped rather than a bare run, an additional
//! 3-4-4 grouped form with `-` crossed to `の` at each group boundary.

use crate::config::Language;
use crate::data::Tables;
use crate::fst::{accept, closure_n, concat2, cross, delete, string_map, union_all, Fst};
use crate::graphs::{field, wrap_class, ClassGrammar};

fn phone_digit_map() -> Vec<(&'static str, &'static str)> {
    vec![
        ("0", "零"),
        ("1", "幺"),
        ("2", "二"),
        ("3", "三"),
        ("4", "四"),
        ("5", "五"),
        ("6", "六"),
        ("7", "七"),
        ("8", "八"),
        ("9", "九"),
    ]
}

fn ja_phone_digit_map() -> Vec<(&'static str, &'static str)> {
    vec![
        ("0", "ゼロ"),
        ("1", "イチ"),
        ("2", "ニー"),
        ("3", "サン"),
        ("4", "ヨン"),
        ("5", "ゴ"),
        ("6", "ロク"),
        ("7", "ナナ"),
        ("8", "ハチ"),
        ("9", "キュー"),
    ]
}

fn digit_map(lang: Language) -> Vec<(&'static str, &'static str)> {
    match lang {
        Language::Zh => phone_digit_map(),
        Language::Ja => ja_phone_digit_map(),
    }
}

/// One digit, read by `lang`'s phone digit map, no separator. Separators
/// (where they exist at all) are a property of how groups of these are
/// concatenated, not of the single-digit reading itself.
fn digit_reader(lang: Language) -> Fst {
    string_map(&digit_map(lang))
}

/// Exactly `len` digits, read digit-by-digit via `reader`.
fn read_fixed(reader: &Fst, len: usize) -> Fst {
    closure_n(reader, len, Some(len))
}

fn country_code() -> Fst {
    let codes = union_all([
        accept("+86"),
        accept("+1"),
        accept("+44"),
        accept("+81"),
        accept("+82"),
    ]);
    closure_n(&codes, 0, Some(1))
}

/// The keyword context that licenses a short service/emergency number
/// (`119`, `10086`, `95588`) to tag as `telephone` rather than a bare
/// cardinal or house number (`电话119` → `电话幺幺九`). The keyword passes
/// through unchanged — it's what licenses the tag, but it's still spoken
/// as itself in the output, not stripped.
fn prompt_keyword(tables: &Tables) -> Fst {
    union_all(tables.telephone_prompt.iter().map(|(k, _)| accept(k)))
}

pub struct Telephone {
    pub grammar: ClassGrammar,
}

impl Telephone {
    pub fn build(lang: Language, tables: &Tables) -> Self {
        let reader = digit_reader(lang);

        let mobile_spoken = read_fixed(&reader, 11);
        let service_10 = read_fixed(&reader, 10);
        let service_5 = read_fixed(&reader, 5);
        let service_3 = read_fixed(&reader, 3);

        let number_field_mobile = field("number", &mobile_spoken);
        let number_field_service = union_all([
            field("number", &service_10),
            field("number", &service_5),
            field("number", &service_3),
        ]);

        let prompt = prompt_keyword(tables);
        // a keyword must appear adjacent (before or after) the digit run.
        let keyword_before = concat2(&prompt, &number_field_service);
        let keyword_after = concat2(&number_field_service, &prompt);

        let with_country = concat2(&country_code(), &number_field_mobile.clone());
        let mut branches = vec![with_country, number_field_mobile, keyword_before, keyword_after];

        if lang == Language::Ja {
            let hyphen = cross("-", "の");
            let grouped = concat2(
                &read_fixed(&reader, 3),
                &concat2(&hyphen.clone(), &concat2(&read_fixed(&reader, 4), &concat2(&hyphen, &read_fixed(&reader, 4)))),
            );
            branches.push(field("number", &grouped));
        }

        let body = union_all(branches);
        let tagger = wrap_class("telephone", body);

        let separator_chars = match lang {
            Language::Zh => "",
            Language::Ja => "の",
        };
        let content = union_all([
            string_map(&digit_map(lang)),
            crate::fst::char_class(separator_chars),
            prompt_keyword(tables),
        ]);
        let verbalizer = crate::graphs::word::identity_field_verbalizer_over(
            "telephone",
            "number",
            &content,
        );

        Self {
            grammar: ClassGrammar {
                name: "telephone",
                tagger,
                verbalizer,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fst::{compose, shortest_path_n};

    #[test]
    fn tags_mobile_number() {
        let tables = Tables::load().unwrap();
        let t = Telephone::build(Language::Zh, &tables);
        assert!(compose(&accept("13812345678"), &t.grammar.tagger).is_ok());
    }

    #[test]
    fn tags_keyworded_emergency_number() {
        let tables = Tables::load().unwrap();
        let t = Telephone::build(Language::Zh, &tables);
        assert!(compose(&accept("电话119"), &t.grammar.tagger).is_ok());
    }

    #[test]
    fn keyword_survives_into_spoken_output() {
        let tables = Tables::load().unwrap();
        let t = Telephone::build(Language::Zh, &tables);
        let composed = compose(&accept("电话119"), &t.grammar.tagger).unwrap();
        let (_, tagged, _) = shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        let composed = compose(&accept(&tagged), &t.grammar.verbalizer).unwrap();
        let (_, out, _) = shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, "电话幺幺九");
    }

    #[test]
    fn tags_ja_grouped_mobile_number() {
        let tables = Tables::load().unwrap();
        let t = Telephone::build(Language::Ja, &tables);
        let composed = compose(&accept("090-1234-5678"), &t.grammar.tagger).unwrap();
        let (_, out, _) = shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, r#"telephone { number: "ゼロキューゼロのイチニーサンヨンのゴロクナナハチ" }"#);
    }
}
