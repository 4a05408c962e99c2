//! Decimal numbers (spec §4.8): integer part read by `cardinal`, `.`
//! spoken as `点` and the fractional digits read one at a time (`3.14` →
//! `三点一四`, never `三点十四`) — grounded on the same digit-by-digit
//! convention NeMo's `decimal.py` uses for fractional digits everywhere,
//! not just in dates.

use crate::config::Language;
use crate::data::Tables;
use crate::fst::{accept, closure_n, compose, concat2, cross, delete, insert, string_map, union_all, Fst};
use crate::graphs::cardinal::Cardinal;
use crate::graphs::{field, wrap_class, ClassGrammar};

fn point_word(lang: Language) -> &'static str {
    match lang {
        Language::Zh => "点",
        Language::Ja => "点",
    }
}

fn digit_by_digit(tables: &Tables) -> Fst {
    let mut pairs = crate::data::as_pairs(&tables.zero);
    pairs.extend(crate::data::as_pairs(&tables.digit));
    closure_n(&string_map(&pairs), 1, None)
}

pub struct Decimal {
    pub grammar: ClassGrammar,
}

impl Decimal {
    pub fn build(lang: Language, tables: &Tables, cardinal: &Cardinal) -> Self {
        let digit = union_all((0..10).map(|d| accept(&d.to_string())));
        let fractional_digits = closure_n(&digit, 1, None);
        let fractional_spoken = compose(&fractional_digits, &digit_by_digit(tables))
            .unwrap_or_else(|_| digit_by_digit(tables));

        let integer_field = field("integer_part", &cardinal.just_cardinals);
        let fractional_field = field("fractional_part", &fractional_spoken);

        let body = concat2(&integer_field, &concat2(&cross(".", ""), &fractional_field));
        let tagger = wrap_class("decimal", body);

        let content = {
            let set: std::collections::HashSet<char> = tables
                .digit
                .iter()
                .chain(tables.zero.iter())
                .flat_map(|(_, w)| w.chars())
                .chain(['十', '百', '千', '万', '亿', '億', '两', '负'])
                .collect();
            crate::fst::char_class(&set.into_iter().collect::<String>())
        };
        let verbalizer = decimal_verbalizer(&content, point_word(lang));

        Self {
            grammar: ClassGrammar {
                name: "decimal",
                tagger,
                verbalizer,
            },
        }
    }
}

fn decimal_verbalizer(content: &Fst, point: &str) -> Fst {
    let value = closure_n(content, 0, None);
    let integer = concat2(&concat2(&delete("integer_part: \""), &value.clone()), &delete("\""));
    let fractional = concat2(
        &concat2(&delete("fractional_part: \""), &value.clone()),
        &delete("\""),
    );
    let body = concat2(&integer, &concat2(&insert(point), &fractional));
    concat2(&concat2(&delete("decimal { "), &body), &delete(" }"))
}
