//! Money amounts (spec §4.7), grounded on the NeMo `ja` `money.py` tagger:
//! a currency symbol or word in prefix or suffix position, an integer
//! part read by `cardinal`, and an optional fractional subunit (`角`/`分`
//! in `zh`, `銭` in `ja`) re-emitted with its own `unit` field rather than
//! folded into a decimal reading.

use crate::data::Tables;
use crate::fst::{accept, closure_n, compose, concat2, cross, delete, insert, string_map, union_all, Fst};
use crate::graphs::cardinal::Cardinal;
use crate::graphs::{field, join_fields, wrap_class, ClassGrammar};
use crate::config::Language;

fn currency_words(lang: Language) -> Vec<(&'static str, &'static str)> {
    match lang {
        Language::Zh => vec![
            ("￥", "元"),
            ("¥", "元"),
            ("$", "美元"),
            ("€", "欧元"),
            ("£", "英镑"),
            ("元", "元"),
            ("人民币", "人民币"),
            ("美元", "美元"),
        ],
        Language::Ja => vec![
            ("￥", "円"),
            ("¥", "円"),
            ("$", "ドル"),
            ("€", "ユーロ"),
            ("£", "ポンド"),
            ("円", "円"),
        ],
    }
}

fn subunit_words(lang: Language) -> Vec<(&'static str, &'static str)> {
    match lang {
        Language::Zh => vec![("角", "角"), ("分", "分")],
        Language::Ja => vec![("銭", "銭")],
    }
}

pub struct Money {
    pub grammar: ClassGrammar,
}

impl Money {
    pub fn build(lang: Language, tables: &Tables, cardinal: &Cardinal) -> Self {
        let currency = string_map(&currency_words(lang));
        let integer_field = field("integer", &cardinal.just_cardinals);
        let currency_field = field("currency", &currency);

        let digit = union_all((0..10).map(|d| accept(&d.to_string())));
        let subunit_digits = closure_n(&digit, 1, Some(2));
        let subunit_spoken = compose(&subunit_digits, &cardinal.just_cardinals)
            .unwrap_or_else(|_| cardinal.just_cardinals.clone());
        let subunit_kind = string_map(&subunit_words(lang));
        let subunit = join_fields(&[field("fractional_part", &subunit_spoken), field("unit", &subunit_kind)]);
        // Leading " " is part of the optional branch, absent along with the
        // rest of it when there is no subunit, so it never leaves a stray
        // space after `integer` when the amount is a whole number.
        let subunit_branch = concat2(&cross(".", ""), &concat2(&insert(" "), &subunit));
        let optional_subunit = closure_n(&subunit_branch, 0, Some(1));

        // `prefix_form` consumes the currency symbol before the amount
        // (`¥100`) but still has to tag fields in the same `integer
        // [fractional_part unit] currency` order `suffix_form` does, so the
        // verbalizer can render canonical amount-then-currency order (spec
        // §4.7) no matter which surface form it came from. Each currency
        // symbol gets its own branch so the symbol can be deleted where it's
        // read and its spoken word re-inserted as the trailing `currency`
        // field, rather than tagged on the spot where it appeared.
        let prefix_form = union_all(currency_words(lang).into_iter().map(|(symbol, word)| {
            concat2(
                &delete(symbol),
                &concat2(
                    &concat2(&integer_field.clone(), &optional_subunit.clone()),
                    &concat2(&insert(" "), &field("currency", &insert(word))),
                ),
            )
        }));
        let suffix_form = concat2(&concat2(&integer_field, &optional_subunit), &concat2(&insert(" "), &currency_field));

        let body = union_all([prefix_form, suffix_form]);
        let tagger = wrap_class("money", body);

        let content = union_all([
            cardinal_output_alphabet(tables),
            string_map(&currency_words(lang)),
            string_map(&subunit_words(lang)),
        ]);
        let verbalizer = money_verbalizer(&content);

        Self {
            grammar: ClassGrammar {
                name: "money",
                tagger,
                verbalizer,
            },
        }
    }
}

fn cardinal_output_alphabet(tables: &Tables) -> Fst {
    let set: std::collections::HashSet<char> = tables
        .digit
        .iter()
        .chain(tables.zero.iter())
        .flat_map(|(_, w)| w.chars())
        .chain(['十', '百', '千', '万', '亿', '億', '两', '负'])
        .collect();
    crate::fst::char_class(&set.into_iter().collect::<String>())
}

/// The tagger always tags `integer [fractional_part unit] currency` in that
/// order regardless of whether the surface form put the currency symbol
/// before or after the amount (spec §4.7: spoken order is canonical,
/// amount-then-currency, independent of surface order), so there is only
/// one shape to mirror here — no per-branch union needed.
fn money_verbalizer(content: &Fst) -> Fst {
    let value = closure_n(content, 0, None);
    let req = |name: &str| {
        concat2(&concat2(&delete(&format!("{name}: \"")), &value.clone()), &delete("\""))
    };
    let opt_subunit = {
        let subunit = concat2(&req("fractional_part"), &concat2(&accept(" "), &req("unit")));
        closure_n(&concat2(&accept(" "), &subunit), 0, Some(1))
    };

    let body = concat2(
        &concat2(&req("integer"), &opt_subunit),
        &concat2(&accept(" "), &req("currency")),
    );
    concat2(&concat2(&delete("money { "), &body), &delete(" }"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_suffix_money() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let m = Money::build(Language::Zh, &tables, &cardinal);
        assert!(compose(&accept("100元"), &m.grammar.tagger).is_ok());
    }

    #[test]
    fn verbalizes_suffix_tagged_form() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let m = Money::build(Language::Zh, &tables, &cardinal);

        let suffix_tagged = r#"money { integer: "一百" currency: "元" }"#;
        let composed = compose(&accept(suffix_tagged), &m.grammar.verbalizer).unwrap();
        let (_, out, _) = crate::fst::shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, "一百元");
    }

    #[test]
    fn tags_prefix_currency_in_canonical_amount_first_order() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let m = Money::build(Language::Zh, &tables, &cardinal);

        // `¥100` puts the currency symbol before the amount on the surface,
        // but the tagged field order (and so the spoken form) is always
        // amount-then-currency (spec §4.7).
        let composed = compose(&accept("¥100"), &m.grammar.tagger).unwrap();
        let (_, tagged, _) = crate::fst::shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(tagged, r#"money { integer: "一百" currency: "元" }"#);

        let composed = compose(&accept(&tagged), &m.grammar.verbalizer).unwrap();
        let (_, out, _) = crate::fst::shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, "一百元");
    }
}
