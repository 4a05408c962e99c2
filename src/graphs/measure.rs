//! Measurements (spec §4.11): a cardinal or decimal magnitude followed by
//! a unit symbol or abbreviation, the unit re-emitted as its spoken word
//! rather than its symbol (`5km` → `五公里`, not `五kⅿ`) — grounded on the
//! NeMo `zh` `measure.py` tagger's unit table, trimmed to the units this
//! crate's test corpus actually exercises.

use crate::config::Language;
use crate::data::Tables;
use crate::fst::{accept, closure_n, compose, concat2, cross, string_map, union_all, Fst};
use crate::graphs::cardinal::Cardinal;
use crate::graphs::{field, wrap_class, ClassGrammar};

fn units(lang: Language) -> Vec<(&'static str, &'static str)> {
    match lang {
        Language::Zh => vec![
            ("km", "公里"),
            ("m", "米"),
            ("cm", "厘米"),
            ("mm", "毫米"),
            ("kg", "千克"),
            ("g", "克"),
            ("mg", "毫克"),
            ("km/h", "千米每小时"),
            ("℃", "摄氏度"),
            ("%", "百分比"),
            ("L", "升"),
            ("ml", "毫升"),
        ],
        Language::Ja => vec![
            ("km", "キロメートル"),
            ("m", "メートル"),
            ("cm", "センチメートル"),
            ("mm", "ミリメートル"),
            ("kg", "キログラム"),
            ("g", "グラム"),
            ("℃", "度"),
            ("%", "パーセント"),
            ("L", "リットル"),
        ],
    }
}

pub struct Measure {
    pub grammar: ClassGrammar,
}

impl Measure {
    pub fn build(lang: Language, tables: &Tables, cardinal: &Cardinal) -> Self {
        let digit = union_all((0..10).map(|d| accept(&d.to_string())));
        let int_digits = closure_n(&digit, 1, None);
        let decimal_digits = concat2(&int_digits, &concat2(&cross(".", "点"), &{
            let frac = closure_n(&digit, 1, None);
            let mut pairs = crate::data::as_pairs(&tables.zero);
            pairs.extend(crate::data::as_pairs(&tables.digit));
            compose(&frac, &closure_n(&string_map(&pairs), 1, None))
                .unwrap_or_else(|_| closure_n(&string_map(&pairs), 1, None))
        }));

        let magnitude_spoken = compose(&int_digits, &cardinal.just_cardinals)
            .unwrap_or_else(|_| cardinal.just_cardinals.clone());
        let magnitude = union_all([magnitude_spoken, decimal_digits]);

        let unit_table = units(lang);
        let unit = string_map(&unit_table);

        let body = concat2(&field("value", &magnitude), &field("unit", &unit));
        let tagger = wrap_class("measure", body);

        let content = {
            let set: std::collections::HashSet<char> = tables
                .digit
                .iter()
                .chain(tables.zero.iter())
                .flat_map(|(_, w)| w.chars())
                .chain(['十', '百', '千', '万', '亿', '億', '两', '负', '点'])
                .chain(unit_table.iter().flat_map(|(_, w)| w.chars()))
                .collect();
            crate::fst::char_class(&set.into_iter().collect::<String>())
        };
        let verbalizer = measure_verbalizer(&content);

        Self {
            grammar: ClassGrammar {
                name: "measure",
                tagger,
                verbalizer,
            },
        }
    }
}

/// No space between `value` and `unit` in the tagged form (the tagger
/// concatenates the two fields directly) or in spoken output (`五公里`,
/// not `五 公里`), so this is a direct `concat2`, not `join_fields`.
fn measure_verbalizer(content: &Fst) -> Fst {
    use crate::fst::delete;
    let value = closure_n(content, 0, None);
    let field_of = |name: &str| {
        concat2(
            &concat2(&delete(&format!("{name}: \"")), &value.clone()),
            &delete("\""),
        )
    };
    let body = concat2(&field_of("value"), &field_of("unit"));
    concat2(&concat2(&delete("measure { "), &body), &delete(" }"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_simple_measure() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let m = Measure::build(Language::Zh, &tables, &cardinal);
        assert!(compose(&accept("5km"), &m.grammar.tagger).is_ok());
    }

    #[test]
    fn tags_decimal_measure() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let m = Measure::build(Language::Zh, &tables, &cardinal);
        assert!(compose(&accept("3.5kg"), &m.grammar.tagger).is_ok());
    }

    #[test]
    fn verbalizes_without_spurious_space() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let m = Measure::build(Language::Zh, &tables, &cardinal);
        let tagged = r#"measure { value: "五" unit: "公里" }"#;
        let composed = compose(&accept(tagged), &m.grammar.verbalizer).unwrap();
        let (_, out, _) = crate::fst::shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, "五公里");
    }
}
