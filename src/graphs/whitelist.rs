//! Whitelist entries (spec §4.15): a closed set of abbreviations and
//! loanwords with a fixed spoken reading that would otherwise be left
//! as Latin letters by every other class, grounded on the NeMo
//! `whitelist.py` tagger's direct lookup table — no composition, no
//! digit handling, just a surface-to-spoken string map.

use crate::config::Language;
use crate::data::Tables;
use crate::fst::{string_map, Fst};
use crate::graphs::{field, wrap_class, ClassGrammar};

fn entries(lang: Language) -> Vec<(&'static str, &'static str)> {
    match lang {
        Language::Zh => vec![
            ("WiFi", "无线网络"),
            ("wifi", "无线网络"),
            ("CEO", "西艾欧"),
            ("VIP", "维艾皮"),
            ("KTV", "卡拉OK"),
            ("GDP", "吉迪皮"),
            ("App", "应用"),
            ("ID", "艾迪"),
        ],
        Language::Ja => vec![
            ("WiFi", "ワイファイ"),
            ("CEO", "シーイーオー"),
            ("VIP", "ブイアイピー"),
            ("ID", "アイディー"),
        ],
    }
}

pub struct Whitelist {
    pub grammar: ClassGrammar,
}

impl Whitelist {
    pub fn build(lang: Language, _tables: &Tables) -> Self {
        let table = entries(lang);
        let lookup = string_map(&table);

        let body = field("value", &lookup);
        let tagger = wrap_class("whitelist", body);

        let content: Fst = {
            let set: std::collections::HashSet<char> =
                table.iter().flat_map(|(_, w)| w.chars()).collect();
            crate::fst::char_class(&set.into_iter().collect::<String>())
        };
        let verbalizer =
            crate::graphs::word::identity_field_verbalizer_over("whitelist", "value", &content);

        Self {
            grammar: ClassGrammar {
                name: "whitelist",
                tagger,
                verbalizer,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fst::{accept, compose};

    #[test]
    fn tags_known_abbreviation() {
        let tables = Tables::load().unwrap();
        let w = Whitelist::build(Language::Zh, &tables);
        assert!(compose(&accept("WiFi"), &w.grammar.tagger).is_ok());
    }
}
