//! Spoken symbols (spec §4.16): punctuation that carries a verbal
//! reading rather than a prosodic pause — `&`, `@`, `#`, `+` — read out
//! as their name instead of passed to the postprocessor as a break.
//! Ordinary sentence punctuation (`。`, `，`, `！`, `？`, `、`) is left
//! untouched here; it carries no lexical content and is a formatting
//! concern for `preprocessor`/`postprocess`, not this class.

use crate::config::Language;
use crate::data::Tables;
use crate::fst::string_map;
use crate::graphs::{field, wrap_class, ClassGrammar};

fn symbols(lang: Language) -> Vec<(&'static str, &'static str)> {
    match lang {
        Language::Zh => vec![
            ("&", "和"),
            ("@", "艾特"),
            ("#", "井号"),
            ("+", "加"),
            ("=", "等于"),
            ("×", "乘以"),
            ("÷", "除以"),
        ],
        Language::Ja => vec![
            ("&", "アンド"),
            ("@", "アット"),
            ("#", "シャープ"),
            ("+", "プラス"),
            ("=", "イコール"),
            ("×", "かける"),
            ("÷", "わる"),
        ],
    }
}

pub struct Punctuation {
    pub grammar: ClassGrammar,
}

impl Punctuation {
    pub fn build(lang: Language, _tables: &Tables) -> Self {
        let table = symbols(lang);
        let lookup = string_map(&table);

        let body = field("value", &lookup);
        let tagger = wrap_class("punctuation", body);

        let content = {
            let set: std::collections::HashSet<char> =
                table.iter().flat_map(|(_, w)| w.chars()).collect();
            crate::fst::char_class(&set.into_iter().collect::<String>())
        };
        let verbalizer =
            crate::graphs::word::identity_field_verbalizer_over("punctuation", "value", &content);

        Self {
            grammar: ClassGrammar {
                name: "punctuation",
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
    fn tags_ampersand() {
        let tables = Tables::load().unwrap();
        let p = Punctuation::build(Language::Zh, &tables);
        assert!(compose(&accept("&"), &p.grammar.tagger).is_ok());
    }
}
