//! Credit-card numbers (spec §4.13): a 13-19 digit run, optionally
//! separated into groups of four by spaces or hyphens, read digit by
//! digit — grounded on the same digit-by-digit convention as
//! `telephone`, but with no country code, no keyword gating, and no
//! upper bound tied to a specific length (card networks vary 13-19).

use crate::config::Language;
use crate::data::Tables;
use crate::fst::{accept, closure_n, compose, concat2, cross, string_map, union_all, Fst};
use crate::graphs::{field, wrap_class, ClassGrammar};

fn digit_map(lang: Language) -> Vec<(&'static str, &'static str)> {
    match lang {
        Language::Zh => vec![
            ("0", "零"), ("1", "幺"), ("2", "二"), ("3", "三"), ("4", "四"),
            ("5", "五"), ("6", "六"), ("7", "七"), ("8", "八"), ("9", "九"),
        ],
        Language::Ja => vec![
            ("0", "ゼロ"), ("1", "イチ"), ("2", "ニ"), ("3", "サン"), ("4", "ヨン"),
            ("5", "ゴ"), ("6", "ロク"), ("7", "ナナ"), ("8", "ハチ"), ("9", "キュウ"),
        ],
    }
}

pub struct CreditCard {
    pub grammar: ClassGrammar,
}

impl CreditCard {
    pub fn build(lang: Language, _tables: &Tables) -> Self {
        let digit = union_all((0..10).map(|d| accept(&d.to_string())));
        let reader = string_map(&digit_map(lang));

        let bare = closure_n(&digit, 13, Some(19));
        let bare_spoken = compose(&bare, &closure_n(&reader, 1, None)).unwrap_or_else(|_| reader.clone());

        let group4 = closure_n(&digit, 4, Some(4));
        let group4_spoken = compose(&group4, &closure_n(&reader, 1, None)).unwrap_or_else(|_| reader.clone());
        let sep = union_all([cross(" ", ""), cross("-", "")]);
        let grouped = concat2(
            &group4_spoken,
            &closure_n(&concat2(&sep, &group4_spoken), 2, Some(4)),
        );

        let body = field("number", &union_all([bare_spoken, grouped]));
        let tagger = wrap_class("credit_card", body);

        let content = string_map(&digit_map(lang));
        let verbalizer = crate::graphs::word::identity_field_verbalizer_over(
            "credit_card",
            "number",
            &content,
        );

        Self {
            grammar: ClassGrammar {
                name: "credit_card",
                tagger,
                verbalizer,
            },
        }
    }
}
