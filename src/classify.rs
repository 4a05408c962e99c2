//! L3: the tokenize-and-classify orchestrator. `CLASSIFY` is the weighted
//! union of every class grammar's tagger, each wrapped as
//! `tokens { <class> { ... } }`, closed over `token ∪ (space → space)` so
//! a whole sentence of mixed plain text and entities tags in one pass.
//!
//! Weight tuning here *is* the disambiguation policy: lower weight wins
//! at shortest-path time, so `cardinal`/`money` outrank `date`/`time` for
//! short ambiguous runs, and `word` sits far above everything as the
//! catch-all that never should have won unless nothing else matched.

use crate::config::{Language, NormalizerConfig};
use crate::data::Tables;
use crate::error::Result;
use crate::fst::{accept, add_weight, closure_n, concat2, insert, union_all, Fst};
use crate::graphs::address_number::AddressNumber;
use crate::graphs::cardinal::Cardinal;
use crate::graphs::credit_card::CreditCard;
use crate::graphs::date::Date;
use crate::graphs::decimal::Decimal;
use crate::graphs::fraction::Fraction;
use crate::graphs::measure::Measure;
use crate::graphs::money::Money;
use crate::graphs::ordinal::Ordinal;
use crate::graphs::punctuation::Punctuation;
use crate::graphs::serial_number::SerialNumber;
use crate::graphs::telephone::Telephone;
use crate::graphs::time::Time;
use crate::graphs::whitelist::Whitelist;
use crate::graphs::word::Word;
use crate::graphs::ClassGrammar;

pub const CARDINAL_WEIGHT: f32 = 0.9;
pub const MONEY_WEIGHT: f32 = 0.8;
pub const TELEPHONE_WEIGHT: f32 = 0.5;
pub const ADDRESS_NUMBER_WEIGHT: f32 = 0.9;
pub const DATE_WEIGHT: f32 = 1.1;
pub const TIME_WEIGHT: f32 = 1.1;
pub const FRACTION_WEIGHT: f32 = 1.0;
pub const ORDINAL_WEIGHT: f32 = 1.0;
pub const MEASURE_WEIGHT: f32 = 1.0;
pub const DECIMAL_WEIGHT: f32 = 3.05;
pub const WHITELIST_WEIGHT: f32 = 1.1;
pub const PUNCTUATION_WEIGHT: f32 = 1.1;
pub const CREDIT_CARD_WEIGHT: f32 = 1.05;
pub const SERIAL_NUMBER_WEIGHT: f32 = 1.05;
pub const WORD_WEIGHT: f32 = 100.0;

fn weight_for(name: &str) -> f32 {
    match name {
        "cardinal" => CARDINAL_WEIGHT,
        "money" => MONEY_WEIGHT,
        "telephone" => TELEPHONE_WEIGHT,
        "address_number" => ADDRESS_NUMBER_WEIGHT,
        "date" => DATE_WEIGHT,
        "time" => TIME_WEIGHT,
        "fraction" => FRACTION_WEIGHT,
        "ordinal" => ORDINAL_WEIGHT,
        "measure" => MEASURE_WEIGHT,
        "decimal" => DECIMAL_WEIGHT,
        "whitelist" => WHITELIST_WEIGHT,
        "punctuation" => PUNCTUATION_WEIGHT,
        "credit_card" => CREDIT_CARD_WEIGHT,
        "serial_number" => SERIAL_NUMBER_WEIGHT,
        "word" => WORD_WEIGHT,
        other => {
            log::debug!("classify: no weight registered for class '{other}', defaulting to 1.0");
            1.0
        }
    }
}

/// Build every class grammar for `lang`, in dependency order: `cardinal`
/// first, since `money`/`decimal`/`fraction`/`ordinal`/`measure` all
/// compose against its bare numeral reading.
pub fn build_grammars(lang: Language, tables: &Tables, config: &NormalizerConfig) -> Result<Vec<ClassGrammar>> {
    let cardinal = Cardinal::build(lang, tables)?;

    // Built before `cardinal.grammar` is moved into the vec below, since it
    // needs the whole `Cardinal` struct (its kanji-style segment reading),
    // not just the `just_cardinals` field.
    let address_number_grammar =
        (lang == Language::Ja).then(|| AddressNumber::build(tables, &cardinal).grammar);

    let mut grammars = vec![
        Money::build(lang, tables, &cardinal).grammar,
        Decimal::build(lang, tables, &cardinal).grammar,
        Fraction::build(lang, tables, &cardinal).grammar,
        Ordinal::build(tables, &cardinal).grammar,
        Measure::build(lang, tables, &cardinal).grammar,
        Date::build(lang, tables).grammar,
        Time::build(lang, tables).grammar,
        Telephone::build(lang, tables).grammar,
        CreditCard::build(lang, tables).grammar,
        SerialNumber::build(tables).grammar,
        Whitelist::build(lang, tables).grammar,
        Punctuation::build(lang, tables).grammar,
        Word::build().grammar,
        cardinal.grammar,
    ];

    if let Some(g) = address_number_grammar {
        grammars.push(g);
    }

    if let Some(path) = &config.whitelist_path {
        log::debug!("classify: custom whitelist_path {path:?} not yet merged, using built-in table");
    }

    Ok(grammars)
}

/// `CLASSIFY`: the weighted union of every class tagger, wrapped
/// token-by-token and closed over runs of tokens interleaved with spaces.
pub fn build(grammars: &[ClassGrammar]) -> Fst {
    let token_branches = grammars.iter().map(|g| {
        let weighted = add_weight(&g.tagger, weight_for(g.name));
        concat2(&concat2(&insert("tokens { "), &weighted), &insert(" }"))
    });

    let token = union_all(token_branches);
    let space = accept(" ");
    closure_n(&union_all([token, space]), 1, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fst::compose;

    #[test]
    fn weights_match_the_disambiguation_table() {
        assert!(CARDINAL_WEIGHT < DATE_WEIGHT);
        assert!(MONEY_WEIGHT < CARDINAL_WEIGHT);
        assert!(DECIMAL_WEIGHT > DATE_WEIGHT);
        assert!(WORD_WEIGHT > DECIMAL_WEIGHT);
    }

    #[test]
    fn classify_tags_a_short_sentence() {
        let tables = Tables::load().unwrap();
        let config = NormalizerConfig::new();
        let grammars = build_grammars(Language::Zh, &tables, &config).unwrap();
        let classify = build(&grammars);
        let composed = compose(&accept("100元 3个人"), &classify);
        assert!(composed.is_ok());
    }
}
