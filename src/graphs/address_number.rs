//! Japanese street-address and postal numbers (spec §4.9, `ja`-only),
//! grounded on the NeMo `ja` `address.py` tagger's banchi reading: a
//! hyphen-separated block-lot-unit numbering (`1-2-809`) where every
//! non-final segment reads in kanji style via the cardinal grammar (`21`
//! → `二十一`) and only the final segment may fall back to digit-by-digit
//! reading, and only when it contains a `0` (`809` → `ハチマルキュー`,
//! with `0` read as `マル` rather than `ゼロ` — distinct from both
//! `telephone.rs`'s and the postal-code reading's `ゼロ`). A `〒`-prefixed
//! postal code is a separate surface form entirely: every digit of every
//! group reads digit-by-digit with `0` as `ゼロ`, preceded by the spoken
//! word `郵便番号`.
//!
//! Every segment is required to have a nonzero leading digit (spec's
//! explicit anti-collision constraint with `telephone`).

use crate::data::Tables;
use crate::fst::{accept, closure_n, compose, concat2, cross, delete, insert, string_map, union_all, Fst};
use crate::graphs::cardinal::Cardinal;
use crate::graphs::{field, wrap_class, ClassGrammar};

const MAX_SEGMENT_LEN: usize = 3;

/// Digit-by-digit reading used by the final banchi segment when it
/// contains a `0`. `0` reads as `マル`, the "circle" reading used for a
/// zero embedded inside an otherwise-spoken number, not the bare-zero
/// `ゼロ` of a telephone digit or a postal code.
fn final_segment_digit_map() -> Vec<(&'static str, &'static str)> {
    vec![
        ("0", "マル"),
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

/// Digit-by-digit reading used by postal codes: every digit, including a
/// leading one, reads as a bare digit name with `0` as `ゼロ`.
fn postal_digit_map() -> Vec<(&'static str, &'static str)> {
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

fn all_digits() -> Fst {
    union_all((0..10).map(|d| accept(&d.to_string())))
}

/// Every 1-to-`max_len`-digit numeral with a nonzero leading digit, the
/// shared "must not start with 0" constraint every banchi segment obeys.
fn nonzero_leading_digits(max_len: usize) -> Fst {
    let nonzero = union_all((1..10).map(|d| accept(&d.to_string())));
    let rest = closure_n(&all_digits(), 0, Some(max_len - 1));
    concat2(&nonzero, &rest)
}

/// Every nonzero-led numeral up to `max_len` digits, partitioned by
/// whether it contains a `0` anywhere. Small enough (≤999 for the banchi
/// segment bound) to enumerate directly rather than express as a
/// `difference` of automata.
fn partition_by_contains_zero(max_len: usize) -> (Fst, Fst) {
    let max = 10u32.pow(max_len as u32) - 1;
    let (with_zero, without_zero): (Vec<String>, Vec<String>) =
        (1..=max).map(|n| n.to_string()).partition(|s| s.contains('0'));
    (
        union_all(with_zero.iter().map(|s| accept(s))),
        union_all(without_zero.iter().map(|s| accept(s))),
    )
}

pub struct AddressNumber {
    pub grammar: ClassGrammar,
}

impl AddressNumber {
    pub fn build(tables: &Tables, cardinal: &Cardinal) -> Self {
        let segment_digits = nonzero_leading_digits(MAX_SEGMENT_LEN);
        let kanji_reader = compose(&segment_digits, &cardinal.just_cardinals)
            .unwrap_or_else(|_| cardinal.just_cardinals.clone());

        let (with_zero, without_zero) = partition_by_contains_zero(MAX_SEGMENT_LEN);
        let final_kanji = compose(&without_zero, &cardinal.just_cardinals)
            .unwrap_or_else(|_| cardinal.just_cardinals.clone());
        let final_digit_table = closure_n(&string_map(&final_segment_digit_map()), 1, Some(MAX_SEGMENT_LEN));
        let final_digit_by_digit =
            compose(&with_zero, &final_digit_table).unwrap_or_else(|_| final_digit_table.clone());
        let final_segment = union_all([final_kanji, final_digit_by_digit]);

        let sep = cross("-", "の");
        let two_group = concat2(&kanji_reader, &concat2(&sep.clone(), &final_segment.clone()));
        let three_group = concat2(
            &kanji_reader.clone(),
            &concat2(
                &sep.clone(),
                &concat2(&kanji_reader, &concat2(&sep.clone(), &final_segment)),
            ),
        );

        let postal_reader = string_map(&postal_digit_map());
        let postal_group_3 = closure_n(&postal_reader, 3, Some(3));
        let postal_group_4 = closure_n(&postal_reader, 4, Some(4));
        let postal_form = concat2(
            &delete("〒"),
            &concat2(
                &insert("郵便番号"),
                &concat2(&postal_group_3, &concat2(&sep, &postal_group_4)),
            ),
        );

        let body = field("number", &union_all([two_group, three_group, postal_form]));
        let tagger = wrap_class("address_number", body);

        let content = content_alphabet(tables);
        let verbalizer = crate::graphs::word::identity_field_verbalizer_over(
            "address_number",
            "number",
            &content,
        );

        Self {
            grammar: ClassGrammar {
                name: "address_number",
                tagger,
                verbalizer,
            },
        }
    }
}

fn content_alphabet(tables: &Tables) -> Fst {
    let mut set: std::collections::HashSet<char> = tables
        .digit
        .iter()
        .chain(tables.zero.iter())
        .flat_map(|(_, w)| w.chars())
        .collect();
    for ch in ['十', '百', '千', '万', '亿', '億', '两', 'の'] {
        set.insert(ch);
    }
    for word in "郵便番号".chars() {
        set.insert(word);
    }
    for (_, reading) in final_segment_digit_map().iter().chain(postal_digit_map().iter()) {
        set.extend(reading.chars());
    }
    crate::fst::char_class(&set.into_iter().collect::<String>())
}
