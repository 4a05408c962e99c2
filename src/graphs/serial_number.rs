//! Serial numbers and codes (spec §4.14): an alphanumeric run read
//! character by character — digits via the plain cardinal digit map,
//! letters via their English letter names — grounded on the NeMo `zh`
//! `serial_number.py` tagger's catch-all reading for license plates,
//! tracking numbers, and model codes that don't fit any other class.

use crate::data::Tables;
use crate::fst::{accept, closure_n, concat2, string_map, union_all, Fst};
use crate::graphs::{field, wrap_class, ClassGrammar};

/// Chinese phonetic readings of the English letter names, the way
/// `serial_number.py` spells out letters in license plates and model
/// codes rather than leaving the bare Latin glyph for the TTS front end.
fn letter_names() -> Vec<(String, String)> {
    const NAMES: [&str; 26] = [
        "诶", "比", "西", "迪", "伊", "艾弗", "吉", "艾尺", "艾", "杰", "开", "艾勒", "艾马",
        "艾娜", "欧", "披", "吉吾", "艾儿", "艾丝", "提", "伊吾", "维", "豆贝尔维", "艾克斯",
        "吾艾", "贼德",
    ];
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ"
        .chars()
        .zip(NAMES.iter())
        .map(|(c, name)| (c.to_string(), name.to_string()))
        .collect()
}

fn char_reader(tables: &Tables) -> Fst {
    let mut pairs = crate::data::as_pairs(&tables.zero);
    pairs.extend(crate::data::as_pairs(&tables.digit));
    let owned = letter_names();
    let mut all: Vec<(&str, &str)> = pairs;
    all.extend(owned.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    string_map(&all)
}

pub struct SerialNumber {
    pub grammar: ClassGrammar,
}

impl SerialNumber {
    pub fn build(tables: &Tables) -> Self {
        let one_char = char_reader(tables);
        let run = closure_n(&one_char, 4, Some(20));

        let body = field("code", &run);
        let tagger = wrap_class("serial_number", body);

        let content = {
            let set: std::collections::HashSet<char> = tables
                .digit
                .iter()
                .chain(tables.zero.iter())
                .flat_map(|(_, w)| w.chars())
                .chain(letter_names().iter().flat_map(|(_, w)| w.chars().collect::<Vec<_>>()))
                .collect();
            crate::fst::char_class(&set.into_iter().collect::<String>())
        };
        let verbalizer = crate::graphs::word::identity_field_verbalizer_over(
            "serial_number",
            "code",
            &content,
        );

        Self {
            grammar: ClassGrammar {
                name: "serial_number",
                tagger,
                verbalizer,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fst::compose;

    #[test]
    fn tags_alphanumeric_code() {
        let tables = Tables::load().unwrap();
        let s = SerialNumber::build(&tables);
        assert!(compose(&accept("A1B2C3"), &s.grammar.tagger).is_ok());
    }
}
