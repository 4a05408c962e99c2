//! Conformance harness driven by a JSON fixture rather than inline
//! assertions, embedded at compile time the same way the teacher embeds
//! its own JSON data tables.

use serde::Deserialize;
use zhja_wfst_normalizer::{Language, Normalizer};

#[derive(Deserialize)]
struct Case {
    lang: String,
    input: String,
    expected: String,
}

const FIXTURE: &str = include_str!("fixtures/scenario_cases.json");

#[test]
fn scenario_fixture_cases_normalize_as_expected() {
    let cases: Vec<Case> = serde_json::from_str(FIXTURE).expect("fixture is valid JSON");
    assert!(!cases.is_empty());

    for case in cases {
        let lang = match case.lang.as_str() {
            "zh" => Language::Zh,
            "ja" => Language::Ja,
            other => panic!("unknown lang '{other}' in scenario fixture"),
        };
        let normalizer = Normalizer::with_defaults(lang).unwrap();
        let out = normalizer.normalize(&case.input, false, true);
        assert_eq!(out, case.expected, "normalizing {:?}", case.input);
    }
}
