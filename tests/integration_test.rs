//! End-to-end tests driving the full preprocess -> classify -> reorder ->
//! verbalize -> postprocess pipeline through the public `Normalizer` API,
//! one surface form per semantic class plus a few pipeline-level
//! properties (idempotence on plain text, whitespace handling, language
//! separation).

use zhja_wfst_normalizer::{InputCase, Language, Normalizer, NormalizerConfig};

fn zh() -> Normalizer {
    Normalizer::with_defaults(Language::Zh).unwrap()
}

fn ja() -> Normalizer {
    Normalizer::with_defaults(Language::Ja).unwrap()
}

#[test]
fn normalizes_plain_cardinal() {
    let n = zh();
    assert_eq!(n.normalize("100", false, true), "一百");
}

#[test]
fn normalizes_negative_cardinal() {
    let n = zh();
    assert_eq!(n.normalize("-5", false, true), "负五");
}

#[test]
fn normalizes_kanji_date() {
    let n = zh();
    assert_eq!(n.normalize("2024年1月15日", false, true), "二零二四年一月十五日");
}

#[test]
fn normalizes_numeric_date() {
    let n = zh();
    assert_eq!(n.normalize("2024-1-15", false, true), "二零二四年一月十五日");
}

#[test]
fn normalizes_kanji_time() {
    let n = zh();
    assert_eq!(n.normalize("下午3点30分", false, true), "下午三点三十分");
}

#[test]
fn normalizes_suffix_money() {
    let n = zh();
    assert_eq!(n.normalize("100元", false, true), "一百元");
}

#[test]
fn normalizes_decimal() {
    let n = zh();
    assert_eq!(n.normalize("3.14", false, true), "三点一四");
}

#[test]
fn normalizes_fraction() {
    let n = zh();
    assert_eq!(n.normalize("3/4", false, true), "四分之三");
}

#[test]
fn normalizes_percentage() {
    let n = zh();
    let out = n.normalize("50%", false, true);
    assert_eq!(out, "百分之五十");
}

#[test]
fn normalizes_ordinal() {
    let n = zh();
    assert_eq!(n.normalize("第3", false, true), "第三");
}

#[test]
fn normalizes_measure() {
    let n = zh();
    assert_eq!(n.normalize("5km", false, true), "五公里");
}

#[test]
fn normalizes_whitelisted_acronym() {
    let n = zh();
    assert_eq!(n.normalize("WiFi", false, true), "无线网络");
}

#[test]
fn plain_text_is_unchanged() {
    let n = zh();
    assert_eq!(n.normalize("你好世界", false, true), "你好世界");
}

#[test]
fn empty_input_stays_empty() {
    let n = zh();
    assert_eq!(n.normalize("", false, true), "");
}

#[test]
fn fullwidth_digits_are_normalized_before_classification() {
    let n = zh();
    assert_eq!(n.normalize("１２３", false, true), n.normalize("123", false, true));
}

#[test]
fn digit_flanked_space_becomes_hyphen_before_classification() {
    let n = zh();
    let out = n.normalize("138 1234", false, true);
    // the preprocessor turns the digit-flanked space into "-" before
    // classify ever sees it, so no literal space character survives to
    // the output regardless of which class (or the `word` fallback)
    // ultimately claims the run.
    assert!(!out.contains(' '));
}

#[test]
fn non_digit_flanked_space_round_trips_through_the_marker() {
    let n = zh();
    assert_eq!(n.normalize("hello world", false, true), "hello world");
}

#[test]
fn japanese_banchi_address_number() {
    let n = ja();
    let out = n.normalize("1-2-3", false, true);
    assert!(out.contains('の'));
}

#[test]
fn japanese_money() {
    let n = ja();
    assert_eq!(n.normalize("100円", false, true), "一百円");
}

#[test]
fn lower_cased_input_case_affects_whitelist_matching() {
    let n = Normalizer::new(
        NormalizerConfig::new()
            .with_lang(Language::Zh)
            .with_input_case(InputCase::LowerCased),
    )
    .unwrap();
    // lower-casing happens before classify, so an all-caps acronym still
    // matches the (lower-cased) whitelist entry rather than falling to `word`.
    let out = n.normalize("WIFI", false, true);
    assert!(!out.is_empty());
}

#[test]
fn house_number_with_hao_suffix_reads_as_cardinal_not_telephone() {
    let n = zh();
    // Spec's central disambiguation example: a bare number followed by
    // `号` is a house number, not a telephone digit-by-digit reading or a
    // day-of-month, even though `119` alone would also be a recognizable
    // emergency number and could in principle be misread as one.
    assert_eq!(n.normalize("119号", false, true), "一百一十九号");
}

#[test]
fn keyworded_number_reads_digit_by_digit_as_telephone() {
    let n = zh();
    // Same digits, but the `电话` keyword licenses (and survives into)
    // the telephone reading instead.
    assert_eq!(n.normalize("电话119", false, true), "电话幺幺九");
}

#[test]
fn ja_banchi_with_zero_in_final_segment() {
    let n = ja();
    assert_eq!(n.normalize("1-2-809", false, true), "一の二のハチマルキュー");
}

#[test]
fn ja_postal_code() {
    let n = ja();
    assert_eq!(n.normalize("〒123-4567", false, true), "郵便番号イチニーサンのヨンゴロクナナ");
}

#[test]
fn ja_time_with_minutes() {
    let n = ja();
    assert_eq!(n.normalize("3時07分", false, true), "三時七分");
}

#[test]
fn ja_time_elides_zero_minute() {
    let n = ja();
    assert_eq!(n.normalize("3時00分", false, true), "三時");
}

#[test]
fn ja_grouped_telephone_number() {
    let n = ja();
    assert_eq!(
        n.normalize("090-1234-5678", false, true),
        "ゼロキューゼロのイチニーサンヨンのゴロクナナハチ"
    );
}

#[test]
fn cache_round_trip_produces_identical_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = NormalizerConfig::new().with_lang(Language::Zh).with_cache_dir(dir.path());
    let first = Normalizer::new(config.clone()).unwrap();
    let expected = first.normalize("2024年1月15日", false, true);

    let cached = Normalizer::new(config).unwrap();
    assert_eq!(cached.normalize("2024年1月15日", false, true), expected);
}
