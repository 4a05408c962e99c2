//! Static TSV tables, embedded at compile time and parsed once per
//! `Normalizer` construction into `(source, target)` pairs ready for
//! `fst::string_map`.

use crate::error::{Result, WeTextError};

macro_rules! table {
    ($name:ident, $path:literal) => {
        const $name: &str = include_str!($path);
    };
}

table!(ZERO_TSV, "../data/numbers/zero.tsv");
table!(DIGIT_TSV, "../data/numbers/digit.tsv");
table!(TIES_TSV, "../data/numbers/ties.tsv");
table!(TEEN_TSV, "../data/numbers/teen.tsv");
table!(MONTHS_TSV, "../data/date/months.tsv");
table!(DAY_TSV, "../data/date/day.tsv");
table!(DATE_SUFFIXES_TSV, "../data/date/suffixes.tsv");
table!(HOUR_TSV, "../data/time/hour.tsv");
table!(MINUTE_TSV, "../data/time/minute.tsv");
table!(SECOND_TSV, "../data/time/second.tsv");
table!(DIVISION_TSV, "../data/time/division.tsv");
table!(TELEPHONE_PROMPT_TSV, "../data/telephone/telephone_prompt.tsv");
table!(FULLWIDTH_TSV, "../data/char/fullwidth_to_halfwidth.tsv");

/// Parse a two-column TSV into owned `(source, target)` pairs.
///
/// A malformed line (not exactly two tab-separated columns) or a
/// duplicate source key mapping to two different targets is a
/// `BuildError`, raised at `Normalizer::new` time per the spec's error
/// taxonomy — never at normalize-time.
pub fn parse_tsv(name: &str, content: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    let mut seen: std::collections::HashMap<String, String> = std::collections::HashMap::new();
    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut cols = line.split('\t');
        let source = cols.next().ok_or_else(|| {
            WeTextError::BuildError(format!("{name}:{}: missing source column", lineno + 1))
        })?;
        let target = cols.next().ok_or_else(|| {
            WeTextError::BuildError(format!("{name}:{}: missing target column", lineno + 1))
        })?;
        if cols.next().is_some() {
            return Err(WeTextError::BuildError(format!(
                "{name}:{}: expected exactly two columns",
                lineno + 1
            )));
        }
        if let Some(existing) = seen.get(source) {
            if existing != target {
                return Err(WeTextError::BuildError(format!(
                    "{name}:{}: duplicate source '{source}' with differing targets \
                     ('{existing}' vs '{target}')",
                    lineno + 1
                )));
            }
            continue;
        }
        seen.insert(source.to_string(), target.to_string());
        pairs.push((source.to_string(), target.to_string()));
    }
    Ok(pairs)
}

/// The full set of number/date/time/telephone/char tables used across the
/// class grammars, parsed once and handed to every grammar constructor.
pub struct Tables {
    pub zero: Vec<(String, String)>,
    pub digit: Vec<(String, String)>,
    pub ties: Vec<(String, String)>,
    pub teen: Vec<(String, String)>,
    pub months: Vec<(String, String)>,
    pub day: Vec<(String, String)>,
    pub date_suffixes: Vec<(String, String)>,
    pub hour: Vec<(String, String)>,
    pub minute: Vec<(String, String)>,
    pub second: Vec<(String, String)>,
    pub division: Vec<(String, String)>,
    pub telephone_prompt: Vec<(String, String)>,
    pub fullwidth_to_halfwidth: Vec<(String, String)>,
}

impl Tables {
    /// Load and validate every embedded table.
    pub fn load() -> Result<Self> {
        Ok(Self {
            zero: parse_tsv("numbers/zero.tsv", ZERO_TSV)?,
            digit: parse_tsv("numbers/digit.tsv", DIGIT_TSV)?,
            ties: parse_tsv("numbers/ties.tsv", TIES_TSV)?,
            teen: parse_tsv("numbers/teen.tsv", TEEN_TSV)?,
            months: parse_tsv("date/months.tsv", MONTHS_TSV)?,
            day: parse_tsv("date/day.tsv", DAY_TSV)?,
            date_suffixes: parse_tsv("date/suffixes.tsv", DATE_SUFFIXES_TSV)?,
            hour: parse_tsv("time/hour.tsv", HOUR_TSV)?,
            minute: parse_tsv("time/minute.tsv", MINUTE_TSV)?,
            second: parse_tsv("time/second.tsv", SECOND_TSV)?,
            division: parse_tsv("time/division.tsv", DIVISION_TSV)?,
            telephone_prompt: parse_tsv("telephone/telephone_prompt.tsv", TELEPHONE_PROMPT_TSV)?,
            fullwidth_to_halfwidth: parse_tsv("char/fullwidth_to_halfwidth.tsv", FULLWIDTH_TSV)?,
        })
    }
}

/// Borrow a table as `&[(&str, &str)]` pairs for `fst::string_map`.
pub fn as_pairs(table: &[(String, String)]) -> Vec<(&str, &str)> {
    table.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_all_embedded_tables() {
        let tables = Tables::load().unwrap();
        assert!(!tables.digit.is_empty());
        assert!(!tables.day.is_empty());
        assert!(!tables.fullwidth_to_halfwidth.is_empty());
    }

    #[test]
    fn rejects_malformed_tsv() {
        let err = parse_tsv("bad", "a\tb\tc").unwrap_err();
        assert!(matches!(err, WeTextError::BuildError(_)));
    }

    #[test]
    fn rejects_conflicting_duplicate_key() {
        let err = parse_tsv("bad", "1\t一\n1\t壹").unwrap_err();
        assert!(matches!(err, WeTextError::BuildError(_)));
    }
}
