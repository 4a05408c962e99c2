//! L4: postprocessing (spec §4.12's closing note, §4.13). Two repairs
//! applied to the verbalizer's output string, plain `&str`
//! transformations rather than another FST pass — both operate on
//! already-linear text, not on ambiguous alternatives, so there is
//! nothing left for weighted composition to disambiguate.

use unicode_segmentation::UnicodeSegmentation;

const SPACE_MARKER: &str = "<|space|>";

/// Restore `<|space|>` markers the preprocessor inserted for spaces that
/// were not digit-flanked, and optionally split runs of consecutive
/// capital letters inside `『…』` with spaces (`『ABC』` → `『A B C』`),
/// matching the teacher's quote-interior repair for acronym readability.
pub fn run(text: &str, punct_post_process: bool) -> String {
    let mut result = text.replace(SPACE_MARKER, " ");
    if punct_post_process {
        result = split_capitals_in_quotes(&result);
    }
    result
}

/// Walks grapheme clusters rather than `char`s: an accented Latin capital
/// inside a quoted acronym (rare in zh/ja input, but not impossible coming
/// through a whitelist entry) is one grapheme and should not be split from
/// its combining mark even though it spans more than one `char`.
fn split_capitals_in_quotes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_quote = false;
    let mut graphemes = text.graphemes(true).peekable();
    while let Some(g) = graphemes.next() {
        match g {
            "『" => {
                in_quote = true;
                out.push_str(g);
            }
            "』" => {
                in_quote = false;
                out.push_str(g);
            }
            _ if in_quote && is_ascii_uppercase_grapheme(g) => {
                out.push_str(g);
                if matches!(graphemes.peek(), Some(next) if is_ascii_uppercase_grapheme(next)) {
                    out.push(' ');
                }
            }
            _ => out.push_str(g),
        }
    }
    out
}

fn is_ascii_uppercase_grapheme(g: &str) -> bool {
    let mut chars = g.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_space_marker() {
        assert_eq!(run(&format!("a{SPACE_MARKER}b"), false), "a b");
    }

    #[test]
    fn splits_capital_runs_inside_quotes() {
        assert_eq!(run("『ABC』", true), "『A B C』");
    }

    #[test]
    fn leaves_capitals_outside_quotes_alone() {
        assert_eq!(run("ABC", true), "ABC");
    }

    #[test]
    fn skips_quote_repair_when_disabled() {
        assert_eq!(run("『ABC』", false), "『ABC』");
    }
}
