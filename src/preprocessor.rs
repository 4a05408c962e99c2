//! L4: the preprocessor (spec §4.11). Three `cdrewrite` passes composed
//! in order, each built once per `Normalizer` and re-applied to every
//! input string:
//!
//! 1. Full-width → half-width character rewrite, table-driven.
//! 2. Full-width space (`　`, U+3000) → half-width space.
//! 3. Space policy: a space flanked by digits on both sides becomes `-`
//!    (preserving phone/serial grouping before those classes ever see
//!    the text); any other space becomes the `<|space|>` marker, which
//!    `postprocess` restores verbatim after verbalization.

use crate::data::Tables;
use crate::error::{Result, WeTextError};
use crate::fst::{accept, char_range, compose, cross, string_map, union_all, Fst};
use crate::graphs::word::not_space;

const SPACE_MARKER: &str = "<|space|>";

fn sigma() -> Fst {
    union_all([not_space(), accept(" "), accept(SPACE_MARKER)])
}

fn digit_class() -> Fst {
    char_range(b'0' as u32, b'9' as u32)
}

pub struct Preprocessor {
    fst: Fst,
}

impl Preprocessor {
    pub fn build(tables: &Tables) -> Result<Self> {
        let sigma = sigma();
        let empty = accept("");

        let fullwidth_pairs = crate::data::as_pairs(&tables.fullwidth_to_halfwidth);
        let fullwidth_rule = string_map(&fullwidth_pairs);
        let fullwidth_pass = crate::fst::cdrewrite(&fullwidth_rule, &empty, &empty, &sigma);

        let fullwidth_space_rule = cross("\u{3000}", " ");
        let fullwidth_space_pass =
            crate::fst::cdrewrite(&fullwidth_space_rule, &empty, &empty, &sigma);

        let digit = digit_class();
        let digit_flanked_rule = cross(" ", "-");
        let digit_flanked_pass =
            crate::fst::cdrewrite(&digit_flanked_rule, &digit, &digit, &sigma);

        let other_space_rule = cross(" ", SPACE_MARKER);
        let other_space_pass = crate::fst::cdrewrite(&other_space_rule, &empty, &empty, &sigma);

        let fst = compose(
            &compose(
                &compose(&fullwidth_pass, &fullwidth_space_pass)
                    .map_err(|e| WeTextError::BuildError(e.to_string()))?,
                &digit_flanked_pass,
            )
            .map_err(|e| WeTextError::BuildError(e.to_string()))?,
            &other_space_pass,
        )
        .map_err(|e| WeTextError::BuildError(e.to_string()))?;

        Ok(Self { fst })
    }

    pub fn fst(&self) -> &Fst {
        &self.fst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fst::shortest_path_n;

    #[test]
    fn rewrites_fullwidth_digits_to_halfwidth() {
        let tables = Tables::load().unwrap();
        let pre = Preprocessor::build(&tables).unwrap();
        let composed = compose(&accept("\u{FF11}\u{FF12}\u{FF13}"), &pre.fst).unwrap();
        let (_, out, _) = &shortest_path_n(&composed, 1).unwrap()[0];
        assert_eq!(out, "123");
    }

    #[test]
    fn turns_digit_flanked_space_into_hyphen() {
        let tables = Tables::load().unwrap();
        let pre = Preprocessor::build(&tables).unwrap();
        let composed = compose(&accept("138 1234"), &pre.fst).unwrap();
        let (_, out, _) = &shortest_path_n(&composed, 1).unwrap()[0];
        assert_eq!(out, "138-1234");
    }

    #[test]
    fn marks_other_spaces() {
        let tables = Tables::load().unwrap();
        let pre = Preprocessor::build(&tables).unwrap();
        let composed = compose(&accept("hello world"), &pre.fst).unwrap();
        let (_, out, _) = &shortest_path_n(&composed, 1).unwrap()[0];
        assert_eq!(out, format!("hello{SPACE_MARKER}world"));
    }
}
