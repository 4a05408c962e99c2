//! Ordinal numbers (spec §4.10): `第N` reads as `第` + the cardinal
//! reading of `N`, the ordinal marker itself carried straight through.

use crate::data::Tables;
use crate::fst::{accept, closure_n, compose, concat2, union_all, Fst};
use crate::graphs::cardinal::Cardinal;
use crate::graphs::{field, wrap_class, ClassGrammar};

pub struct Ordinal {
    pub grammar: ClassGrammar,
}

impl Ordinal {
    pub fn build(_tables: &Tables, cardinal: &Cardinal) -> Self {
        let digit = union_all((0..10).map(|d| accept(&d.to_string())));
        let digits = closure_n(&digit, 1, None);
        let spoken =
            compose(&digits, &cardinal.just_cardinals).unwrap_or_else(|_| cardinal.just_cardinals.clone());

        // `第` is carried through inside the field's own value rather than
        // deleted at tag time: an `identity_field_verbalizer` only knows how
        // to strip the field envelope, so anything meant to survive into
        // the spoken form has to live inside the quoted value itself.
        let value = concat2(&accept("第"), &spoken);
        let body = field("integer", &value);
        let tagger = wrap_class("ordinal", body);
        let verbalizer = crate::graphs::word::identity_field_verbalizer("ordinal", "integer");

        Self {
            grammar: ClassGrammar {
                name: "ordinal",
                tagger,
                verbalizer,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Language;

    #[test]
    fn tags_ordinal() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let o = Ordinal::build(&tables, &cardinal);
        assert!(compose(&accept("第3"), &o.grammar.tagger).is_ok());
    }

    #[test]
    fn round_trips_with_marker_preserved() {
        let tables = Tables::load().unwrap();
        let cardinal = Cardinal::build(Language::Zh, &tables).unwrap();
        let o = Ordinal::build(&tables, &cardinal);
        let tagged = compose(&accept("第3"), &o.grammar.tagger).unwrap();
        let (_, tag_out, _) = crate::fst::shortest_path_n(&tagged, 1).unwrap().into_iter().next().unwrap();
        let composed = compose(&accept(&tag_out), &o.grammar.verbalizer).unwrap();
        let (_, out, _) = crate::fst::shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, "第三");
    }
}
