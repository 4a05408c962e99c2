//! L3: `VERBALIZE`, the union of every class's verbalizer, wrapped to
//! strip the `"tokens { "` / `" }"` envelope `classify` added and closed
//! over runs of tokens and the bare spaces between them.

use crate::fst::{accept, closure_n, delete, union_all, Fst};
use crate::graphs::ClassGrammar;

/// `VERBALIZE`: each class's `verbalizer` already strips its own
/// `"<class> { ... }"` envelope down to spoken text (see
/// `graphs::word::identity_field_verbalizer_over` and friends); this
/// layer only has to peel the outer `tokens { ... }` wrapper `classify`
/// added and let an unbroken run of tokens/spaces repeat.
pub fn build(grammars: &[ClassGrammar]) -> Fst {
    let class_branches = grammars.iter().map(|g| g.verbalizer.clone());
    let any_class = union_all(class_branches);

    let token = {
        use crate::fst::concat2;
        concat2(&concat2(&delete("tokens { "), &any_class), &delete(" }"))
    };
    let space = accept(" ");
    closure_n(&union_all([token, space]), 1, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify;
    use crate::config::{Language, NormalizerConfig};
    use crate::data::Tables;
    use crate::fst::compose;

    #[test]
    fn verbalize_strips_token_envelope() {
        let tables = Tables::load().unwrap();
        let config = NormalizerConfig::new();
        let grammars = classify::build_grammars(Language::Zh, &tables, &config).unwrap();
        let verbalize = build(&grammars);
        let tagged = r#"tokens { cardinal { integer: "一百" } }"#;
        assert!(compose(&accept(tagged), &verbalize).is_ok());
    }
}
