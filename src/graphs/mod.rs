//! L2: one module per semantic class. Each class exposes a `tagger` FST
//! (surface → tagged form) and a `verbalizer` FST (tagged form → spoken
//! form), built once from the embedded data tables (`crate::data`) and
//! composed together at registry construction time (`crate::classify`,
//! `crate::verbalize`).

pub mod address_number;
pub mod cardinal;
pub mod credit_card;
pub mod date;
pub mod decimal;
pub mod fraction;
pub mod measure;
pub mod money;
pub mod ordinal;
pub mod punctuation;
pub mod serial_number;
pub mod telephone;
pub mod time;
pub mod whitelist;
pub mod word;

use crate::fst::Fst;

/// The tagger/verbalizer pair every class grammar exposes (spec §4.2's
/// "shared contract"). Classes are plain values, not trait objects: the
/// registry in `crate::classify`/`crate::verbalize` just collects structs
/// with these two fields, which replaces source-level subclassing.
pub struct ClassGrammar {
    pub name: &'static str,
    pub tagger: Fst,
    pub verbalizer: Fst,
}

/// Wrap a class body FST as `"<name> { " body " }"`, the per-class
/// envelope the L3 classifier composes into the full `tokens { ... }` form.
pub fn wrap_class(name: &'static str, body: Fst) -> Fst {
    use crate::fst::{concat2, insert};
    concat2(&concat2(&insert(&format!("{name} {{ ")), &body), &insert(" }"))
}

/// A tagged field: `field: "value"` with the value produced by some
/// sub-FST, matching the bit-exact intermediate form in spec §6.
pub fn field(name: &str, value: &Fst) -> Fst {
    use crate::fst::{concat2, insert};
    concat2(&concat2(&insert(&format!("{name}: \"")), value), &insert("\""))
}

/// Concatenate two tagged fields separated by a single space, the fixed
/// field-order convention spec §3/§6 require within a class.
pub fn join_fields(fields: &[Fst]) -> Fst {
    use crate::fst::{concat2, insert};
    let mut iter = fields.iter();
    let mut out = match iter.next() {
        Some(f) => f.clone(),
        None => crate::fst::accept(""),
    };
    for f in iter {
        out = concat2(&concat2(&out, &insert(" ")), f);
    }
    out
}
