//! L1: generic weighted finite-state transducer primitives.
//!
//! Every class grammar in `crate::graphs` is built exclusively from the
//! operations exported here. Labels are Unicode scalar values (one arc per
//! `char`), not UTF-8 bytes: composing CJK text byte-wise would needlessly
//! triple state counts for no benefit once grammars are built in-process
//! rather than loaded from someone else's compiled `.fst` file.

pub mod kernel;

pub use kernel::{
    accept, add_weight, cdrewrite, char_class, char_range, closure_n, compose, concat2, cross,
    delete, difference, insert, optimize, shortest_path_n, string_map, union_all, Fst,
};
