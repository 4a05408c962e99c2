//! Clock times (spec §4.5), grounded on the NeMo `ja`/`zh` time taggers:
//! hour/minute/second each read from their own table (not the general
//! cardinal reading, since e.g. minute "05" reads as "五分" not "零五
//! 分"), an optional day-division prefix (上午/下午/晚上...), and both the
//! kanji (zh `3点30分`, ja `3時30分`) and colon (`15:30:00`) surface forms.
//!
//! A literal `00` minute is elided entirely rather than read as "零分":
//! `3時00分` tags as just hour, matching the teacher's minute-omission
//! convention elsewhere for a zero-valued optional field.

use crate::config::Language;
use crate::data::Tables;
use crate::fst::{accept, closure_n, compose, concat2, cross, delete, insert, string_map, union_all, Fst};
use crate::graphs::{field, wrap_class, ClassGrammar};

fn division(tables: &Tables) -> Fst {
    string_map(&crate::data::as_pairs(&tables.division))
}

fn hour(tables: &Tables) -> Fst {
    string_map(&crate::data::as_pairs(&tables.hour))
}

fn minute(tables: &Tables) -> Fst {
    string_map(&crate::data::as_pairs(&tables.minute))
}

fn second(tables: &Tables) -> Fst {
    string_map(&crate::data::as_pairs(&tables.second))
}

pub struct Time {
    pub grammar: ClassGrammar,
}

impl Time {
    pub fn build(lang: Language, tables: &Tables) -> Self {
        let (hour_suffix, minute_suffix, second_suffix) = match lang {
            Language::Zh => ("点", "分", "秒"),
            Language::Ja => ("時", "分", "秒"),
        };

        let division_field = closure_n(&concat2(&field("division", &division(tables)), &insert(" ")), 0, Some(1));
        let hour_field = field("hour", &hour(tables));
        let minute_field = field("minute", &minute(tables));
        let second_field = field("second", &second(tables));

        // Kanji form: [division] hour <hour_suffix> [minute <minute_suffix>
        // [second <second_suffix>]]. Fields are separated by a single space
        // on the output side, the same convention `join_fields` uses
        // elsewhere, so the verbalizer can consume a fixed separator
        // regardless of which surface form produced the tagged string.
        //
        // A literal `00` minute is deleted outright instead of routed
        // through `minute_field`, so the tagged form carries no minute
        // field at all and the verbalizer has nothing to re-insert.
        let zero_minute_kanji = concat2(&delete("00"), &delete(minute_suffix));
        let nonzero_minute_kanji = concat2(&insert(" "), &concat2(&minute_field.clone(), &delete(minute_suffix)));
        let optional_minute_kanji =
            closure_n(&union_all([nonzero_minute_kanji, zero_minute_kanji]), 0, Some(1));
        let optional_second_kanji = closure_n(
            &concat2(&insert(" "), &concat2(&second_field.clone(), &delete(second_suffix))),
            0,
            Some(1),
        );
        let kanji_form = concat2(
            &concat2(&division_field.clone(), &concat2(&hour_field.clone(), &delete(hour_suffix))),
            &concat2(&optional_minute_kanji, &optional_second_kanji),
        );

        // Colon form: [division] HH:MM[:SS]
        let colon_sep = concat2(&cross(":", ""), &insert(" "));
        let optional_second_colon =
            closure_n(&concat2(&colon_sep.clone(), &second_field), 0, Some(1));
        let colon_form = concat2(
            &concat2(&division_field, &hour_field),
            &concat2(&concat2(&colon_sep, &minute_field), &optional_second_colon),
        );

        let body = union_all([kanji_form, colon_form]);
        let tagger = wrap_class("time", body);

        let content = union_all([
            string_map(&crate::data::as_pairs(&tables.division)),
            hour(tables),
            minute(tables),
            second(tables),
        ]);
        let verbalizer = time_verbalizer(&content, hour_suffix, minute_suffix, second_suffix);

        Self {
            grammar: ClassGrammar {
                name: "time",
                tagger,
                verbalizer,
            },
        }
    }
}

/// Mirrors the tagger's field order and spacing directly: the suffix
/// glyphs were deleted from the surface text at tag time (both the kanji
/// and colon forms converge on the same tagged fields), so they have to be
/// re-inserted here rather than silently dropped. A zero-elided minute
/// never produces a `minute` field in the first place, so nothing special
/// is needed here to skip it — `optional_minute`'s ordinary absence case
/// already covers it.
fn time_verbalizer(content: &Fst, hour_suffix: &str, minute_suffix: &str, second_suffix: &str) -> Fst {
    let value = closure_n(content, 0, None);
    let req = |name: &str| concat2(&concat2(&delete(&format!("{name}: \"")), &value.clone()), &delete("\""));

    let division = closure_n(&concat2(&req("division"), &accept(" ")), 0, Some(1));
    let hour = concat2(&req("hour"), &insert(hour_suffix));
    let optional_minute = closure_n(
        &concat2(&accept(" "), &concat2(&req("minute"), &insert(minute_suffix))),
        0,
        Some(1),
    );
    let optional_second = closure_n(
        &concat2(&accept(" "), &concat2(&req("second"), &insert(second_suffix))),
        0,
        Some(1),
    );

    let body = concat2(&division, &concat2(&hour, &concat2(&optional_minute, &optional_second)));
    concat2(&concat2(&delete("time { "), &body), &delete(" }"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fst::{accept, shortest_path_n};

    #[test]
    fn tags_kanji_time() {
        let tables = Tables::load().unwrap();
        let t = Time::build(Language::Zh, &tables);
        let composed = compose(&accept("下午3点30分"), &t.grammar.tagger).unwrap();
        assert!(shortest_path_n(&composed, 1).is_ok());
    }

    #[test]
    fn tags_colon_time() {
        let tables = Tables::load().unwrap();
        let t = Time::build(Language::Zh, &tables);
        let composed = compose(&accept("15:30:00"), &t.grammar.tagger).unwrap();
        assert!(shortest_path_n(&composed, 1).is_ok());
    }

    #[test]
    fn tags_ja_kanji_time_with_minutes() {
        let tables = Tables::load().unwrap();
        let t = Time::build(Language::Ja, &tables);
        let composed = compose(&accept("3時07分"), &t.grammar.tagger).unwrap();
        let (_, out, _) = shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, r#"time { hour: "三" minute: "七" }"#);
    }

    #[test]
    fn elides_zero_minute() {
        let tables = Tables::load().unwrap();
        let t = Time::build(Language::Ja, &tables);
        let composed = compose(&accept("3時00分"), &t.grammar.tagger).unwrap();
        let (_, out, _) = shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, r#"time { hour: "三" }"#);
    }

    #[test]
    fn verbalizer_restores_connective_morphemes() {
        let tables = Tables::load().unwrap();
        let t = Time::build(Language::Zh, &tables);
        let tagged = r#"time { hour: "三" minute: "三十" }"#;
        let composed = compose(&accept(tagged), &t.grammar.verbalizer).unwrap();
        let (_, out, _) = crate::fst::shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, "三点三十分");
    }

    #[test]
    fn verbalizer_uses_ja_hour_suffix() {
        let tables = Tables::load().unwrap();
        let t = Time::build(Language::Ja, &tables);
        let tagged = r#"time { hour: "三" minute: "七" }"#;
        let composed = compose(&accept(tagged), &t.grammar.verbalizer).unwrap();
        let (_, out, _) = crate::fst::shortest_path_n(&composed, 1).unwrap().into_iter().next().unwrap();
        assert_eq!(out, "三時七分");
    }
}
