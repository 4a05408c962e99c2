//! Parses the tagged `tokens { class { field: "value" ... } }` string
//! `classify` produces and re-serializes it with a single canonical
//! space between fields (spec §6, "Whitespace outside quotes is a
//! single space").
//!
//! The teacher's `TokenParser` carries a per-class field-reorder table
//! because its tagger FSTs can emit fields in a different order than
//! their class's fixed spoken order requires. This crate's class
//! grammars (`src/graphs/*.rs`) never do that: every field is built
//! with `graphs::field`/`graphs::join_fields` directly in its final
//! spoken order inside the tagger itself (`money`'s prefix/suffix
//! currency placement, `fraction`'s denominator-before-numerator
//! reading, `date`'s era/year/month/day — all rendered correctly at tag
//! time). A fixed reorder table would be actively wrong here: `money`'s
//! prefix and suffix forms are both already-correct but use different
//! field orders, and no single canonical order fits both. So parsing
//! always preserves the order fields were found in; this module keeps
//! the teacher's parse/re-serialize shape without the reorder step it
//! has no use for.

use std::collections::HashMap;

use crate::config::Language;

/// A single tagged entity, as found in the token stream.
#[derive(Debug, Clone)]
pub struct Token {
    pub name: String,
    pub order: Vec<String>,
    pub members: HashMap<String, String>,
}

impl Token {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            order: Vec::new(),
            members: HashMap::new(),
        }
    }

    fn append(&mut self, key: &str, value: &str) {
        self.order.push(key.to_string());
        self.members.insert(key.to_string(), value.to_string());
    }

    fn to_canonical_string(&self) -> String {
        let mut output = format!("{} {{", self.name);
        for key in &self.order {
            if let Some(value) = self.members.get(key) {
                output.push_str(&format!(" {key}: \"{value}\""));
            }
        }
        output.push_str(" }");
        output
    }
}

/// Re-serializes a tagged string with canonical single-space
/// formatting. `lang` is accepted for symmetry with the rest of the
/// pipeline (zh and ja share this parser) though the parse itself is
/// language-independent.
pub struct TokenParser {
    _lang: Language,
}

impl TokenParser {
    pub fn new(lang: Language) -> Self {
        Self { _lang: lang }
    }

    /// Re-serialize `input`'s tokens with canonical spacing. Falls back
    /// to the original string on anything that doesn't parse as the
    /// `tokens { ... }` grammar — this never raises, matching the
    /// runtime's "must never fail" policy.
    pub fn reorder(&self, input: &str) -> String {
        if input.trim().is_empty() {
            return String::new();
        }
        if !input.contains('{') {
            return input.to_string();
        }
        match Self::parse(input) {
            Ok(tokens) => tokens
                .iter()
                .map(Token::to_canonical_string)
                .collect::<Vec<_>>()
                .join(" "),
            Err(_) => input.to_string(),
        }
    }

    fn parse(input: &str) -> Result<Vec<Token>, String> {
        let mut tokens = Vec::new();
        let chars: Vec<char> = input.chars().collect();
        let mut index = 0;

        while index < chars.len() {
            while index < chars.len() && chars[index].is_whitespace() {
                index += 1;
            }
            if index >= chars.len() {
                break;
            }

            let name_start = index;
            while index < chars.len() && (chars[index].is_ascii_alphabetic() || chars[index] == '_') {
                index += 1;
            }
            let name: String = chars[name_start..index].iter().collect();
            if name.is_empty() {
                return Err(format!("unexpected character at position {index}"));
            }

            while index < chars.len() && (chars[index].is_whitespace() || chars[index] == '{') {
                index += 1;
            }

            let mut token = Token::new(&name);
            loop {
                while index < chars.len() && chars[index].is_whitespace() {
                    index += 1;
                }
                if index >= chars.len() || chars[index] == '}' {
                    if index < chars.len() {
                        index += 1;
                    }
                    break;
                }

                let key_start = index;
                while index < chars.len()
                    && (chars[index].is_ascii_alphabetic() || chars[index] == '_')
                {
                    index += 1;
                }
                let key: String = chars[key_start..index].iter().collect();
                if key.is_empty() {
                    if index < chars.len() && chars[index] != '}' {
                        index += 1;
                    }
                    continue;
                }

                while index < chars.len() && (chars[index] == ':' || chars[index] == ' ') {
                    index += 1;
                }
                if index < chars.len() && chars[index] == '"' {
                    index += 1;
                }

                let mut value = String::new();
                let mut escape = false;
                while index < chars.len() && (escape || chars[index] != '"') {
                    if escape {
                        value.push(chars[index]);
                        escape = false;
                    } else if chars[index] == '\\' {
                        escape = true;
                    } else {
                        value.push(chars[index]);
                    }
                    index += 1;
                }
                if index < chars.len() && chars[index] == '"' {
                    index += 1;
                }

                token.append(&key, &value);
            }

            tokens.push(token);
        }

        Ok(tokens)
    }
}
