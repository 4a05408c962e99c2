//! Configuration types for the normalizer handle.

use std::path::PathBuf;

/// Supported languages. Unlike the teacher crate this library normalizes,
/// there is no `Auto` or `En` variant: the spec's external interface takes
/// an explicit `lang` and scope is zh/ja only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// Mandarin Chinese.
    Zh,
    /// Japanese.
    Ja,
}

/// Whether the tagger should treat the input as already-cased or lower it
/// first. Meaningful mainly for whitelist/word matching; numeral classes
/// are case-insensitive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputCase {
    /// Preserve input casing (default).
    #[default]
    Cased,
    /// Lower-case ASCII letters before classification.
    LowerCased,
}

/// Configuration for a [`crate::Normalizer`] handle.
///
/// Mirrors the programmatic surface described in the spec's external
/// interfaces section: `lang`, `input_case`, `deterministic`, `cache_dir`,
/// `overwrite_cache`, `whitelist_path`.
#[derive(Debug, Clone)]
pub struct NormalizerConfig {
    /// Language selector: `zh` or `ja`.
    pub lang: Language,

    /// Input case handling.
    pub input_case: InputCase,

    /// Whether `shortest_path` must return a unique, deterministic result
    /// (ties broken by a fixed path-enumeration order) rather than an
    /// arbitrary minimum-weight path.
    pub deterministic: bool,

    /// Optional directory for a compiled classify/verbalize cache.
    pub cache_dir: Option<PathBuf>,

    /// Force rebuild and overwrite of the cache even if present.
    pub overwrite_cache: bool,

    /// Optional TSV path for the whitelist class grammar.
    pub whitelist_path: Option<PathBuf>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            lang: Language::Zh,
            input_case: InputCase::Cased,
            deterministic: true,
            cache_dir: None,
            overwrite_cache: false,
            whitelist_path: None,
        }
    }
}

impl NormalizerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language.
    pub fn with_lang(mut self, lang: Language) -> Self {
        self.lang = lang;
        self
    }

    /// Set the input case policy.
    pub fn with_input_case(mut self, input_case: InputCase) -> Self {
        self.input_case = input_case;
        self
    }

    /// Set the determinism flag.
    pub fn with_deterministic(mut self, deterministic: bool) -> Self {
        self.deterministic = deterministic;
        self
    }

    /// Set the on-disk cache directory.
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    /// Force the cache to be rebuilt.
    pub fn with_overwrite_cache(mut self, overwrite: bool) -> Self {
        self.overwrite_cache = overwrite;
        self
    }

    /// Set a whitelist TSV path.
    pub fn with_whitelist_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.whitelist_path = Some(path.into());
        self
    }
}
