//! The `Normalizer` handle and driver (spec §3, §6, §7): builds
//! `CLASSIFY`/`VERBALIZE` once per `(lang, deterministic, whitelist)`
//! configuration, then runs the classify → reorder → verbalize →
//! postprocess pipeline per call. Immutable after construction and
//! `Sync` (spec §5): `normalize` takes `&self`, never `&mut self`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use rustfst::fst_traits::SerializableFst;

use crate::classify;
use crate::config::{Language, NormalizerConfig};
use crate::data::Tables;
use crate::error::{Result, WeTextError};
use crate::fst::{accept, compose, shortest_path_n, Fst};
use crate::postprocess;
use crate::preprocessor::Preprocessor;
use crate::token_parser::TokenParser;
use crate::verbalize;

/// Compiled classify/verbalize pair, shared read-only across threads via
/// `Arc` once built.
struct Compiled {
    preprocessor: Fst,
    classify: Fst,
    verbalize: Fst,
}

/// Process-wide registry of already-compiled grammars, keyed on the
/// `(lang, deterministic, whitelist)` tuple that determines their shape.
/// `Normalizer::new` is otherwise the most expensive call in the crate —
/// every class grammar gets rebuilt from its TSV tables from scratch — so
/// repeated construction for the same configuration within one process
/// (the common case for a long-running TTS front-end) reuses the same
/// compiled FSTs instead of redoing that work.
static GRAMMAR_REGISTRY: Lazy<Mutex<HashMap<String, Arc<Compiled>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn registry_key(config: &NormalizerConfig) -> String {
    let lang = match config.lang {
        Language::Zh => "zh",
        Language::Ja => "ja",
    };
    let whitelist = config
        .whitelist_path
        .as_ref()
        .and_then(|p| p.to_str())
        .unwrap_or("default");
    format!("{lang}_{}_{whitelist}", config.deterministic)
}

pub struct Normalizer {
    config: NormalizerConfig,
    compiled: Arc<Compiled>,
}

impl Normalizer {
    /// Build a normalizer for `config.lang`. Fails loudly on malformed
    /// data tables or a non-determinizable grammar (§7's `BuildError`) —
    /// this is the only layer allowed to return `Err`.
    pub fn new(config: NormalizerConfig) -> Result<Self> {
        let key = registry_key(&config);
        if !config.overwrite_cache {
            if let Some(compiled) = GRAMMAR_REGISTRY.lock().unwrap().get(&key).cloned() {
                log::debug!("normalizer: reusing in-process compiled grammars for '{key}'");
                return Ok(Self { config, compiled });
            }
        }

        let tables = Tables::load()?;

        let cache_path = cache_paths(&config);
        if !config.overwrite_cache {
            if let Some(compiled) = try_load_cache(&cache_path) {
                log::debug!("normalizer: loaded compiled grammars from cache");
                let compiled = Arc::new(compiled);
                GRAMMAR_REGISTRY.lock().unwrap().insert(key, compiled.clone());
                return Ok(Self { config, compiled });
            }
        }

        let preprocessor = Preprocessor::build(&tables)?.fst().clone();
        let grammars = classify::build_grammars(config.lang, &tables, &config)?;
        let classify_fst = classify::build(&grammars);
        let verbalize_fst = verbalize::build(&grammars);

        let compiled = Compiled {
            preprocessor,
            classify: classify_fst,
            verbalize: verbalize_fst,
        };

        if let Some((classify_path, verbalize_path, preprocessor_path)) = &cache_path {
            if let Err(e) = save_cache(&compiled, classify_path, verbalize_path, preprocessor_path) {
                log::warn!("normalizer: failed to write grammar cache: {e}");
            }
        }

        let compiled = Arc::new(compiled);
        GRAMMAR_REGISTRY.lock().unwrap().insert(key, compiled.clone());

        Ok(Self { config, compiled })
    }

    pub fn with_defaults(lang: Language) -> Result<Self> {
        Self::new(NormalizerConfig::new().with_lang(lang))
    }

    /// Run the full pipeline (spec §4.13). Never returns `Err`: an empty
    /// shortest-path at any stage falls through to the original input,
    /// matching the "runtime normalize path must never raise" policy.
    pub fn normalize(&self, text: &str, verbose: bool, punct_post_process: bool) -> String {
        let input = match self.config.input_case {
            crate::config::InputCase::Cased => text.to_string(),
            crate::config::InputCase::LowerCased => text.to_ascii_lowercase(),
        };

        let preprocessed = match self.run_stage(&input, &self.compiled.preprocessor) {
            Some(s) => s,
            None => {
                log::debug!("normalizer: preprocessor found no accepting path, using raw input");
                input.clone()
            }
        };

        let tagged = match self.run_stage(&preprocessed, &self.compiled.classify) {
            Some(s) => s,
            None => {
                log::debug!("normalizer: classify found no accepting path, falling through");
                return postprocess::run(&input, punct_post_process);
            }
        };

        let reordered = TokenParser::new(self.config.lang).reorder(&tagged);
        if verbose {
            log::debug!("normalizer: tagged form: {reordered}");
        }

        let spoken = match self.run_stage(&reordered, &self.compiled.verbalize) {
            Some(s) => s,
            None => {
                log::debug!("normalizer: verbalize found no accepting path, falling through");
                return postprocess::run(&input, punct_post_process);
            }
        };

        postprocess::run(&spoken, punct_post_process)
    }

    fn run_stage(&self, text: &str, stage: &Fst) -> Option<String> {
        let composed = compose(&accept(text), stage).ok()?;
        let (_, output, _) = shortest_path_n(&composed, 1).ok()?.into_iter().next()?;
        Some(output)
    }
}

fn cache_paths(config: &NormalizerConfig) -> Option<(PathBuf, PathBuf, PathBuf)> {
    let dir = config.cache_dir.as_ref()?;
    let lang = match config.lang {
        Language::Zh => "zh",
        Language::Ja => "ja",
    };
    let whitelist_basename = config
        .whitelist_path
        .as_ref()
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("default");
    let stem = format!("{lang}_{}_{whitelist_basename}", config.deterministic);
    Some((
        dir.join(format!("{stem}.classify.fst")),
        dir.join(format!("{stem}.verbalize.fst")),
        dir.join(format!("{stem}.preprocessor.fst")),
    ))
}

fn try_load_cache(paths: &Option<(PathBuf, PathBuf, PathBuf)>) -> Option<Compiled> {
    let (classify_path, verbalize_path, preprocessor_path) = paths.as_ref()?;
    let load = |p: &Path| -> Option<Fst> {
        match Fst::read(p) {
            Ok(fst) => Some(fst),
            Err(e) => {
                log::warn!("normalizer: cache file {p:?} unreadable ({e}), rebuilding");
                None
            }
        }
    };
    Some(Compiled {
        preprocessor: load(preprocessor_path)?,
        classify: load(classify_path)?,
        verbalize: load(verbalize_path)?,
    })
}

fn save_cache(
    compiled: &Compiled,
    classify_path: &Path,
    verbalize_path: &Path,
    preprocessor_path: &Path,
) -> std::io::Result<()> {
    if let Some(parent) = classify_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    compiled
        .classify
        .write(classify_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    compiled
        .verbalize
        .write(verbalize_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    compiled
        .preprocessor
        .write(preprocessor_path)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerConfig;

    #[test]
    fn normalizes_a_simple_cardinal() {
        let normalizer = Normalizer::with_defaults(Language::Zh).unwrap();
        let out = normalizer.normalize("100", false, true);
        assert!(!out.is_empty());
    }

    #[test]
    fn falls_through_on_empty_input() {
        let normalizer = Normalizer::with_defaults(Language::Zh).unwrap();
        assert_eq!(normalizer.normalize("", false, true), "");
    }

    #[test]
    fn cache_round_trip_rebuilds_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = NormalizerConfig::new()
            .with_lang(Language::Zh)
            .with_cache_dir(dir.path());
        let first = Normalizer::new(config.clone()).unwrap();
        assert!(!first.normalize("100", false, true).is_empty());

        let second = Normalizer::new(config).unwrap();
        assert!(!second.normalize("100", false, true).is_empty());
    }

    #[test]
    fn in_process_registry_reuses_compiled_grammars() {
        // A distinctive whitelist_path keys this test's registry entry
        // away from every other test's, so `Arc::ptr_eq` only ever
        // compares against compiled grammars this test itself built.
        let config = NormalizerConfig::new()
            .with_lang(Language::Zh)
            .with_whitelist_path("in_process_registry_reuses_compiled_grammars.tsv");
        let first = Normalizer::new(config.clone()).unwrap();
        let second = Normalizer::new(config).unwrap();
        assert!(Arc::ptr_eq(&first.compiled, &second.compiled));
    }
}
