//! # zhja-wfst-normalizer
//!
//! A weighted finite-state transducer (WFST) text normalizer for zh/ja
//! TTS front-ends: numbers, dates, times, telephone numbers, money,
//! measures, fractions, and more, built from composable FST primitives
//! rather than loaded from precompiled grammar files.
//!
//! ## Example
//!
//! ```rust,ignore
//! use zhja_wfst_normalizer::{Normalizer, NormalizerConfig, Language};
//!
//! let config = NormalizerConfig::new().with_lang(Language::Zh);
//! let normalizer = Normalizer::new(config).unwrap();
//! let result = normalizer.normalize("2024年1月15日", false, true);
//! println!("{}", result);
//! ```

mod classify;
mod config;
mod data;
mod error;
mod fst;
mod graphs;
mod normalizer;
mod postprocess;
mod preprocessor;
mod token_parser;
mod verbalize;

pub use config::{InputCase, Language, NormalizerConfig};
pub use error::{KernelError, Result, WeTextError};
pub use normalizer::Normalizer;

/// Convenience function: normalize text with a default configuration for
/// the given language.
///
/// # Example
/// ```rust,ignore
/// let result = zhja_wfst_normalizer::normalize(zhja_wfst_normalizer::Language::Zh, "123").unwrap();
/// assert_eq!(result, "一百二十三");
/// ```
pub fn normalize(lang: Language, text: &str) -> Result<String> {
    let normalizer = Normalizer::with_defaults(lang)?;
    Ok(normalizer.normalize(text, false, true))
}
