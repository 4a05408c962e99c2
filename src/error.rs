//! Error types for the normalization crate.

use thiserror::Error;

/// Errors raised by the FST kernel (L1).
///
/// These only ever surface during grammar construction: the runtime
/// `normalize` path never raises (see [`WeTextError`] docs).
#[derive(Error, Debug, Clone)]
pub enum KernelError {
    /// `compose(a, b)` where `a`'s output alphabet and `b`'s input alphabet
    /// disagree.
    #[error("compose incompatible: {0}")]
    ComposeIncompatible(String),

    /// `difference(a, b)` or `cdrewrite` requested determinization of a
    /// machine that is not determinizable.
    #[error("not determinizable: {0}")]
    NotDeterminizable(String),

    /// `shortest_path` found no accepting path.
    #[error("empty language: {0}")]
    EmptyLanguage(String),
}

/// Top-level error type.
///
/// Per the error-handling policy: constructors are the only layer that may
/// fail loudly (`BuildError`, `Kernel`, `Io`). `CacheError` is recovered
/// internally by rebuilding from scratch; it is kept as a variant so the
/// recovery path can be logged and tested, not so callers must handle it.
/// The runtime `Normalizer::normalize` call never returns `Err`: ambiguous
/// or unrecognized input degrades through the `word` fallback class.
#[derive(Error, Debug, Clone)]
pub enum WeTextError {
    /// Malformed TSV, symbol-table mismatch, or non-determinizable
    /// `difference` encountered while building a class grammar.
    #[error("build error: {0}")]
    BuildError(String),

    /// Cache file present but unreadable. Recovered by rebuilding and
    /// overwriting; surfaced here only so the recovery is observable in
    /// tests and logs.
    #[error("cache error: {0}")]
    CacheError(String),

    /// FST kernel failure during construction.
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// I/O failure touching the cache file or a whitelist TSV.
    #[error("io error: {0}")]
    Io(String),

    /// Requested language/operator combination has no grammar.
    #[error("invalid language: {0}")]
    InvalidLanguage(String),
}

impl From<std::io::Error> for WeTextError {
    fn from(e: std::io::Error) -> Self {
        WeTextError::Io(e.to_string())
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WeTextError>;
