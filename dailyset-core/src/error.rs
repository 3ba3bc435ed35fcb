//! Common error types for the daily set pipeline

use thiserror::Error;

/// Common result type for daily set operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by daily set generation and persistence.
///
/// Per-file parse failures are recovered inside the sampler and never reach
/// this level; a generation attempt only fails as a whole on scan or store
/// errors, leaving the previously persisted set in place.
#[derive(Error, Debug)]
pub enum Error {
    /// Corpus enumeration failed (root missing or unlistable)
    #[error("Scan error: {0}")]
    Scan(#[from] crate::scanner::ScanError),

    /// A source file's content was malformed
    #[error("Parse error: {0}")]
    Parse(#[from] crate::parser::ParseError),

    /// Persisting the daily set or its timestamp failed
    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
