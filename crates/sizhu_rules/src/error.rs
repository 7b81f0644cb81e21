//! Error types for rule catalogs.

use thiserror::Error;

/// Errors from loading or selecting rule catalogs.
///
/// Evaluation itself never fails; malformed rules are skipped.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RuleError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Catalog text is not a JSON object with a `definitions` array.
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// No catalog registered under this name.
    #[error("unknown rule catalog: {0}")]
    UnknownCatalog(String),
    /// A rule's anchor is unusable.
    #[error("malformed rule: {0}")]
    Malformed(String),
}
