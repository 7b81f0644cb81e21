//! Error types for chart assembly.

use thiserror::Error;

/// Errors returned by [`ChartService`](crate::ChartService).
///
/// Only `InvalidInput` is produced while computing a chart; the remaining
/// variants come from building the service.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// A birth field is missing or malformed.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl ChartError {
    pub(crate) fn input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors from a [`ChartRepository`](crate::ChartRepository).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
