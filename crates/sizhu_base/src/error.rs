//! Error types for symbol parsing and pillar construction.

use thiserror::Error;

/// Errors from the base symbol layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BaseError {
    /// Text did not name a known stem.
    #[error("unknown stem: {0}")]
    UnknownStem(String),
    /// Text did not name a known branch.
    #[error("unknown branch: {0}")]
    UnknownBranch(String),
    /// Text did not name a known element.
    #[error("unknown element: {0}")]
    UnknownElement(String),
    /// Text did not name a stem/branch pair.
    #[error("unknown pillar: {0}")]
    UnknownPillar(String),
    /// Stem and branch polarity differ, so the pair is outside the 60-cycle.
    #[error("illegal pillar: {stem} does not pair with {branch}")]
    IllegalPillar { stem: &'static str, branch: &'static str },
}
