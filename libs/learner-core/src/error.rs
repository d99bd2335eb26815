//! Error types for learner-core.

use thiserror::Error;

/// Result type alias using LearnerError.
pub type Result<T> = std::result::Result<T, LearnerError>;

/// Errors raised by the drilling engine.
#[derive(Debug, Error)]
pub enum LearnerError {
    /// Free-text matching answer did not follow `idx term, idx term, ...`.
    #[error("format error: {reason} in {input:?}")]
    Format { input: String, reason: String },

    /// The set cannot supply what an exercise asks for.
    #[error("{exercise} needs {needed} distinct terms but the set has {available}")]
    NotEnoughTerms {
        exercise: &'static str,
        needed: usize,
        available: usize,
    },

    /// Invalid session or exercise configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The answer source has no more input.
    #[error("input closed")]
    InputClosed,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LearnerError {
    pub(crate) fn format(input: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
