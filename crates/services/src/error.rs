//! Shared error types for the services crate.

use thiserror::Error;

use satprep_core::model::{FailureKind, QuestionError};

/// Errors emitted by a `QuestionSource`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("question source is not configured")]
    Disabled,
    #[error("question source request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("question source returned an empty response")]
    EmptyResponse,
    #[error("question source returned unparseable content: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("question source returned an invalid question: {0}")]
    Invalid(#[from] QuestionError),
}

impl SourceError {
    /// How the session should record this failure.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Disabled | Self::HttpStatus(_) | Self::Http(_) => FailureKind::SourceUnavailable,
            Self::EmptyResponse | Self::Malformed(_) | Self::Invalid(_) => {
                FailureKind::MalformedResponse
            }
        }
    }
}
