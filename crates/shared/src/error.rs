use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A route parameter could not be interpreted.
    Parse,
    Network,
    /// The backend answered with a non-2xx status.
    Server,
    /// The backend answered 2xx but the body did not match the envelope.
    Envelope,
    Validation,
    /// The query never produced an answer, e.g. its task panicked.
    Internal,
}

/// A `page` block that decoded but cannot describe a valid page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageMetadataError {
    #[error("page size must be positive")]
    ZeroSize,
    #[error("page index {0} has no one-based page number")]
    NumberOutOfRange(u32),
}

/// A failure as handed to the presentation layer, detached from the error
/// that produced it so it can be cloned and broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{kind:?}: {message}")]
pub struct ReportedFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ReportedFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
