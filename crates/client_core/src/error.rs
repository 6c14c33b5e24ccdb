//! Error taxonomy for catalog queries and listing decisions.

use std::num::ParseIntError;

use shared::error::{FailureKind, ReportedFailure};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("route parameter `{param}` is not a valid number: {value:?}")]
    Parse {
        param: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server responded with status {status}: {body}")]
    Server { status: u16, body: String },
    #[error("unexpected response envelope: {0}")]
    Envelope(#[from] serde_json::Error),
    #[error("page size must be positive, got {0}")]
    InvalidPageSize(u32),
    #[error("page number must be at least 1, got {0}")]
    InvalidPageNumber(u32),
    #[error("listing query did not complete: {0}")]
    QueryTask(#[from] tokio::task::JoinError),
    #[error("invalid api base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

pub type StorefrontResult<T> = Result<T, StorefrontError>;

impl StorefrontError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Parse { .. } => FailureKind::Parse,
            Self::Network(_) => FailureKind::Network,
            Self::Server { .. } => FailureKind::Server,
            Self::Envelope(_) => FailureKind::Envelope,
            Self::QueryTask(_) => FailureKind::Internal,
            Self::InvalidPageSize(_) | Self::InvalidPageNumber(_) | Self::InvalidBaseUrl { .. } => {
                FailureKind::Validation
            }
        }
    }

    pub fn report(&self) -> ReportedFailure {
        ReportedFailure::new(self.kind(), self.to_string())
    }
}
