//! Error types for fetching and persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from fetching one page of the portal listing.
///
/// None of these are fatal: the watcher logs them, skips the page and the
/// next cycle retries naturally.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, timeout, reset connection).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The portal answered with a non-success status.
    #[error("portal returned HTTP {status}")]
    Status { status: u16 },

    /// The body was not the expected list of AJAX commands.
    #[error("unexpected response format: {0}")]
    ResponseFormat(String),

    /// No insert command targeted the listing container.
    #[error("listing fragment not found in response for page {page}")]
    FragmentNotFound { page: u32 },
}

impl FetchError {
    /// Short classification used in logs and cycle summaries.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) | Self::Status { .. } => "network",
            Self::ResponseFormat(_) => "response_format",
            Self::FragmentNotFound { .. } => "fragment_not_found",
        }
    }
}

/// Errors from writing the seen-set state file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write state file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize seen set: {0}")]
    Serialization(#[from] serde_json::Error),
}
