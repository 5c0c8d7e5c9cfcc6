//! Error types for fetching monitor snapshots.

use thiserror::Error;

/// Errors that can occur while fetching a snapshot.
///
/// Every variant ends up in the same "data unavailable" panel; the variant
/// only matters for logging and the status bar.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (connect, DNS, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP error: {0}")]
    Status(u16),

    /// The body was not a complete monitor snapshot.
    #[error("invalid snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Short label for the status bar.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Status(_) => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}
