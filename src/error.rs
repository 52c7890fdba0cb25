//! Error types for SnapFind
//!
//! All backend failures funnel into one enum; the GUI collapses them into a
//! single user-facing message while the CLI reports the real cause.

use thiserror::Error;

/// Main error type for SnapFind operations
#[derive(Error, Debug)]
pub enum SnapFindError {
    #[error("Invalid API base URL '{0}': {1}")]
    InvalidBaseUrl(String, String),

    #[error("Request to search backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Search backend returned HTTP {0}")]
    Status(u16),

    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("GUI error: {0}")]
    Gui(String),
}

/// Result type alias for SnapFind operations
pub type Result<T> = std::result::Result<T, SnapFindError>;

impl SnapFindError {
    /// Whether the failure came from the client-side timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, SnapFindError::Transport(e) if e.is_timeout())
    }
}
