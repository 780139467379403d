//! Error types for tubegrab

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tubegrab operations
#[derive(Debug, Error)]
pub enum TubeError {
    #[error("The URL is invalid: {0}")]
    InvalidUrl(String),

    #[error("The file type is not supported: {0}")]
    UnsupportedListFile(String),

    #[error("The path does not exist: {}", .0.display())]
    MissingDestination(PathBuf),

    #[error("Program terminated.")]
    Cancelled,

    #[error("Video unavailable")]
    VideoUnavailable,

    #[error("Private video")]
    Private,

    #[error("Age restricted")]
    AgeRestricted,

    #[error("Rate limited")]
    RateLimited,

    #[error("API key not found")]
    ApiKeyNotFound,

    #[error("No suitable stream found")]
    NoStreamFound,

    #[error("Page element not found: {0}")]
    MissingPageNode(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Transfer failed: {0}")]
    TransferFailed(String),
}

impl TubeError {
    /// Check if error is retryable: timeouts, connection failures, 5xx
    /// answers and rate limiting
    pub fn is_retryable(&self) -> bool {
        match self {
            TubeError::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|status| status.is_server_error())
            }
            TubeError::RateLimited => true,
            _ => false,
        }
    }

    /// Check if error came from validating user input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TubeError::InvalidUrl(_)
                | TubeError::UnsupportedListFile(_)
                | TubeError::MissingDestination(_)
        )
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TubeError::Cancelled => 130,
            _ => 1,
        }
    }
}
