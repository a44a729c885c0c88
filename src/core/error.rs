use thiserror::Error;

/// Centralized error types for the application
///
/// Every failure is converted to this enum so callers can react to the
/// failure class (retry network errors, never retry rate limits) without
/// inspecting message text. Uses `thiserror` for display formatting.
///
/// Display is the bare message; the CLI layer adds its own class prefix
/// when reporting, and the retry layer embeds the message when composing
/// exhaustion errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input rejected before any network traffic (bad URL, unsafe content)
    #[error("{0}")]
    Validation(String),

    /// Transport failures and unexpected HTTP statuses; retryable
    #[error("{0}")]
    Network(String),

    /// HTTP 429 from Instagram; never retried, caller must back off
    #[error("{0}")]
    RateLimit(String),

    /// Extraction or file-writing failures; terminal
    #[error("{0}")]
    Download(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Download(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Download(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Download(err.to_string())
    }
}
