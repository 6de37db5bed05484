use thiserror::Error;

/// Result type alias for API client construction and configuration.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors raised while building or configuring the backend client.
///
/// Request-level failures never surface through this type; they are folded
/// into the per-operation outcome enums in [`crate::types`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
