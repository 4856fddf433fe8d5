use thiserror::Error;

/// Message surfaced for HTTP 429 responses.
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again in a moment.";

/// Message surfaced for HTTP 401 responses and for authenticated calls made
/// without a session token.
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required. Please log in again.";

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure kinds returned by every backend operation.
///
/// `Server` messages are human-readable and may be shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Malformed URL or parameters. Indicates a programming error.
    #[error("Invalid URL: {0}")]
    InvalidRequest(String),

    /// Transport failure or a status code that could not be classified.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// The payload did not match the expected shape.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// An explicit error reported by the backend.
    #[error("Server error: {0}")]
    Server(String),
}

impl ApiError {
    pub fn rate_limited() -> Self {
        Self::Server(RATE_LIMIT_MESSAGE.to_string())
    }

    pub fn auth_required() -> Self {
        Self::Server(AUTH_REQUIRED_MESSAGE.to_string())
    }

    /// True when the caller should send the user back to login.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::Server(msg) if msg == AUTH_REQUIRED_MESSAGE)
    }

    /// Text suitable for direct display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
