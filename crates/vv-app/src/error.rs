use thiserror::Error;
use vv_core::api::ApiError;
use vv_core::permission::PermissionError;

use crate::session::SessionError;

/// Failure of a use case. Each variant carries its layer's taxonomy unchanged
/// so the caller can render `ApiError::Server` messages verbatim.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Permission(#[from] PermissionError),
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}
