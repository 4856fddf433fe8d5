//! Backend API payloads and the error taxonomy shared by every operation.

pub mod auth;
pub mod chat;
mod error;
pub mod user;

pub use auth::{AuthResult, AuthUser, Credentials};
pub use chat::{ChatRequest, ChatResponse};
pub use error::{ApiError, ApiResult, AUTH_REQUIRED_MESSAGE, RATE_LIMIT_MESSAGE};
pub use user::{ActivityEvent, Profile, ProfileUpdate};
