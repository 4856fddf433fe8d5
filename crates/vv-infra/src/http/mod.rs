//! reqwest-backed implementation of the backend ports.
//!
//! One [`HttpBackendClient`] implements every per-area port. Request
//! plumbing lives in `client`, status classification and body decoding in
//! `response`, and each endpoint group in its own module.

mod auth;
mod base_url;
mod calendar;
mod chat;
mod client;
mod oauth;
mod places;
mod recommendations;
mod response;
mod user;
mod weather;

pub use base_url::{resolve_base_url, resolve_base_url_from_env, API_URL_ENV};
pub use chat::CLEAR_SESSION_HEADER;
pub use client::HttpBackendClient;
pub use oauth::{
    calendar_oauth_start_url, parse_calendar_oauth_callback, CalendarOAuthOutcome,
    OAuthCallbackError, OAUTH_CALLBACK_HOST, OAUTH_CALLBACK_SCHEME,
};
pub use response::{classify_failure, decode_body, decode_chat_body};
