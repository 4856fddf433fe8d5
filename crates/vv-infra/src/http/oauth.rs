//! Google Calendar linking through the backend's OAuth relay.
//!
//! The client opens the start URL in a browser; the backend finishes the
//! exchange with Google and redirects to `violetvibes://calendar-oauth`.

use reqwest::Url;
use thiserror::Error;
use vv_core::api::{ApiError, ApiResult};

use super::HttpBackendClient;

pub const OAUTH_CALLBACK_SCHEME: &str = "violetvibes";
pub const OAUTH_CALLBACK_HOST: &str = "calendar-oauth";

const DEFAULT_FAILURE_MESSAGE: &str = "OAuth failed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarOAuthOutcome {
    /// The backend stored the calendar grant.
    Linked,
    /// The backend reported a failure; the message is displayable.
    Failed(String),
    /// A raw provider redirect that still has to be handed to the backend.
    AuthorizationCode { code: String, state: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OAuthCallbackError {
    #[error("invalid callback url: {0}")]
    InvalidUrl(String),

    #[error("callback url is not a calendar redirect: {0}")]
    UnexpectedTarget(String),
}

/// `GET /api/calendar/oauth/google/start?token=...` on `base_url`.
pub fn calendar_oauth_start_url(base_url: &str, token: &str) -> ApiResult<Url> {
    let raw = format!("{}/api/calendar/oauth/google/start", base_url.trim_end_matches('/'));
    let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidRequest(format!("{raw}: {e}")))?;
    url.query_pairs_mut().append_pair("token", token);
    Ok(url)
}

/// Interpret the URL the auth session was redirected to.
pub fn parse_calendar_oauth_callback(raw: &str) -> Result<CalendarOAuthOutcome, OAuthCallbackError> {
    let url = Url::parse(raw).map_err(|e| OAuthCallbackError::InvalidUrl(e.to_string()))?;
    let param = |name: &str| {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    };

    if url.scheme() == OAUTH_CALLBACK_SCHEME && url.host_str() == Some(OAUTH_CALLBACK_HOST) {
        return Ok(match param("status").as_deref() {
            Some("success") => CalendarOAuthOutcome::Linked,
            _ => CalendarOAuthOutcome::Failed(
                param("message").unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            ),
        });
    }

    match (param("code"), param("state")) {
        (Some(code), Some(state)) => Ok(CalendarOAuthOutcome::AuthorizationCode { code, state }),
        _ => Err(OAuthCallbackError::UnexpectedTarget(raw.to_string())),
    }
}

impl HttpBackendClient {
    pub fn calendar_oauth_start_url(&self, token: &str) -> ApiResult<Url> {
        calendar_oauth_start_url(self.base_url(), token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_url_encodes_token() {
        let url = calendar_oauth_start_url("http://localhost:5001/", "a b+c").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5001/api/calendar/oauth/google/start?token=a+b%2Bc"
        );
    }

    #[test]
    fn success_callback_links() {
        assert_eq!(
            parse_calendar_oauth_callback("violetvibes://calendar-oauth?status=success"),
            Ok(CalendarOAuthOutcome::Linked)
        );
    }

    #[test]
    fn failure_callback_carries_message() {
        assert_eq!(
            parse_calendar_oauth_callback(
                "violetvibes://calendar-oauth?status=error&message=access%20denied"
            ),
            Ok(CalendarOAuthOutcome::Failed("access denied".into()))
        );
        assert_eq!(
            parse_calendar_oauth_callback("violetvibes://calendar-oauth"),
            Ok(CalendarOAuthOutcome::Failed("OAuth failed".into()))
        );
    }

    #[test]
    fn provider_redirect_yields_code() {
        assert_eq!(
            parse_calendar_oauth_callback("violetvibes://oauth2redirect?code=4%2F0A&state=xyz"),
            Ok(CalendarOAuthOutcome::AuthorizationCode {
                code: "4/0A".into(),
                state: "xyz".into()
            })
        );
    }

    #[test]
    fn foreign_urls_are_rejected() {
        assert!(matches!(
            parse_calendar_oauth_callback("https://example.com/?status=success"),
            Err(OAuthCallbackError::UnexpectedTarget(_))
        ));
        assert!(matches!(
            parse_calendar_oauth_callback("::not a url::"),
            Err(OAuthCallbackError::InvalidUrl(_))
        ));
    }
}
