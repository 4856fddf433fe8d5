//! Status classification and body decoding.
//!
//! These operate on raw `(status, bytes)` pairs so the rules can be tested
//! without a server.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;
use vv_core::api::{ApiError, ApiResult, ChatResponse};

/// Map a non-2xx response to an [`ApiError`].
///
/// Priority: 429, then 401, then an `error` string in a JSON object body,
/// then `InvalidResponse`. A body-level message never overrides 429/401.
pub fn classify_failure(status: StatusCode, body: &[u8]) -> ApiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return ApiError::rate_limited();
    }
    if status == StatusCode::UNAUTHORIZED {
        return ApiError::auth_required();
    }
    match error_field(body) {
        Some(message) => ApiError::Server(message),
        None => ApiError::InvalidResponse,
    }
}

/// Decode a 2xx body. An empty body is a decoding failure.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    ensure_not_empty(body)?;
    serde_json::from_slice(body).map_err(|e| ApiError::Decoding(e.to_string()))
}

/// Decode a `/api/chat` body, falling back to the top-level `reply` and
/// `error` strings when the full shape does not decode.
pub fn decode_chat_body(body: &[u8]) -> ApiResult<ChatResponse> {
    ensure_not_empty(body)?;
    let err = match serde_json::from_slice::<ChatResponse>(body) {
        Ok(response) => return Ok(response),
        Err(err) => err,
    };

    let partial = serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(ChatResponse::from_partial_json)
        .filter(|partial| partial.reply.is_some() || partial.error.is_some());

    match partial {
        Some(partial) => {
            warn!(error = %err, "chat payload did not decode, keeping reply/error only");
            Ok(partial)
        }
        None => Err(ApiError::Decoding(err.to_string())),
    }
}

fn ensure_not_empty(body: &[u8]) -> ApiResult<()> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::Decoding("empty response body".into()));
    }
    Ok(())
}

fn error_field(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value.get("error")?.as_str().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vv_core::api::{AUTH_REQUIRED_MESSAGE, RATE_LIMIT_MESSAGE};

    #[test]
    fn status_codes_beat_body_messages() {
        let body = br#"{"error": "something else"}"#;
        assert_eq!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, body),
            ApiError::Server(RATE_LIMIT_MESSAGE.into())
        );
        assert_eq!(
            classify_failure(StatusCode::UNAUTHORIZED, body),
            ApiError::Server(AUTH_REQUIRED_MESSAGE.into())
        );
    }

    #[test]
    fn body_error_then_generic() {
        assert_eq!(
            classify_failure(StatusCode::BAD_REQUEST, br#"{"error": "Email already registered"}"#),
            ApiError::Server("Email already registered".into())
        );
        assert_eq!(
            classify_failure(StatusCode::INTERNAL_SERVER_ERROR, b"<html>oops</html>"),
            ApiError::InvalidResponse
        );
        assert_eq!(
            classify_failure(StatusCode::BAD_GATEWAY, br#"{"error": 42}"#),
            ApiError::InvalidResponse
        );
        assert_eq!(
            classify_failure(StatusCode::NOT_FOUND, b""),
            ApiError::InvalidResponse
        );
    }

    #[test]
    fn empty_body_is_decoding_error() {
        let result: ApiResult<Value> = decode_body(b"");
        assert!(matches!(result, Err(ApiError::Decoding(_))));
        let result: ApiResult<Value> = decode_body(b"  \n");
        assert!(matches!(result, Err(ApiError::Decoding(_))));
        assert!(matches!(decode_chat_body(b""), Err(ApiError::Decoding(_))));
    }

    #[test]
    fn decoding_error_keeps_serde_detail() {
        let result: ApiResult<vv_core::api::AuthResult> = decode_body(br#"{"user": {}}"#);
        match result {
            Err(ApiError::Decoding(detail)) => assert!(detail.contains("token"), "{detail}"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn chat_error_without_reply() {
        let response = decode_chat_body(br#"{"error": "LLM unavailable"}"#).unwrap();
        assert_eq!(response.error.as_deref(), Some("LLM unavailable"));
        assert!(response.reply.is_none());
    }

    #[test]
    fn chat_fallback_drops_malformed_places() {
        let body = br#"{"reply": "Try Think Coffee", "places": "not-a-list", "vibe": "study"}"#;
        let response = decode_chat_body(body).unwrap();
        assert_eq!(response.reply.as_deref(), Some("Try Think Coffee"));
        assert!(response.places.is_none());
        assert!(response.vibe.is_none());
    }

    #[test]
    fn chat_fallback_with_error_field() {
        let body = br#"{"error": "partial failure", "places": [{"lat": "x"}]}"#;
        let response = decode_chat_body(body).unwrap();
        assert_eq!(response.error.as_deref(), Some("partial failure"));
        assert!(response.reply.is_none());
        assert!(response.places.is_none());
    }

    #[test]
    fn chat_without_liftable_fields_fails() {
        assert!(matches!(
            decode_chat_body(br#"{"places": 3}"#),
            Err(ApiError::Decoding(_))
        ));
        assert!(matches!(decode_chat_body(b"[1, 2]"), Err(ApiError::Decoding(_))));
    }
}
