use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use vv_core::api::{ApiError, ApiResult};
use vv_core::AppConfig;

use super::base_url::resolve_base_url_from_env;
use super::response::{classify_failure, decode_body};

/// HTTP client for the VioletVibes backend.
///
/// Stateless apart from its configuration: tokens are passed per call and
/// nothing is retried.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    http: reqwest::Client,
    base_url: String,
    dashboard_timeout: Duration,
}

impl HttpBackendClient {
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        dashboard_timeout: Duration,
    ) -> ApiResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ApiError::InvalidRequest(format!("{base_url}: {e}")))?;

        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        info!(base_url = %base_url, "backend client ready");
        Ok(Self {
            http,
            base_url,
            dashboard_timeout,
        })
    }

    /// Build from config, resolving the base URL against the environment.
    pub fn from_config(config: &AppConfig) -> ApiResult<Self> {
        Self::new(
            resolve_base_url_from_env(config),
            config.request_timeout(),
            config.dashboard_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn dashboard_timeout(&self) -> Duration {
        self.dashboard_timeout
    }

    pub(crate) fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| ApiError::InvalidRequest(format!("{raw}: {e}")))
    }

    /// Start a request, attaching `Authorization: Bearer` when a token is given.
    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> ApiResult<RequestBuilder> {
        let url = self.endpoint(path)?;
        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    /// Send and return the body of a 2xx response; anything else is classified.
    pub(crate) async fn send_checked(&self, builder: RequestBuilder) -> ApiResult<Vec<u8>> {
        let request = builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let method = request.method().clone();
        let endpoint = request.url().path().to_string();

        let response = self.http.execute(request).await.map_err(|err| {
            warn!(%method, endpoint = %endpoint, error = %err, timeout = err.is_timeout(), "backend request failed");
            ApiError::InvalidResponse
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            warn!(%method, endpoint = %endpoint, error = %err, "failed to read backend response body");
            ApiError::InvalidResponse
        })?;

        debug!(%method, endpoint = %endpoint, status = status.as_u16(), bytes = body.len(), "backend response");

        if !status.is_success() {
            let err = classify_failure(status, &body);
            log_failure(&method, &endpoint, status, &err);
            return Err(err);
        }
        Ok(body.to_vec())
    }

    pub(crate) async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let body = self.send_checked(builder).await?;
        decode_body(&body)
    }

    /// For endpoints whose success body carries nothing the caller needs.
    pub(crate) async fn fetch_ack(&self, builder: RequestBuilder) -> ApiResult<()> {
        self.send_checked(builder).await.map(|_| ())
    }
}

fn log_failure(method: &Method, endpoint: &str, status: StatusCode, err: &ApiError) {
    if status.is_server_error() {
        warn!(%method, endpoint, status = status.as_u16(), error = %err, "backend returned an error");
    } else {
        debug!(%method, endpoint, status = status.as_u16(), error = %err, "backend rejected request");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpBackendClient {
        HttpBackendClient::new(base, Duration::from_secs(5), Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = HttpBackendClient::new("not a url", Duration::from_secs(1), Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let client = client("http://localhost:5001/");
        assert_eq!(client.base_url(), "http://localhost:5001");
        assert_eq!(
            client.endpoint("/api/dashboard").unwrap().as_str(),
            "http://localhost:5001/api/dashboard"
        );
    }

    #[test]
    fn bearer_header_only_with_token() {
        let client = client("http://localhost:5001");

        let request = client
            .request(Method::GET, "/api/dashboard", Some("jwt-1"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer jwt-1"
        );

        let request = client
            .request(Method::GET, "/api/events", None)
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());

        let request = client
            .request(Method::GET, "/api/events", Some(""))
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }
}
