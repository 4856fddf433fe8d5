use async_trait::async_trait;
use reqwest::Method;
use vv_core::api::{ApiResult, AuthResult, Credentials};
use vv_core::ports::AuthPort;

use super::HttpBackendClient;

#[async_trait]
impl AuthPort for HttpBackendClient {
    async fn signup(&self, credentials: &Credentials) -> ApiResult<AuthResult> {
        let builder = self
            .request(Method::POST, "/api/auth/signup", None)?
            .json(credentials);
        self.fetch(builder).await
    }

    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResult> {
        let builder = self
            .request(Method::POST, "/api/auth/login", None)?
            .json(credentials);
        self.fetch(builder).await
    }
}
