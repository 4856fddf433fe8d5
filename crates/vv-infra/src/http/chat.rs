use async_trait::async_trait;
use reqwest::Method;
use vv_core::api::{ApiResult, ChatRequest, ChatResponse};
use vv_core::ports::ChatPort;

use super::response::decode_chat_body;
use super::HttpBackendClient;

/// Side-channel header asking the server to drop the conversation.
pub const CLEAR_SESSION_HEADER: &str = "X-Clear-Session";

#[async_trait]
impl ChatPort for HttpBackendClient {
    async fn send_chat(
        &self,
        request: &ChatRequest,
        token: Option<&str>,
    ) -> ApiResult<ChatResponse> {
        let mut builder = self.request(Method::POST, "/api/chat", token)?.json(request);
        if request.clears_session() {
            builder = builder.header(CLEAR_SESSION_HEADER, "true");
        }
        let body = self.send_checked(builder).await?;
        decode_chat_body(&body)
    }

    async fn clear_chat_session(&self, token: Option<&str>) -> ApiResult<()> {
        let request = ChatRequest {
            clear_session: Some(true),
            ..ChatRequest::new("")
        };
        let builder = self
            .request(Method::POST, "/api/chat", token)?
            .header(CLEAR_SESSION_HEADER, "true")
            .json(&request);
        self.fetch_ack(builder).await
    }
}
