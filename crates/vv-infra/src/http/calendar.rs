use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use vv_core::api::ApiResult;
use vv_core::calendar::{
    FreeTimeBlocksResponse, NextFreeBlockResponse, NextFreeRecommendation,
    NotificationCheckResponse, TodayEventsResponse,
};
use vv_core::ports::CalendarPort;

use super::HttpBackendClient;

impl HttpBackendClient {
    async fn calendar_get<T: DeserializeOwned>(&self, path: &str, token: &str) -> ApiResult<T> {
        let builder = self.request(Method::GET, path, Some(token))?;
        self.fetch(builder).await
    }

    /// Hand an authorization code from the OAuth redirect to the backend.
    pub async fn complete_calendar_oauth(
        &self,
        token: &str,
        code: &str,
        state: &str,
    ) -> ApiResult<()> {
        let builder = self
            .request(Method::GET, "/api/calendar/oauth/callback", Some(token))?
            .query(&[("code", code), ("state", state), ("token", token)]);
        self.fetch_ack(builder).await
    }
}

#[async_trait]
impl CalendarPort for HttpBackendClient {
    async fn today_events(&self, token: &str) -> ApiResult<TodayEventsResponse> {
        self.calendar_get("/api/calendar/today", token).await
    }

    async fn check_notifications(&self, token: &str) -> ApiResult<NotificationCheckResponse> {
        self.calendar_get("/api/calendar/notifications/check", token)
            .await
    }

    async fn free_time(&self, token: &str) -> ApiResult<FreeTimeBlocksResponse> {
        self.calendar_get("/api/calendar/free_time", token).await
    }

    async fn next_free_block(&self, token: &str) -> ApiResult<NextFreeBlockResponse> {
        self.calendar_get("/api/calendar/next_free_block", token)
            .await
    }

    async fn next_free(&self, token: &str) -> ApiResult<NextFreeRecommendation> {
        self.calendar_get("/api/calendar/next_free", token).await
    }

    async fn recommendation(&self, token: &str) -> ApiResult<NextFreeRecommendation> {
        self.calendar_get("/api/calendar/recommendation", token)
            .await
    }
}
