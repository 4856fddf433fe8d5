use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;
use vv_core::api::{ActivityEvent, ApiResult, Profile, ProfileUpdate};
use vv_core::ports::UserPort;
use vv_core::preferences::{BackendPreferences, BackendSettings};

use super::HttpBackendClient;

#[async_trait]
impl UserPort for HttpBackendClient {
    async fn profile(&self, token: &str) -> ApiResult<Profile> {
        let builder = self.request(Method::GET, "/api/user/profile", Some(token))?;
        self.fetch(builder).await
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ApiResult<Profile> {
        let builder = self
            .request(Method::POST, "/api/user/profile", Some(token))?
            .json(update);
        self.fetch(builder).await
    }

    async fn preferences(&self, token: &str) -> ApiResult<BackendPreferences> {
        let builder = self.request(Method::GET, "/api/user/preferences", Some(token))?;
        self.fetch(builder).await
    }

    async fn save_preferences(
        &self,
        token: &str,
        preferences: &BackendPreferences,
    ) -> ApiResult<BackendPreferences> {
        let builder = self
            .request(Method::POST, "/api/user/preferences", Some(token))?
            .json(preferences);
        self.fetch(builder).await
    }

    async fn settings(&self, token: &str) -> ApiResult<BackendSettings> {
        let builder = self.request(Method::GET, "/api/user/settings", Some(token))?;
        self.fetch(builder).await
    }

    async fn save_settings(
        &self,
        token: &str,
        settings: &BackendSettings,
    ) -> ApiResult<BackendSettings> {
        let builder = self
            .request(Method::POST, "/api/user/settings", Some(token))?
            .json(settings);
        self.fetch(builder).await
    }

    async fn register_notification_token(
        &self,
        token: &str,
        device_token: &str,
    ) -> ApiResult<()> {
        let builder = self
            .request(Method::POST, "/api/user/notification_token", Some(token))?
            .json(&json!({ "token": device_token }));
        self.fetch_ack(builder).await
    }

    async fn record_activity(&self, token: &str, event: &ActivityEvent) -> ApiResult<()> {
        let builder = self
            .request(Method::POST, "/api/user/activity", Some(token))?
            .json(event);
        self.fetch_ack(builder).await
    }
}
