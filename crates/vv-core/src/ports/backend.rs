//! Backend REST surface, grouped by area.
//!
//! Every method fails with exactly one [`ApiError`] kind; transport errors
//! never reach the caller unclassified.

use async_trait::async_trait;

use crate::api::{
    ActivityEvent, ApiResult, AuthResult, ChatRequest, ChatResponse, Credentials, Profile,
    ProfileUpdate,
};
use crate::calendar::{
    FreeTimeBlocksResponse, NextFreeBlockResponse, NextFreeRecommendation,
    NotificationCheckResponse, TodayEventsResponse,
};
use crate::location::Coordinate;
use crate::places::{
    DashboardResponse, DirectionsResponse, EventsResponse, QuickRecsResponse, Recommendation,
    TopRecommendationsQuery, Weather, WeatherForecast,
};
use crate::preferences::{BackendPreferences, BackendSettings};

#[async_trait]
pub trait AuthPort: Send + Sync {
    /// `POST /api/auth/signup`
    async fn signup(&self, credentials: &Credentials) -> ApiResult<AuthResult>;

    /// `POST /api/auth/login`
    async fn login(&self, credentials: &Credentials) -> ApiResult<AuthResult>;
}

#[async_trait]
pub trait ChatPort: Send + Sync {
    /// `POST /api/chat`. Malformed 2xx bodies degrade to the `reply`/`error`
    /// strings instead of failing.
    async fn send_chat(&self, request: &ChatRequest, token: Option<&str>)
        -> ApiResult<ChatResponse>;

    /// Drops the server-side conversation (`X-Clear-Session: true`).
    async fn clear_chat_session(&self, token: Option<&str>) -> ApiResult<()>;
}

#[async_trait]
pub trait RecommendationsPort: Send + Sync {
    /// `GET /api/quick_recs`
    async fn quick_recommendations(
        &self,
        category: &str,
        limit: u32,
        token: Option<&str>,
    ) -> ApiResult<QuickRecsResponse>;

    /// `GET /api/top_recommendations`. The limit is clamped to `1..=10`.
    async fn top_recommendations(
        &self,
        query: &TopRecommendationsQuery,
        token: Option<&str>,
    ) -> ApiResult<Vec<Recommendation>>;
}

#[async_trait]
pub trait PlacesPort: Send + Sync {
    /// `GET /api/directions`
    async fn directions(
        &self,
        destination: Coordinate,
        origin: Option<Coordinate>,
    ) -> ApiResult<DirectionsResponse>;

    /// `GET /api/events`
    async fn events(&self) -> ApiResult<EventsResponse>;

    /// `GET /api/dashboard`
    async fn dashboard(
        &self,
        token: &str,
        at: Option<Coordinate>,
    ) -> ApiResult<DashboardResponse>;
}

#[async_trait]
pub trait UserPort: Send + Sync {
    async fn profile(&self, token: &str) -> ApiResult<Profile>;

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> ApiResult<Profile>;

    async fn preferences(&self, token: &str) -> ApiResult<BackendPreferences>;

    /// Returns the server's canonical copy of what was saved.
    async fn save_preferences(
        &self,
        token: &str,
        preferences: &BackendPreferences,
    ) -> ApiResult<BackendPreferences>;

    async fn settings(&self, token: &str) -> ApiResult<BackendSettings>;

    async fn save_settings(
        &self,
        token: &str,
        settings: &BackendSettings,
    ) -> ApiResult<BackendSettings>;

    /// `POST /api/user/notification_token`
    async fn register_notification_token(&self, token: &str, device_token: &str)
        -> ApiResult<()>;

    /// `POST /api/user/activity`
    async fn record_activity(&self, token: &str, event: &ActivityEvent) -> ApiResult<()>;
}

#[async_trait]
pub trait CalendarPort: Send + Sync {
    async fn today_events(&self, token: &str) -> ApiResult<TodayEventsResponse>;

    async fn check_notifications(&self, token: &str) -> ApiResult<NotificationCheckResponse>;

    async fn free_time(&self, token: &str) -> ApiResult<FreeTimeBlocksResponse>;

    async fn next_free_block(&self, token: &str) -> ApiResult<NextFreeBlockResponse>;

    async fn next_free(&self, token: &str) -> ApiResult<NextFreeRecommendation>;

    async fn recommendation(&self, token: &str) -> ApiResult<NextFreeRecommendation>;
}

#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// `GET /api/weather`. Without a position the server picks campus.
    async fn current_weather(&self, at: Option<Coordinate>) -> ApiResult<Weather>;

    async fn forecast(&self, at: Coordinate) -> ApiResult<WeatherForecast>;
}
