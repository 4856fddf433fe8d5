use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNotification {
    /// Scheduling an id that is already pending replaces it.
    pub id: String,
    pub title: String,
    pub body: String,
    pub fire_at: DateTime<Utc>,
}

#[async_trait]
pub trait LocalNotificationPort: Send + Sync {
    async fn schedule(&self, notification: LocalNotification) -> anyhow::Result<()>;

    async fn cancel(&self, id: &str) -> anyhow::Result<()>;
}
