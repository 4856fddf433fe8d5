//! Dependency grouping for [`App`](crate::App) construction.
//!
//! Plain parameter grouping: every field is required, nothing is defaulted.

use std::sync::Arc;

use vv_core::config::AppConfig;
use vv_core::ports::{
    AuthPort, CalendarPort, ChatPort, ClockPort, KeyValueStorePort, LocalNotificationPort,
    LocationSourcePort, PermissionPort, PlacesPort, RecommendationsPort, UserPort, WeatherPort,
};

pub struct AppDeps {
    // Backend
    pub auth: Arc<dyn AuthPort>,
    pub chat: Arc<dyn ChatPort>,
    pub recommendations: Arc<dyn RecommendationsPort>,
    pub places: Arc<dyn PlacesPort>,
    pub user: Arc<dyn UserPort>,
    pub calendar: Arc<dyn CalendarPort>,
    pub weather: Arc<dyn WeatherPort>,

    // Local storage
    pub store: Arc<dyn KeyValueStorePort>,

    // Platform
    pub location: Arc<dyn LocationSourcePort>,
    pub notifications: Arc<dyn LocalNotificationPort>,
    pub permissions: Vec<Arc<dyn PermissionPort>>,

    // System
    pub clock: Arc<dyn ClockPort>,
    pub config: AppConfig,
}
