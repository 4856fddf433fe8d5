//! Application configuration models

mod app_config;

pub use app_config::{
    AppConfig, CalendarConfig, LocationConfig, PermissionsConfig, StorageConfig,
    DEFAULT_API_URL,
};
