//! Application configuration domain model

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Local development backend, used when neither the environment nor the
/// config file names one.
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Application configuration
///
/// Every section has defaults, so a partial (or absent) config file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL from the bundled config. `API_URL` in the environment wins.
    pub api_url: Option<String>,

    /// Client-wide HTTP timeout
    pub request_timeout_secs: u64,

    /// Timeout for `GET /api/dashboard`
    pub dashboard_timeout_secs: u64,

    pub location: LocationConfig,
    pub permissions: PermissionsConfig,
    pub calendar: CalendarConfig,
    pub storage: StorageConfig,
}

/// Location updates and one-shot fixes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Minimum movement before downstream refetches fire
    pub distance_threshold_meters: f64,
    pub fix_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    /// How long a permission prompt may stay unanswered
    pub request_timeout_secs: u64,
}

/// Calendar notification polling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub poll_interval_secs: u64,
    pub initial_delay_secs: u64,
    pub notify_lead_minutes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key-value store directory. Falls back to the platform data dir.
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            request_timeout_secs: 30,
            dashboard_timeout_secs: 10,
            location: LocationConfig::default(),
            permissions: PermissionsConfig::default(),
            calendar: CalendarConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            distance_threshold_meters: 25.0,
            fix_timeout_secs: 10,
        }
    }
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 5,
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 15 * 60,
            initial_delay_secs: 60,
            notify_lead_minutes: 15,
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn dashboard_timeout(&self) -> Duration {
        Duration::from_secs(self.dashboard_timeout_secs)
    }
}

impl LocationConfig {
    pub fn fix_timeout(&self) -> Duration {
        Duration::from_secs(self.fix_timeout_secs)
    }
}

impl PermissionsConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl CalendarConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }

    /// `None` when the configured minutes do not fit a `TimeDelta`.
    pub fn notify_lead(&self) -> Option<chrono::TimeDelta> {
        chrono::TimeDelta::try_minutes(self.notify_lead_minutes)
    }
}
