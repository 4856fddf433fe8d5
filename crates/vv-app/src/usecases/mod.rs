//! Use cases.
//!
//! Each use case takes its ports at construction and exposes one entry point.
//! None of them navigates; the caller reads session state to decide what to
//! show next.

pub mod auth;
pub mod calendar_notifications;
pub mod location;
pub mod onboarding_permissions;
pub mod preferences;

pub use auth::{Login, Logout, Signup};
pub use calendar_notifications::CalendarNotificationMonitor;
pub use location::{CurrentLocation, LocationThrottle, WeatherRefresher};
pub use onboarding_permissions::{OnboardingPermissions, PermissionOutcome};
pub use preferences::{PreferencesSource, SyncPreferences};
