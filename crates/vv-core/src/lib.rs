//! # vv-core
//!
//! Core domain models and business rules for the VioletVibes client.
//!
//! This crate contains pure logic without any infrastructure dependencies:
//! the backend payload shapes, the error taxonomies, the session and
//! onboarding records, and the ports implemented by the outer layers.

pub mod api;
pub mod calendar;
pub mod config;
pub mod contacts;
pub mod location;
pub mod onboarding;
pub mod permission;
pub mod places;
pub mod ports;
pub mod preferences;
pub mod session;
pub mod storage_keys;

// Re-export commonly used types at the crate root
pub use api::{ApiError, ApiResult};
pub use config::AppConfig;
pub use location::Coordinate;
pub use onboarding::{OnboardingState, OnboardingStep};
pub use permission::{PermissionError, PermissionKind, PermissionStatus};
pub use preferences::Preferences;
pub use ports::StorageError;
pub use session::Session;
