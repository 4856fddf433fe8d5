//! # vv-platform
//!
//! Adapters between the host platform and the VioletVibes ports.
//!
//! The host (a mobile shell, a desktop wrapper, or a test) feeds platform
//! callbacks in; use cases see only the async ports from `vv-core`.

pub mod location;
pub mod notifications;
pub mod permissions;

pub use location::ChannelLocationSource;
pub use notifications::TokioNotificationScheduler;
pub use permissions::{PermissionBridge, PlatformPermissionApi};
