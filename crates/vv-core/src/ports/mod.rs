//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `vv-app` and the
//! adapters in `vv-infra` / `vv-platform`. Backend operations are split per
//! area so a use case only depends on the endpoints it calls; a single HTTP
//! client implements all of them.
//!
//! Authenticated operations take the bearer token as an argument. Adapters
//! never read session state themselves.

mod backend;
mod clock;
mod location;
mod notification;
mod permission;
mod storage;

pub use backend::{
    AuthPort, CalendarPort, ChatPort, PlacesPort, RecommendationsPort, UserPort, WeatherPort,
};
pub use clock::ClockPort;
pub use location::LocationSourcePort;
pub use notification::{LocalNotification, LocalNotificationPort};
pub use permission::PermissionPort;
pub use storage::{KeyValueStorePort, KeyValueStoreExt, StorageError};

#[cfg(any(test, feature = "mocks"))]
pub use storage::MockKeyValueStore;
