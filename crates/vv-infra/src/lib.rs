//! # vv-infra
//!
//! Infrastructure adapters for the VioletVibes client: the reqwest-backed
//! backend client, key-value stores and the system clock.

pub mod http;
pub mod storage;
pub mod time;

pub use http::HttpBackendClient;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use time::SystemClock;
