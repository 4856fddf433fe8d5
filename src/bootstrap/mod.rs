//! Process start-up: configuration, tracing and dependency wiring.

pub mod config;
pub mod headless;
pub mod tracing;
pub mod wiring;

pub use config::{default_config_path, load_config, load_config_or_default};
pub use tracing::init_tracing_subscriber;
pub use wiring::{wire_dependencies, WiredApp};
