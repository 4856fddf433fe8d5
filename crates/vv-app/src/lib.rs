//! VioletVibes application layer.
//!
//! Use cases over the `vv-core` ports plus the single session store that owns
//! onboarding flags, the auth token and cached preferences.

pub mod app;
pub mod deps;
pub mod error;
pub mod session;
pub mod usecases;

pub use app::App;
pub use deps::AppDeps;
pub use error::AppError;
pub use session::{SessionError, SessionStore};
