//! Session & onboarding state.

mod store;

pub use store::{SessionError, SessionStore, SessionView};
