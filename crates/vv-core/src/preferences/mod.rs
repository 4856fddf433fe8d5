//! User preferences: the local model, the backend payloads and the mapping
//! between UI labels and backend slugs.

mod backend;
mod mapping;
mod model;

pub use backend::{BackendBudget, BackendPreferences, BackendSettings};
pub use mapping::{
    backend_diet_to_ui, backend_vibe_to_ui_category, ui_category_to_backend_vibe,
    ui_diet_to_backend,
};
pub use model::Preferences;
