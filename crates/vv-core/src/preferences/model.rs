use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::backend::{BackendBudget, BackendPreferences, BackendSettings};
use super::mapping::{
    backend_diet_to_ui, backend_vibe_to_ui_category, ui_category_to_backend_vibe,
    ui_diet_to_backend,
};

/// App-level preferences as shown in the UI.
///
/// The first five fields are owned by `/api/user/preferences`; the three
/// toggles mirror `/api/user/settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// UI category labels.
    pub categories: BTreeSet<String>,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    /// Dietary labels as shown in the UI.
    pub dietary_restrictions: BTreeSet<String>,
    pub max_walk_minutes: Option<i64>,
    /// Free-text hobbies / interests.
    pub hobbies: Option<String>,

    pub google_calendar_enabled: bool,
    pub notifications_enabled: bool,
    pub use_preferences_for_personalization: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            categories: BTreeSet::new(),
            budget_min: None,
            budget_max: None,
            dietary_restrictions: BTreeSet::new(),
            max_walk_minutes: None,
            hobbies: None,
            google_calendar_enabled: false,
            notifications_enabled: false,
            use_preferences_for_personalization: true,
        }
    }
}

impl Preferences {
    pub fn to_backend_payload(&self) -> BackendPreferences {
        let vibes: Vec<String> = self
            .categories
            .iter()
            .filter_map(|c| ui_category_to_backend_vibe(c))
            .map(str::to_owned)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let diets: Vec<String> = self
            .dietary_restrictions
            .iter()
            .filter_map(|d| ui_diet_to_backend(d))
            .map(str::to_owned)
            .collect();

        let budget = if self.budget_min.is_some() || self.budget_max.is_some() {
            Some(BackendBudget {
                min: self.budget_min,
                max: self.budget_max,
            })
        } else {
            None
        };

        BackendPreferences {
            preferred_vibes: (!vibes.is_empty()).then_some(vibes),
            budget,
            dietary_restrictions: (!diets.is_empty()).then_some(diets),
            max_walk_minutes_default: self.max_walk_minutes,
            interests: self.hobbies.as_ref().map(|h| h.trim().to_string()),
        }
    }

    /// Preferences built purely from a server payload, toggles at defaults.
    pub fn from_backend_payload(payload: &BackendPreferences) -> Self {
        let mut prefs = Self::default();
        prefs.overwrite_from_backend(payload);
        prefs
    }

    /// Replace every payload-owned field with the server's value.
    ///
    /// Absent lists become empty and absent scalars become `None`: nothing
    /// from the previous local value survives. The settings toggles are left
    /// alone because the preferences payload does not carry them.
    pub fn overwrite_from_backend(&mut self, payload: &BackendPreferences) {
        self.categories = payload
            .preferred_vibes
            .iter()
            .flatten()
            .filter_map(|v| backend_vibe_to_ui_category(v))
            .map(str::to_owned)
            .collect();

        let budget = payload.budget.clone().unwrap_or_default();
        self.budget_min = budget.min;
        self.budget_max = budget.max;

        self.dietary_restrictions = payload
            .dietary_restrictions
            .iter()
            .flatten()
            .filter_map(|d| backend_diet_to_ui(d))
            .map(str::to_owned)
            .collect();

        self.max_walk_minutes = payload.max_walk_minutes_default;
        self.hobbies = payload.interests.clone();
    }

    /// Overlay the toggles present in a settings payload.
    pub fn with_settings(mut self, settings: &BackendSettings) -> Self {
        if let Some(enabled) = settings.google_calendar_enabled {
            self.google_calendar_enabled = enabled;
        }
        if let Some(enabled) = settings.notifications_enabled {
            self.notifications_enabled = enabled;
        }
        if let Some(enabled) = settings.use_preferences_for_personalization {
            self.use_preferences_for_personalization = enabled;
        }
        self
    }

    pub fn to_backend_settings(&self) -> BackendSettings {
        BackendSettings {
            google_calendar_enabled: Some(self.google_calendar_enabled),
            notifications_enabled: Some(self.notifications_enabled),
            use_preferences_for_personalization: Some(self.use_preferences_for_personalization),
        }
    }
}
