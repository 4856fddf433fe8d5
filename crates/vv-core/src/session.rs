//! Authenticated session.

use serde::{Deserialize, Serialize};

use crate::preferences::{BackendSettings, Preferences};

/// In-memory session snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub calendar_linked: bool,
    pub preferences: Preferences,
    pub settings: Option<BackendSettings>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn record(&self) -> SessionRecord {
        SessionRecord {
            jwt: self.token.clone(),
            google_calendar_linked: self.calendar_linked,
        }
    }
}

/// What `vv_user_session` holds on disk. Preferences live under their own key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[serde(default)]
    pub jwt: Option<String>,
    #[serde(default)]
    pub google_calendar_linked: bool,
}
