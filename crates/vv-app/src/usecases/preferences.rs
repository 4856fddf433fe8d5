use std::sync::Arc;

use tracing::{info, warn};
use vv_core::ports::UserPort;
use vv_core::preferences::Preferences;

use crate::error::AppError;
use crate::session::SessionStore;

/// Where [`SyncPreferences::pull`] got its answer from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferencesSource {
    Server,
    LocalCache,
}

/// Keeps the local preferences cache in line with the server, which is
/// authoritative whenever it answers.
pub struct SyncPreferences {
    user: Arc<dyn UserPort>,
    session: Arc<SessionStore>,
}

impl SyncPreferences {
    pub fn new(user: Arc<dyn UserPort>, session: Arc<SessionStore>) -> Self {
        Self { user, session }
    }

    /// Fetch preferences and settings and overwrite the cache with them.
    /// Any request failure falls back to the cached copy.
    pub async fn pull(&self) -> Result<(Preferences, PreferencesSource), AppError> {
        let token = self.session.require_token()?;

        let payload = match self.user.preferences(&token).await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "preferences fetch failed, using local cache");
                return Ok((self.session.preferences(), PreferencesSource::LocalCache));
            }
        };
        let settings = match self.user.settings(&token).await {
            Ok(settings) => Some(settings),
            Err(err) => {
                warn!(error = %err, "settings fetch failed, keeping local toggles");
                None
            }
        };

        let mut preferences = self.session.preferences();
        preferences.overwrite_from_backend(&payload);
        self.session.save_preferences(preferences)?;
        if let Some(settings) = settings {
            self.session.save_settings(settings)?;
        }

        info!("preferences pulled from server");
        Ok((self.session.preferences(), PreferencesSource::Server))
    }

    /// Save preferences remotely, then cache the server's echoed copy.
    ///
    /// The echo is cached before settings are sent, so a settings failure
    /// still leaves the cache matching what the server accepted.
    pub async fn push(&self, preferences: &Preferences) -> Result<Preferences, AppError> {
        let token = self.session.require_token()?;

        let echoed = self
            .user
            .save_preferences(&token, &preferences.to_backend_payload())
            .await?;
        let mut canonical = preferences.clone();
        canonical.overwrite_from_backend(&echoed);
        self.session.save_preferences(canonical)?;

        let settings = self
            .user
            .save_settings(&token, &preferences.to_backend_settings())
            .await?;
        self.session.save_settings(settings)?;

        info!("preferences pushed to server");
        Ok(self.session.preferences())
    }
}
