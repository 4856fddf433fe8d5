use std::sync::Arc;

use crate::deps::AppDeps;
use crate::session::{SessionError, SessionStore};
use crate::usecases::{
    CalendarNotificationMonitor, CurrentLocation, Login, Logout, OnboardingPermissions, Signup,
    SyncPreferences, WeatherRefresher,
};

/// The application runtime: the dependencies, the one session store, and the
/// long-lived workers. Use cases are built on demand from these.
pub struct App {
    deps: AppDeps,
    session: Arc<SessionStore>,
    calendar_monitor: Arc<CalendarNotificationMonitor>,
    weather_refresher: Arc<WeatherRefresher>,
}

impl App {
    /// Restores the session from `deps.store`.
    pub fn new(deps: AppDeps) -> Result<Self, SessionError> {
        let session = Arc::new(SessionStore::load(deps.store.clone())?);
        let calendar_monitor = Arc::new(CalendarNotificationMonitor::new(
            deps.calendar.clone(),
            deps.notifications.clone(),
            session.clone(),
            deps.clock.clone(),
            deps.config.calendar.clone(),
        ));
        let weather_refresher = Arc::new(WeatherRefresher::new(
            deps.weather.clone(),
            deps.config.location.distance_threshold_meters,
        ));

        Ok(Self {
            deps,
            session,
            calendar_monitor,
            weather_refresher,
        })
    }

    pub fn deps(&self) -> &AppDeps {
        &self.deps
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn calendar_monitor(&self) -> &Arc<CalendarNotificationMonitor> {
        &self.calendar_monitor
    }

    pub fn weather_refresher(&self) -> &Arc<WeatherRefresher> {
        &self.weather_refresher
    }

    pub fn login(&self) -> Login {
        Login::new(self.deps.auth.clone(), self.session.clone())
    }

    pub fn signup(&self) -> Signup {
        Signup::new(self.deps.auth.clone(), self.session.clone())
    }

    pub fn logout(&self) -> Logout {
        Logout::new(self.session.clone(), self.calendar_monitor.clone())
    }

    pub fn sync_preferences(&self) -> SyncPreferences {
        SyncPreferences::new(self.deps.user.clone(), self.session.clone())
    }

    pub fn current_location(&self) -> CurrentLocation {
        CurrentLocation::new(
            self.deps.location.clone(),
            self.deps.config.location.fix_timeout(),
        )
    }

    pub fn onboarding_permissions(&self) -> OnboardingPermissions {
        OnboardingPermissions::new(self.deps.permissions.clone(), self.session.clone())
    }
}
