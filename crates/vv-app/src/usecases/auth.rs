use std::sync::Arc;

use tracing::info;
use vv_core::api::{AuthResult, Credentials};
use vv_core::contacts::UserAccount;
use vv_core::ports::AuthPort;

use super::CalendarNotificationMonitor;
use crate::error::AppError;
use crate::session::SessionStore;

/// Log in and store the returned session.
///
/// `hasLoggedIn` is left for the caller to set once it has accepted the
/// result.
pub struct Login {
    auth: Arc<dyn AuthPort>,
    session: Arc<SessionStore>,
}

impl Login {
    pub fn new(auth: Arc<dyn AuthPort>, session: Arc<SessionStore>) -> Self {
        Self { auth, session }
    }

    pub async fn execute(&self, credentials: &Credentials) -> Result<AuthResult, AppError> {
        let result = self.auth.login(credentials).await?;
        store_auth_result(&self.session, credentials, &result)?;
        info!(email = %result.user.email, "logged in");
        Ok(result)
    }
}

/// Create an account. Same storage contract as [`Login`].
pub struct Signup {
    auth: Arc<dyn AuthPort>,
    session: Arc<SessionStore>,
}

impl Signup {
    pub fn new(auth: Arc<dyn AuthPort>, session: Arc<SessionStore>) -> Self {
        Self { auth, session }
    }

    pub async fn execute(&self, credentials: &Credentials) -> Result<AuthResult, AppError> {
        let result = self.auth.signup(credentials).await?;
        store_auth_result(&self.session, credentials, &result)?;
        info!(email = %result.user.email, "signed up");
        Ok(result)
    }
}

fn store_auth_result(
    session: &SessionStore,
    credentials: &Credentials,
    result: &AuthResult,
) -> Result<(), AppError> {
    session.apply_auth_result(result)?;

    let first_name = result
        .user
        .first_name
        .clone()
        .or_else(|| credentials.first_name.clone())
        .unwrap_or_default();
    session.save_user_account(UserAccount::new(result.user.email.clone(), first_name))?;
    Ok(())
}

/// Stop background work and wipe every piece of local user state.
pub struct Logout {
    session: Arc<SessionStore>,
    monitor: Arc<CalendarNotificationMonitor>,
}

impl Logout {
    pub fn new(session: Arc<SessionStore>, monitor: Arc<CalendarNotificationMonitor>) -> Self {
        Self { session, monitor }
    }

    pub async fn execute(&self) -> Result<(), AppError> {
        self.monitor.stop().await;
        self.session.reset_all()?;
        info!("logged out");
        Ok(())
    }
}
