use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;
use vv_core::api::{ApiError, ApiResult, AuthResult};
use vv_core::contacts::{ContactError, TrustedContact, TrustedContactList, UserAccount};
use vv_core::onboarding::OnboardingState;
use vv_core::ports::{KeyValueStoreExt, KeyValueStorePort, StorageError};
use vv_core::preferences::{BackendSettings, Preferences};
use vv_core::session::{Session, SessionRecord};
use vv_core::storage_keys as keys;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Contact(#[from] ContactError),
}

/// Everything the session store owns, as one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionView {
    pub session: Session,
    pub onboarding: OnboardingState,
    pub home_address: Option<String>,
    pub account: Option<UserAccount>,
    pub trusted_contacts: TrustedContactList,
    pub processed_notification_ids: BTreeSet<String>,
}

/// Single owner of the persisted client state.
///
/// Mutations are serialized by one mutex and written through to the store
/// before the in-memory copy changes, so a failed write leaves memory matching
/// what is on disk. Reads hand out clones.
pub struct SessionStore {
    store: Arc<dyn KeyValueStorePort>,
    state: Mutex<SessionView>,
}

impl SessionStore {
    /// Restore every field from storage. Records that no longer decode are
    /// replaced with defaults; I/O failures are returned.
    pub fn load(store: Arc<dyn KeyValueStorePort>) -> Result<Self, SessionError> {
        let onboarding = OnboardingState {
            has_seen_welcome: read_or_default(store.as_ref(), keys::HAS_SEEN_WELCOME)?,
            has_completed_permissions: read_or_default(
                store.as_ref(),
                keys::HAS_COMPLETED_PERMISSIONS,
            )?,
            has_logged_in: read_or_default(store.as_ref(), keys::HAS_LOGGED_IN)?,
            has_completed_onboarding_survey: read_or_default(
                store.as_ref(),
                keys::HAS_COMPLETED_ONBOARDING_SURVEY,
            )?,
        };

        let record: SessionRecord = read_or_default(store.as_ref(), keys::USER_SESSION)?;
        let preferences: Preferences = read_or_default(store.as_ref(), keys::USER_PREFERENCES)?;

        let view = SessionView {
            session: Session {
                token: record.jwt,
                calendar_linked: record.google_calendar_linked,
                preferences,
                settings: None,
            },
            onboarding,
            home_address: read_or_default(store.as_ref(), keys::HOME_ADDRESS)?,
            account: read_or_default(store.as_ref(), keys::USER_ACCOUNT)?,
            trusted_contacts: read_or_default(store.as_ref(), keys::TRUSTED_CONTACTS)?,
            processed_notification_ids: read_or_default(
                store.as_ref(),
                keys::PROCESSED_NOTIFICATION_IDS,
            )?,
        };

        debug!(
            authenticated = view.session.is_authenticated(),
            next_step = ?view.onboarding.next_step(),
            "session restored"
        );

        Ok(Self {
            store,
            state: Mutex::new(view),
        })
    }

    fn lock(&self) -> MutexGuard<'_, SessionView> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn view(&self) -> SessionView {
        self.lock().clone()
    }

    pub fn session(&self) -> Session {
        self.lock().session.clone()
    }

    pub fn onboarding(&self) -> OnboardingState {
        self.lock().onboarding
    }

    pub fn preferences(&self) -> Preferences {
        self.lock().session.preferences.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.lock()
            .session
            .token
            .clone()
            .filter(|token| !token.is_empty())
    }

    /// Fast failure for authenticated operations: no request is issued
    /// without a token.
    pub fn require_token(&self) -> ApiResult<String> {
        self.token().ok_or_else(ApiError::auth_required)
    }

    // ---- onboarding flags ----

    pub fn mark_welcome_seen(&self) -> Result<(), SessionError> {
        self.set_flag(keys::HAS_SEEN_WELCOME, |o| o.has_seen_welcome = true)
    }

    pub fn mark_permissions_completed(&self) -> Result<(), SessionError> {
        self.set_flag(keys::HAS_COMPLETED_PERMISSIONS, |o| {
            o.has_completed_permissions = true
        })
    }

    pub fn mark_logged_in(&self) -> Result<(), SessionError> {
        self.set_flag(keys::HAS_LOGGED_IN, |o| o.has_logged_in = true)
    }

    pub fn mark_survey_completed(&self) -> Result<(), SessionError> {
        self.set_flag(keys::HAS_COMPLETED_ONBOARDING_SURVEY, |o| {
            o.has_completed_onboarding_survey = true
        })
    }

    fn set_flag(
        &self,
        key: &'static str,
        apply: impl FnOnce(&mut OnboardingState),
    ) -> Result<(), SessionError> {
        let mut state = self.lock();
        self.store.set_json(key, &true)?;
        apply(&mut state.onboarding);
        debug!(key, "onboarding flag set");
        Ok(())
    }

    /// Clear every flag, the session and all cached user data.
    ///
    /// The session record goes first so a token never outlives the flags on
    /// disk; if it cannot be deleted it is overwritten with an empty record.
    /// Every other key is deleted even if an earlier delete fails, and the
    /// in-memory state is reset regardless; the first storage error is returned.
    pub fn reset_all(&self) -> Result<(), SessionError> {
        let mut state = self.lock();
        let mut first_error = None;
        if let Err(err) = self.store.delete(keys::USER_SESSION) {
            warn!(key = keys::USER_SESSION, error = %err, "failed to clear stored key");
            if let Err(blank_err) = self
                .store
                .set_json(keys::USER_SESSION, &SessionRecord::default())
            {
                warn!(error = %blank_err, "failed to blank stored session");
            }
            first_error = Some(err);
        }
        for key in keys::ALL.into_iter().filter(|key| *key != keys::USER_SESSION) {
            if let Err(err) = self.store.delete(key) {
                warn!(key, error = %err, "failed to clear stored key");
                first_error.get_or_insert(err);
            }
        }
        *state = SessionView::default();
        info!("session reset");
        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    // ---- session ----

    /// Store the token and the server's view of the user.
    ///
    /// Preferences and settings carried by the result replace the local copy
    /// wholesale. Does not set `hasLoggedIn`.
    ///
    /// The session record holding the token is written last: a failure on
    /// any earlier record leaves the user signed out both in memory and on
    /// disk.
    pub fn apply_auth_result(&self, result: &AuthResult) -> Result<(), SessionError> {
        let mut state = self.lock();
        let mut session = state.session.clone();

        if let Some(payload) = &result.user.preferences {
            session.preferences.overwrite_from_backend(payload);
        }
        if let Some(settings) = &result.user.settings {
            session.preferences = session.preferences.clone().with_settings(settings);
            session.settings = Some(settings.clone());
        }

        self.store
            .set_json(keys::USER_PREFERENCES, &session.preferences)?;
        state.session.preferences = session.preferences.clone();
        state.session.settings = session.settings.clone();

        if let Some(address) = &result.user.home_address {
            self.store.set_json(keys::HOME_ADDRESS, address)?;
            state.home_address = Some(address.clone());
        }

        session.token = Some(result.token.clone());
        self.store.set_json(keys::USER_SESSION, &session.record())?;
        state.session = session;
        debug!(email = %result.user.email, "auth result applied");
        Ok(())
    }

    /// Mark Google Calendar as linked and mirror it into the preferences toggle.
    pub fn mark_calendar_linked(&self) -> Result<(), SessionError> {
        let mut state = self.lock();
        let mut session = state.session.clone();
        session.calendar_linked = true;
        session.preferences.google_calendar_enabled = true;

        self.store
            .set_json(keys::USER_PREFERENCES, &session.preferences)?;
        state.session.preferences = session.preferences.clone();

        self.store.set_json(keys::USER_SESSION, &session.record())?;
        state.session = session;
        Ok(())
    }

    pub fn save_preferences(&self, preferences: Preferences) -> Result<(), SessionError> {
        let mut state = self.lock();
        self.store.set_json(keys::USER_PREFERENCES, &preferences)?;
        state.session.preferences = preferences;
        Ok(())
    }

    /// Cache the settings payload and overlay its toggles onto the preferences.
    pub fn save_settings(&self, settings: BackendSettings) -> Result<(), SessionError> {
        let mut state = self.lock();
        let preferences = state.session.preferences.clone().with_settings(&settings);
        self.store.set_json(keys::USER_PREFERENCES, &preferences)?;
        state.session.preferences = preferences;
        state.session.settings = Some(settings);
        Ok(())
    }

    // ---- user data ----

    pub fn set_home_address(&self, address: Option<String>) -> Result<(), SessionError> {
        let mut state = self.lock();
        match &address {
            Some(address) => self.store.set_json(keys::HOME_ADDRESS, address)?,
            None => self.store.delete(keys::HOME_ADDRESS)?,
        }
        state.home_address = address;
        Ok(())
    }

    pub fn save_user_account(&self, account: UserAccount) -> Result<(), SessionError> {
        let mut state = self.lock();
        self.store.set_json(keys::USER_ACCOUNT, &account)?;
        state.account = Some(account);
        Ok(())
    }

    pub fn add_trusted_contact(&self, contact: TrustedContact) -> Result<(), SessionError> {
        let mut state = self.lock();
        let mut contacts = state.trusted_contacts.clone();
        contacts.add(contact)?;
        self.store.set_json(keys::TRUSTED_CONTACTS, &contacts)?;
        state.trusted_contacts = contacts;
        Ok(())
    }

    /// Returns whether a contact with that id existed.
    pub fn remove_trusted_contact(&self, id: Uuid) -> Result<bool, SessionError> {
        let mut state = self.lock();
        let mut contacts = state.trusted_contacts.clone();
        if !contacts.remove(id) {
            return Ok(false);
        }
        self.store.set_json(keys::TRUSTED_CONTACTS, &contacts)?;
        state.trusted_contacts = contacts;
        Ok(true)
    }

    pub fn is_notification_processed(&self, id: &str) -> bool {
        self.lock().processed_notification_ids.contains(id)
    }

    pub fn record_processed_notification(&self, id: &str) -> Result<(), SessionError> {
        let mut state = self.lock();
        if state.processed_notification_ids.contains(id) {
            return Ok(());
        }
        let mut ids = state.processed_notification_ids.clone();
        ids.insert(id.to_string());
        self.store.set_json(keys::PROCESSED_NOTIFICATION_IDS, &ids)?;
        state.processed_notification_ids = ids;
        Ok(())
    }
}

fn read_or_default<T: DeserializeOwned + Default>(
    store: &dyn KeyValueStorePort,
    key: &str,
) -> Result<T, SessionError> {
    match store.get_json::<T>(key) {
        Ok(value) => Ok(value.unwrap_or_default()),
        Err(StorageError::Corrupt { key, message }) => {
            warn!(%key, %message, "discarding undecodable stored value");
            Ok(T::default())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::RwLock;
    use vv_core::api::AuthUser;
    use vv_core::ports::MockKeyValueStore;
    use vv_core::preferences::BackendPreferences;

    #[derive(Default)]
    struct MapStore(RwLock<HashMap<String, Vec<u8>>>);

    impl KeyValueStorePort for MapStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Ok(self.0.read().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
            self.0.write().unwrap().insert(key.to_string(), value.to_vec());
            Ok(())
        }

        fn delete(&self, key: &str) -> Result<(), StorageError> {
            self.0.write().unwrap().remove(key);
            Ok(())
        }
    }

    /// Map-backed store that rejects writes or deletes of chosen keys.
    #[derive(Default)]
    struct FlakyStore {
        inner: MapStore,
        fail_set: Option<&'static str>,
        fail_delete: Option<&'static str>,
    }

    impl KeyValueStorePort for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
            if self.fail_set == Some(key) {
                return Err(StorageError::Io(format!("cannot write {key}")));
            }
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<(), StorageError> {
            if self.fail_delete == Some(key) {
                return Err(StorageError::Io(format!("cannot delete {key}")));
            }
            self.inner.delete(key)
        }
    }

    fn fresh() -> (Arc<MapStore>, SessionStore) {
        let backing = Arc::new(MapStore::default());
        let store = SessionStore::load(backing.clone()).unwrap();
        (backing, store)
    }

    fn auth_result(preferences: Option<BackendPreferences>) -> AuthResult {
        AuthResult {
            token: "jwt-abc".into(),
            user: AuthUser {
                id: Some(1),
                email: "ana@nyu.edu".into(),
                first_name: Some("Ana".into()),
                home_address: None,
                preferences,
                settings: None,
            },
        }
    }

    fn five_categories() -> Preferences {
        Preferences {
            categories: [
                "Study Spots / Cozy Cafés",
                "Free Events & Pop-Ups",
                "Food Around Campus",
                "Nightlife",
                "Explore All / I'm open to anything",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn flags_persist_across_reload() {
        let (backing, store) = fresh();
        store.mark_welcome_seen().unwrap();
        store.mark_permissions_completed().unwrap();

        let reloaded = SessionStore::load(backing).unwrap();
        let onboarding = reloaded.onboarding();
        assert!(onboarding.has_seen_welcome);
        assert!(onboarding.has_completed_permissions);
        assert!(!onboarding.has_logged_in);
    }

    #[test]
    fn reset_all_clears_flags_token_and_preferences() {
        let (backing, store) = fresh();
        store.mark_welcome_seen().unwrap();
        store.mark_permissions_completed().unwrap();
        store.mark_logged_in().unwrap();
        store.mark_survey_completed().unwrap();
        store.apply_auth_result(&auth_result(None)).unwrap();
        store.save_preferences(five_categories()).unwrap();
        store.mark_calendar_linked().unwrap();

        store.reset_all().unwrap();

        let onboarding = store.onboarding();
        assert!(!onboarding.has_seen_welcome);
        assert!(!onboarding.has_completed_permissions);
        assert!(!onboarding.has_logged_in);
        assert!(!onboarding.has_completed_onboarding_survey);
        assert_eq!(store.session(), Session::default());
        assert!(backing.0.read().unwrap().is_empty());

        let reloaded = SessionStore::load(backing).unwrap();
        assert_eq!(reloaded.view(), SessionView::default());
    }

    #[test]
    fn reset_all_clears_memory_even_when_a_delete_fails() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get().returning(|_| Ok(None));
        mock.expect_set().returning(|_, _| Ok(()));
        mock.expect_delete()
            .times(keys::ALL.len())
            .returning(|key| match key {
                keys::USER_SESSION => Err(StorageError::Io("disk full".into())),
                _ => Ok(()),
            });

        let store = SessionStore::load(Arc::new(mock)).unwrap();
        store.apply_auth_result(&auth_result(None)).unwrap();

        let err = store.reset_all().unwrap_err();
        assert!(matches!(err, SessionError::Storage(StorageError::Io(_))));
        assert!(store.token().is_none());
    }

    #[test]
    fn failed_preferences_write_does_not_persist_token() {
        let backing = Arc::new(FlakyStore {
            fail_set: Some(keys::USER_PREFERENCES),
            ..Default::default()
        });
        let store = SessionStore::load(backing.clone()).unwrap();

        assert!(store.apply_auth_result(&auth_result(None)).is_err());
        assert!(store.token().is_none());

        let reloaded = SessionStore::load(backing).unwrap();
        assert!(reloaded.token().is_none());
        assert!(!reloaded.session().is_authenticated());
    }

    #[test]
    fn failed_preferences_write_does_not_persist_calendar_link() {
        let backing = Arc::new(FlakyStore {
            fail_set: Some(keys::USER_PREFERENCES),
            ..Default::default()
        });
        let store = SessionStore::load(backing.clone()).unwrap();

        assert!(store.mark_calendar_linked().is_err());
        assert!(!SessionStore::load(backing).unwrap().session().calendar_linked);
    }

    #[test]
    fn reset_all_blanks_session_when_its_delete_fails() {
        let backing = Arc::new(FlakyStore {
            fail_delete: Some(keys::USER_SESSION),
            ..Default::default()
        });
        let store = SessionStore::load(backing.clone()).unwrap();
        store.mark_welcome_seen().unwrap();
        store.apply_auth_result(&auth_result(None)).unwrap();

        assert!(store.reset_all().is_err());

        let reloaded = SessionStore::load(backing).unwrap();
        assert!(reloaded.token().is_none());
        assert!(!reloaded.onboarding().has_seen_welcome);
    }

    #[test]
    fn apply_auth_result_sets_token_but_not_logged_in() {
        let (_, store) = fresh();
        store.apply_auth_result(&auth_result(None)).unwrap();

        assert_eq!(store.token().as_deref(), Some("jwt-abc"));
        assert!(!store.onboarding().has_logged_in);
    }

    #[test]
    fn apply_auth_result_overwrites_preferences() {
        let (_, store) = fresh();
        store.save_preferences(five_categories()).unwrap();

        store
            .apply_auth_result(&auth_result(Some(BackendPreferences {
                preferred_vibes: Some(vec![]),
                ..Default::default()
            })))
            .unwrap();

        assert!(store.preferences().categories.is_empty());
    }

    #[test]
    fn apply_auth_result_without_preferences_keeps_local_copy() {
        let (_, store) = fresh();
        store.save_preferences(five_categories()).unwrap();
        store.apply_auth_result(&auth_result(None)).unwrap();
        assert_eq!(store.preferences().categories.len(), 5);
    }

    #[test]
    fn failed_write_leaves_state_untouched() {
        let mut mock = MockKeyValueStore::new();
        mock.expect_get().returning(|_| Ok(None));
        mock.expect_set()
            .returning(|_, _| Err(StorageError::Io("read-only".into())));

        let store = SessionStore::load(Arc::new(mock)).unwrap();
        assert!(store.apply_auth_result(&auth_result(None)).is_err());
        assert!(store.mark_logged_in().is_err());

        assert!(store.token().is_none());
        assert!(!store.onboarding().has_logged_in);
    }

    #[test]
    fn require_token_fails_fast_without_token() {
        let (_, store) = fresh();
        let err = store.require_token().unwrap_err();
        assert!(err.is_auth_required());
    }

    #[test]
    fn corrupt_records_fall_back_to_defaults() {
        let backing = Arc::new(MapStore::default());
        backing.set(keys::USER_PREFERENCES, b"{not json").unwrap();
        backing.set(keys::HAS_SEEN_WELCOME, b"true").unwrap();

        let store = SessionStore::load(backing).unwrap();
        assert_eq!(store.preferences(), Preferences::default());
        assert!(store.onboarding().has_seen_welcome);
    }

    #[test]
    fn load_reads_session_record_field_names() {
        let backing = Arc::new(MapStore::default());
        backing
            .set(keys::USER_SESSION, br#"{"jwt":"t","googleCalendarLinked":true}"#)
            .unwrap();

        let session = SessionStore::load(backing).unwrap().session();
        assert_eq!(session.token.as_deref(), Some("t"));
        assert!(session.calendar_linked);
    }

    #[test]
    fn calendar_link_mirrors_preference_toggle() {
        let (backing, store) = fresh();
        store.mark_calendar_linked().unwrap();

        let reloaded = SessionStore::load(backing).unwrap().session();
        assert!(reloaded.calendar_linked);
        assert!(reloaded.preferences.google_calendar_enabled);
    }

    #[test]
    fn trusted_contacts_reject_duplicates_and_persist() {
        let (backing, store) = fresh();
        let mom = TrustedContact::new("Mom").with_phone("(212) 555-0100");
        let mom_id = mom.id;
        store.add_trusted_contact(mom).unwrap();

        let err = store
            .add_trusted_contact(TrustedContact::new("Also Mom").with_phone("212-555-0100"))
            .unwrap_err();
        assert!(matches!(err, SessionError::Contact(ContactError::Duplicate(_))));

        let reloaded = SessionStore::load(backing).unwrap();
        assert_eq!(reloaded.view().trusted_contacts.len(), 1);

        assert!(reloaded.remove_trusted_contact(mom_id).unwrap());
        assert!(!reloaded.remove_trusted_contact(mom_id).unwrap());
        assert!(reloaded.view().trusted_contacts.is_empty());
    }

    #[test]
    fn home_address_can_be_cleared() {
        let (backing, store) = fresh();
        store
            .set_home_address(Some("70 Washington Sq S".into()))
            .unwrap();
        assert!(backing.get(keys::HOME_ADDRESS).unwrap().is_some());

        store.set_home_address(None).unwrap();
        assert!(backing.get(keys::HOME_ADDRESS).unwrap().is_none());
        assert!(store.view().home_address.is_none());
    }

    #[test]
    fn processed_notification_ids_persist() {
        let (backing, store) = fresh();
        store
            .record_processed_notification("2025-11-03T15:00:00Z-Jazz")
            .unwrap();
        store
            .record_processed_notification("2025-11-03T15:00:00Z-Jazz")
            .unwrap();

        let reloaded = SessionStore::load(backing).unwrap();
        assert!(reloaded.is_notification_processed("2025-11-03T15:00:00Z-Jazz"));
        assert_eq!(reloaded.view().processed_notification_ids.len(), 1);
    }
}
