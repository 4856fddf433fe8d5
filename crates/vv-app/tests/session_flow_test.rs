//! Login, preference sync and logout against a mock backend.

use std::sync::Arc;
use std::time::Duration;

use mockito::{Matcher, Server};
use serde_json::json;
use vv_app::usecases::{
    CalendarNotificationMonitor, Login, Logout, PreferencesSource, Signup, SyncPreferences,
};
use vv_app::{AppError, SessionStore};
use vv_core::api::{ApiError, Credentials};
use vv_core::config::CalendarConfig;
use vv_core::ports::KeyValueStorePort;
use vv_core::preferences::Preferences;
use vv_core::storage_keys as keys;
use vv_infra::{HttpBackendClient, InMemoryKeyValueStore, SystemClock};
use vv_platform::TokioNotificationScheduler;

struct Harness {
    server: mockito::ServerGuard,
    client: Arc<HttpBackendClient>,
    store: Arc<InMemoryKeyValueStore>,
    session: Arc<SessionStore>,
}

async fn harness() -> Harness {
    let server = Server::new_async().await;
    let client = Arc::new(
        HttpBackendClient::new(server.url(), Duration::from_secs(5), Duration::from_secs(10))
            .expect("client"),
    );
    let store = Arc::new(InMemoryKeyValueStore::new());
    let session = Arc::new(SessionStore::load(store.clone()).expect("session"));
    Harness {
        server,
        client,
        store,
        session,
    }
}

fn auth_body(first_name: Option<&str>) -> String {
    json!({
        "token": "jwt-valid",
        "user": {
            "id": 3,
            "email": "sam@nyu.edu",
            "first_name": first_name,
            "preferences": {"preferred_vibes": ["food"], "max_walk_minutes_default": 12},
            "settings": {"notifications_enabled": true}
        }
    })
    .to_string()
}

#[tokio::test]
async fn login_stores_token_without_marking_logged_in() {
    let mut h = harness().await;
    let mock = h
        .server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_body(auth_body(Some("Sam")))
        .create_async()
        .await;

    let login = Login::new(h.client.clone(), h.session.clone());
    let result = login
        .execute(&Credentials::new("sam@nyu.edu", "pw"))
        .await
        .expect("login");

    assert!(!result.token.is_empty());
    assert_eq!(h.session.token().as_deref(), Some("jwt-valid"));
    assert!(!h.session.onboarding().has_logged_in);

    let prefs = h.session.preferences();
    assert!(prefs.categories.contains("Food Around Campus"));
    assert_eq!(prefs.max_walk_minutes, Some(12));
    assert!(prefs.notifications_enabled);
    assert_eq!(
        h.session.view().account.map(|a| a.first_name),
        Some("Sam".to_string())
    );

    h.session.mark_logged_in().unwrap();
    let reloaded = SessionStore::load(h.store.clone()).unwrap();
    assert!(reloaded.onboarding().has_logged_in);
    assert_eq!(reloaded.token().as_deref(), Some("jwt-valid"));
    mock.assert_async().await;
}

#[tokio::test]
async fn signup_falls_back_to_form_first_name() {
    let mut h = harness().await;
    h.server
        .mock("POST", "/api/auth/signup")
        .with_status(201)
        .with_body(auth_body(None))
        .create_async()
        .await;

    Signup::new(h.client.clone(), h.session.clone())
        .execute(&Credentials::new("sam@nyu.edu", "pw").with_first_name("Samira"))
        .await
        .expect("signup");

    let account = h.session.view().account.expect("account");
    assert_eq!(account.first_name, "Samira");
    assert_eq!(account.email, "sam@nyu.edu");
}

#[tokio::test]
async fn failed_login_leaves_session_untouched() {
    let mut h = harness().await;
    h.server
        .mock("POST", "/api/auth/login")
        .with_status(400)
        .with_body(json!({"error": "Invalid email or password"}).to_string())
        .create_async()
        .await;

    let err = Login::new(h.client.clone(), h.session.clone())
        .execute(&Credentials::new("sam@nyu.edu", "nope"))
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Invalid email or password");
    assert!(h.session.token().is_none());
    assert!(h.store.keys().is_empty());
}

#[tokio::test]
async fn pull_overwrites_cache_with_server_preferences() {
    let mut h = harness().await;
    h.session
        .apply_auth_result(&serde_json::from_str(&auth_body(Some("Sam"))).unwrap())
        .unwrap();
    h.session
        .save_preferences(Preferences {
            categories: ["Nightlife".to_string()].into_iter().collect(),
            hobbies: Some("chess".into()),
            ..Default::default()
        })
        .unwrap();

    h.server
        .mock("GET", "/api/user/preferences")
        .match_header("authorization", "Bearer jwt-valid")
        .with_status(200)
        .with_body(json!({"preferred_vibes": ["study"], "dietary_restrictions": ["vegan"]}).to_string())
        .create_async()
        .await;
    h.server
        .mock("GET", "/api/user/settings")
        .with_status(200)
        .with_body(json!({"google_calendar_enabled": true}).to_string())
        .create_async()
        .await;

    let (prefs, source) = SyncPreferences::new(h.client.clone(), h.session.clone())
        .pull()
        .await
        .expect("pull");

    assert_eq!(source, PreferencesSource::Server);
    assert_eq!(prefs.categories.len(), 1);
    assert!(prefs.categories.contains("Study Spots / Cozy Cafés"));
    assert!(prefs.dietary_restrictions.contains("Vegan"));
    assert_eq!(prefs.hobbies, None);
    assert!(prefs.google_calendar_enabled);
    assert_eq!(h.session.preferences(), prefs);
}

#[tokio::test]
async fn pull_falls_back_to_cache_when_server_fails() {
    let mut h = harness().await;
    h.session
        .apply_auth_result(&serde_json::from_str(&auth_body(Some("Sam"))).unwrap())
        .unwrap();
    let cached = h.session.preferences();

    h.server
        .mock("GET", "/api/user/preferences")
        .with_status(500)
        .create_async()
        .await;

    let (prefs, source) = SyncPreferences::new(h.client.clone(), h.session.clone())
        .pull()
        .await
        .expect("pull");

    assert_eq!(source, PreferencesSource::LocalCache);
    assert_eq!(prefs, cached);
}

#[tokio::test]
async fn push_caches_server_echo() {
    let mut h = harness().await;
    h.session
        .apply_auth_result(&serde_json::from_str(&auth_body(Some("Sam"))).unwrap())
        .unwrap();

    h.server
        .mock("POST", "/api/user/preferences")
        .match_body(Matcher::PartialJson(json!({"preferred_vibes": ["nightlife"]})))
        .with_status(200)
        .with_body(json!({"preferred_vibes": ["nightlife"], "max_walk_minutes_default": 15}).to_string())
        .create_async()
        .await;
    h.server
        .mock("POST", "/api/user/settings")
        .with_status(200)
        .with_body(json!({"notifications_enabled": false}).to_string())
        .create_async()
        .await;

    let local = Preferences {
        categories: ["Nightlife".to_string()].into_iter().collect(),
        notifications_enabled: true,
        ..Default::default()
    };
    let saved = SyncPreferences::new(h.client.clone(), h.session.clone())
        .push(&local)
        .await
        .expect("push");

    assert_eq!(saved.max_walk_minutes, Some(15));
    assert!(!saved.notifications_enabled);
    assert_eq!(h.session.preferences(), saved);
}

#[tokio::test]
async fn push_keeps_preferences_echo_when_settings_fail() {
    let mut h = harness().await;
    h.session
        .apply_auth_result(&serde_json::from_str(&auth_body(Some("Sam"))).unwrap())
        .unwrap();

    h.server
        .mock("POST", "/api/user/preferences")
        .with_status(200)
        .with_body(json!({"preferred_vibes": ["nightlife"], "max_walk_minutes_default": 15}).to_string())
        .create_async()
        .await;
    h.server
        .mock("POST", "/api/user/settings")
        .with_status(500)
        .with_body(json!({"error": "settings unavailable"}).to_string())
        .create_async()
        .await;

    let local = Preferences {
        categories: ["Nightlife".to_string()].into_iter().collect(),
        ..Default::default()
    };
    let err = SyncPreferences::new(h.client.clone(), h.session.clone())
        .push(&local)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Api(ApiError::Server(ref m)) if m == "settings unavailable"));
    let cached = h.session.preferences();
    assert_eq!(cached.max_walk_minutes, Some(15));
    assert!(cached.categories.contains("Nightlife"));

    let on_disk: Preferences = serde_json::from_slice(
        &h.store.get(keys::USER_PREFERENCES).unwrap().unwrap(),
    )
    .unwrap();
    assert_eq!(on_disk, cached);
}

#[tokio::test]
async fn authenticated_use_cases_fail_fast_without_token() {
    let mut h = harness().await;
    let mock = h
        .server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = SyncPreferences::new(h.client.clone(), h.session.clone())
        .pull()
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Api(ref api) if api.is_auth_required()));
    assert!(matches!(err, AppError::Api(ApiError::Server(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn logout_clears_everything() {
    let mut h = harness().await;
    h.server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_body(auth_body(Some("Sam")))
        .create_async()
        .await;

    Login::new(h.client.clone(), h.session.clone())
        .execute(&Credentials::new("sam@nyu.edu", "pw"))
        .await
        .unwrap();
    h.session.mark_welcome_seen().unwrap();
    h.session.mark_logged_in().unwrap();
    h.session.set_home_address(Some("2 MetroTech".into())).unwrap();

    let (scheduler, _delivered) = TokioNotificationScheduler::new(Arc::new(SystemClock));
    let monitor = Arc::new(CalendarNotificationMonitor::new(
        h.client.clone(),
        Arc::new(scheduler),
        h.session.clone(),
        Arc::new(SystemClock),
        CalendarConfig::default(),
    ));
    monitor.start().await.unwrap();

    Logout::new(h.session.clone(), monitor.clone())
        .execute()
        .await
        .unwrap();

    assert_eq!(monitor.active_loops(), 0);
    assert!(!monitor.is_running().await);
    assert!(h.session.token().is_none());
    let onboarding = h.session.onboarding();
    assert!(!onboarding.has_seen_welcome && !onboarding.has_logged_in);
    assert_eq!(h.session.preferences(), Preferences::default());
    for key in keys::ALL {
        assert!(h.store.get(key).unwrap().is_none(), "{key} survived logout");
    }
}
