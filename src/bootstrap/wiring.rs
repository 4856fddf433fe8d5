//! Builds the concrete adapters and groups them into [`AppDeps`].

use std::sync::Arc;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::info;
use vv_app::{App, AppDeps};
use vv_core::config::AppConfig;
use vv_core::permission::PermissionKind;
use vv_core::ports::{ClockPort, KeyValueStorePort, LocalNotification, PermissionPort};
use vv_infra::{FileKeyValueStore, HttpBackendClient, SystemClock};
use vv_platform::{ChannelLocationSource, PermissionBridge, TokioNotificationScheduler};

use super::headless::HeadlessPermissionApi;

/// The application plus the handles a host needs to feed it.
pub struct WiredApp {
    pub app: App,
    /// Concrete client, for the OAuth helpers that are not part of a port.
    pub backend: Arc<HttpBackendClient>,
    /// Push fixes here; the app only sees the port.
    pub location: Arc<ChannelLocationSource>,
    /// Local notifications arrive here when they fire.
    pub delivered: mpsc::UnboundedReceiver<LocalNotification>,
}

/// Construct every adapter once. Must be called inside a tokio runtime.
pub fn wire_dependencies(config: AppConfig) -> anyhow::Result<WiredApp> {
    let backend = Arc::new(
        HttpBackendClient::from_config(&config).context("failed to build backend client")?,
    );

    let store = match &config.storage.data_dir {
        Some(dir) => FileKeyValueStore::new_in_data_root(dir),
        None => FileKeyValueStore::new_in_platform_data_dir(),
    }
    .context("failed to open local storage")?;
    info!(dir = %store.base_dir().display(), "local storage ready");
    let store: Arc<dyn KeyValueStorePort> = Arc::new(store);

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let location = Arc::new(ChannelLocationSource::default());
    let (scheduler, delivered) = TokioNotificationScheduler::new(clock.clone());

    let permission_timeout = config.permissions.request_timeout();
    let permissions: Vec<Arc<dyn PermissionPort>> = PermissionKind::ALL
        .iter()
        .map(|kind| {
            Arc::new(PermissionBridge::new(
                HeadlessPermissionApi::new(*kind),
                permission_timeout,
            )) as Arc<dyn PermissionPort>
        })
        .collect();

    let deps = AppDeps {
        auth: backend.clone(),
        chat: backend.clone(),
        recommendations: backend.clone(),
        places: backend.clone(),
        user: backend.clone(),
        calendar: backend.clone(),
        weather: backend.clone(),
        store,
        location: location.clone(),
        notifications: Arc::new(scheduler),
        permissions,
        clock,
        config,
    };
    let app = App::new(deps).context("failed to restore session")?;

    Ok(WiredApp {
        app,
        backend,
        location,
        delivered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use vv_infra::http::API_URL_ENV;

    #[tokio::test]
    #[serial]
    async fn wires_against_configured_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            api_url: Some("http://127.0.0.1:5999/".into()),
            storage: vv_core::config::StorageConfig {
                data_dir: Some(dir.path().to_path_buf()),
            },
            ..Default::default()
        };

        let wired = wire_dependencies(config).unwrap();
        wired.app.session().mark_welcome_seen().unwrap();

        assert!(dir.path().join("violetvibes").join("store").is_dir());
        assert_eq!(wired.app.deps().permissions.len(), PermissionKind::ALL.len());
        assert!(!wired.app.session().onboarding().has_logged_in);
    }

    #[tokio::test]
    #[serial]
    async fn environment_overrides_configured_api_url() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            api_url: Some("http://configured.invalid".into()),
            storage: vv_core::config::StorageConfig {
                data_dir: Some(dir.path().to_path_buf()),
            },
            ..Default::default()
        };

        std::env::set_var(API_URL_ENV, "http://10.0.0.5:5000/");
        let wired = wire_dependencies(config);
        std::env::remove_var(API_URL_ENV);

        assert_eq!(wired.unwrap().backend.base_url(), "http://10.0.0.5:5000");
    }
}
