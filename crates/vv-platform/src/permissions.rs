//! Callback-to-async permission bridge.
//!
//! Platform SDKs answer permission prompts through a delegate callback. The
//! bridge turns that into the awaitable [`PermissionPort`] contract: at most
//! one pending request, a superseded request resolves `false`, and a request
//! whose callback never fires resolves with the status at timeout.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::{debug, warn};
use vv_core::permission::{PermissionKind, PermissionStatus};
use vv_core::ports::PermissionPort;

/// What a platform permission SDK offers.
pub trait PlatformPermissionApi: Send + Sync + 'static {
    fn kind(&self) -> PermissionKind;

    fn current_status(&self) -> PermissionStatus;

    /// Show the system prompt. The answer comes back later through
    /// [`PermissionBridge::on_status_changed`], or is already reflected in
    /// [`current_status`](Self::current_status) when this returns.
    fn prompt(&self);
}

pub struct PermissionBridge<A> {
    api: A,
    pending: Mutex<Option<oneshot::Sender<bool>>>,
    timeout: Duration,
}

impl<A: PlatformPermissionApi> PermissionBridge<A> {
    pub fn new(api: A, timeout: Duration) -> Self {
        Self {
            api,
            pending: Mutex::new(None),
            timeout,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Delegate callback. Undetermined statuses are ignored; platforms emit
    /// one when the manager is created, before the user has answered.
    pub fn on_status_changed(&self, status: PermissionStatus) {
        if !status.is_determined() {
            return;
        }
        if let Some(tx) = self.slot().take() {
            let granted = status.is_granted();
            if tx.send(granted).is_err() {
                debug!(kind = %self.api.kind(), "permission answer arrived after the waiter left");
            }
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<oneshot::Sender<bool>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn install_pending(&self, tx: oneshot::Sender<bool>) {
        if let Some(previous) = self.slot().replace(tx) {
            if previous.send(false).is_ok() {
                debug!(kind = %self.api.kind(), "superseded pending permission request");
            }
        }
    }

    fn drop_stale_pending(&self) {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(oneshot::Sender::is_closed) {
            slot.take();
        }
    }
}

#[async_trait]
impl<A: PlatformPermissionApi> PermissionPort for PermissionBridge<A> {
    fn kind(&self) -> PermissionKind {
        self.api.kind()
    }

    async fn check_status(&self) -> PermissionStatus {
        self.api.current_status()
    }

    async fn request_permission(&self) -> bool {
        let status = self.api.current_status();
        if status.is_determined() {
            return status.is_granted();
        }

        let (tx, rx) = oneshot::channel();
        self.install_pending(tx);
        self.api.prompt();

        // Platforms without a delegate decide inside `prompt`.
        let status = self.api.current_status();
        if status.is_determined() {
            drop(rx);
            self.drop_stale_pending();
            return status.is_granted();
        }

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(granted)) => granted,
            Ok(Err(_)) => self.api.current_status().is_granted(),
            Err(_) => {
                self.drop_stale_pending();
                let status = self.api.current_status();
                warn!(kind = %self.api.kind(), ?status, "permission prompt timed out");
                status.is_granted()
            }
        }
    }
}
