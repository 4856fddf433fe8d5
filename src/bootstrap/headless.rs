//! Platform stand-ins for running without a device shell.

use std::sync::{Mutex, PoisonError};

use vv_core::permission::{PermissionKind, PermissionStatus};
use vv_platform::PlatformPermissionApi;

/// Permission API for a terminal session. There is no system dialog, so
/// running the command that prompts counts as the user's consent.
pub struct HeadlessPermissionApi {
    kind: PermissionKind,
    status: Mutex<PermissionStatus>,
}

impl HeadlessPermissionApi {
    pub fn new(kind: PermissionKind) -> Self {
        Self {
            kind,
            status: Mutex::new(PermissionStatus::NotDetermined),
        }
    }
}

impl PlatformPermissionApi for HeadlessPermissionApi {
    fn kind(&self) -> PermissionKind {
        self.kind
    }

    fn current_status(&self) -> PermissionStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn prompt(&self) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = PermissionStatus::Granted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vv_core::ports::PermissionPort;
    use vv_platform::PermissionBridge;

    #[tokio::test]
    async fn prompt_grants_without_waiting_for_timeout() {
        let bridge = PermissionBridge::new(
            HeadlessPermissionApi::new(PermissionKind::Location),
            Duration::from_secs(3600),
        );
        assert_eq!(bridge.check_status().await, PermissionStatus::NotDetermined);
        assert!(bridge.request_permission().await);
        assert!(bridge.is_granted().await);
    }
}
