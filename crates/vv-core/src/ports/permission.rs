use async_trait::async_trait;

use crate::permission::{PermissionKind, PermissionStatus};

/// Uniform check/request contract for one device capability.
#[async_trait]
pub trait PermissionPort: Send + Sync {
    fn kind(&self) -> PermissionKind;

    /// Current status. Safe to poll; never shows a prompt.
    async fn check_status(&self) -> PermissionStatus;

    /// Prompt if the status is undetermined and resolve with whether access
    /// is granted. Must always resolve, even if the platform never answers.
    async fn request_permission(&self) -> bool;

    async fn is_granted(&self) -> bool {
        self.check_status().await.is_granted()
    }
}
