use std::sync::Arc;

use tracing::info;
use vv_core::permission::{PermissionKind, PermissionStatus};
use vv_core::ports::PermissionPort;

use crate::error::AppError;
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionOutcome {
    pub kind: PermissionKind,
    pub granted: bool,
}

/// The onboarding permissions step, written once against [`PermissionPort`].
pub struct OnboardingPermissions {
    capabilities: Vec<Arc<dyn PermissionPort>>,
    session: Arc<SessionStore>,
}

impl OnboardingPermissions {
    /// Capabilities are kept in [`PermissionKind::ALL`] order regardless of
    /// the order given.
    pub fn new(mut capabilities: Vec<Arc<dyn PermissionPort>>, session: Arc<SessionStore>) -> Self {
        capabilities.sort_by_key(|capability| {
            PermissionKind::ALL
                .iter()
                .position(|kind| *kind == capability.kind())
                .unwrap_or(usize::MAX)
        });
        Self {
            capabilities,
            session,
        }
    }

    /// Current status of every capability. Never prompts.
    pub async fn status(&self) -> Vec<(PermissionKind, PermissionStatus)> {
        let mut statuses = Vec::with_capacity(self.capabilities.len());
        for capability in &self.capabilities {
            statuses.push((capability.kind(), capability.check_status().await));
        }
        statuses
    }

    /// Request each capability in turn, then mark the step complete.
    ///
    /// The step completes whether or not the user granted anything.
    pub async fn request_all(&self) -> Result<Vec<PermissionOutcome>, AppError> {
        let mut outcomes = Vec::with_capacity(self.capabilities.len());
        for capability in &self.capabilities {
            let granted = capability.request_permission().await;
            info!(kind = %capability.kind(), granted, "permission requested");
            outcomes.push(PermissionOutcome {
                kind: capability.kind(),
                granted,
            });
        }
        self.session.mark_permissions_completed()?;
        Ok(outcomes)
    }
}
