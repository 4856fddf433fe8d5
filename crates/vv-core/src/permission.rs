//! Device capability permissions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capabilities gated behind an OS permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    Location,
    Calendar,
    Reminders,
    Contacts,
    Notifications,
}

impl PermissionKind {
    /// Order the onboarding flow prompts in.
    pub const ALL: [PermissionKind; 5] = [
        PermissionKind::Location,
        PermissionKind::Calendar,
        PermissionKind::Reminders,
        PermissionKind::Contacts,
        PermissionKind::Notifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionKind::Location => "location",
            PermissionKind::Calendar => "calendar",
            PermissionKind::Reminders => "reminders",
            PermissionKind::Contacts => "contacts",
            PermissionKind::Notifications => "notifications",
        }
    }
}

impl std::fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform authorization status, collapsed across the OS variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    #[default]
    NotDetermined,
    Granted,
    Denied,
    Restricted,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }

    /// Whether asking again can still show a prompt.
    pub fn is_determined(&self) -> bool {
        !matches!(self, PermissionStatus::NotDetermined)
    }
}

/// Failure of an operation that needs a granted permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PermissionError {
    #[error("permission not granted")]
    NotAuthorized,

    #[error("timed out waiting for the platform")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_predicates() {
        assert!(PermissionStatus::Granted.is_granted());
        assert!(!PermissionStatus::Restricted.is_granted());
        assert!(!PermissionStatus::NotDetermined.is_determined());
        assert!(PermissionStatus::Denied.is_determined());
    }

    #[test]
    fn kinds_display_lowercase() {
        assert_eq!(PermissionKind::Notifications.to_string(), "notifications");
        assert_eq!(PermissionKind::ALL.len(), 5);
    }
}
