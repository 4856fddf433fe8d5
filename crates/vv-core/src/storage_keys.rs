//! Key names in the local key-value store. Values are JSON.

pub const HAS_SEEN_WELCOME: &str = "hasSeenWelcome";
pub const HAS_COMPLETED_PERMISSIONS: &str = "hasCompletedPermissions";
pub const HAS_LOGGED_IN: &str = "hasLoggedIn";
pub const HAS_COMPLETED_ONBOARDING_SURVEY: &str = "hasCompletedOnboardingSurvey";
pub const HOME_ADDRESS: &str = "homeAddress";
pub const TRUSTED_CONTACTS: &str = "trustedContacts";
pub const USER_ACCOUNT: &str = "userAccount";
pub const USER_PREFERENCES: &str = "userPreferences";
pub const USER_SESSION: &str = "vv_user_session";
pub const PROCESSED_NOTIFICATION_IDS: &str = "processedNotificationIds";

/// Every key the client writes; a full reset clears all of them.
pub const ALL: [&str; 10] = [
    HAS_SEEN_WELCOME,
    HAS_COMPLETED_PERMISSIONS,
    HAS_LOGGED_IN,
    HAS_COMPLETED_ONBOARDING_SURVEY,
    HOME_ADDRESS,
    TRUSTED_CONTACTS,
    USER_ACCOUNT,
    USER_PREFERENCES,
    USER_SESSION,
    PROCESSED_NOTIFICATION_IDS,
];
