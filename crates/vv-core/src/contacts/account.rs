use serde::{Deserialize, Serialize};

/// Locally cached account summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub has_logged_in: bool,
}

impl UserAccount {
    pub fn new(email: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            has_logged_in: false,
        }
    }
}
