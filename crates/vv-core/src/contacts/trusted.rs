use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("{0}")]
    Duplicate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedContact {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl TrustedContact {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone_number: None,
            email: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Phone if present, otherwise email.
    pub fn primary_identifier(&self) -> Option<&str> {
        self.phone_number.as_deref().or(self.email.as_deref())
    }

    pub fn has_contact_method(&self) -> bool {
        self.phone_number.is_some() || self.email.is_some()
    }

    fn normalized_phone(&self) -> Option<String> {
        self.phone_number
            .as_deref()
            .map(|p| p.chars().filter(char::is_ascii_digit).collect())
    }

    fn normalized_email(&self) -> Option<String> {
        self.email.as_deref().map(|e| e.trim().to_lowercase())
    }
}

/// Ordered contact list with uniqueness on id, phone digits and email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedContactList(Vec<TrustedContact>);

impl TrustedContactList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contacts(&self) -> &[TrustedContact] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn add(&mut self, contact: TrustedContact) -> Result<(), ContactError> {
        if self.0.iter().any(|c| c.id == contact.id) {
            return Err(ContactError::Duplicate(
                "Contact with this ID already exists".into(),
            ));
        }

        if let Some(phone) = contact.normalized_phone() {
            if self.0.iter().any(|c| c.normalized_phone().as_ref() == Some(&phone)) {
                return Err(ContactError::Duplicate(
                    "A contact with this phone number already exists".into(),
                ));
            }
        }

        if let Some(email) = contact.normalized_email() {
            if self.0.iter().any(|c| c.normalized_email().as_ref() == Some(&email)) {
                return Err(ContactError::Duplicate(
                    "A contact with this email already exists".into(),
                ));
            }
        }

        self.0.push(contact);
        Ok(())
    }

    /// Returns whether a contact was removed.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.0.len();
        self.0.retain(|c| c.id != id);
        self.0.len() != before
    }
}
