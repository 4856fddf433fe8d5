//! `/api/user/*` payloads other than preferences and settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub home_address: Option<String>,
}

/// Partial profile update. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_address: Option<String>,
}

/// Interaction record posted to `/api/user/activity`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl ActivityEvent {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            place_id: None,
            name: None,
            vibe: None,
            score: None,
        }
    }

    pub fn clicked_recommendation(place_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            place_id: Some(place_id.into()),
            name: Some(name.into()),
            ..Self::new("clicked_recommendation")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activity_serializes_type_field() {
        let event = ActivityEvent::clicked_recommendation("p1", "Think Coffee");
        let body = serde_json::to_value(&event).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"type": "clicked_recommendation", "place_id": "p1", "name": "Think Coffee"})
        );
    }

    #[test]
    fn profile_update_sends_only_present_fields() {
        let update = ProfileUpdate {
            home_address: Some("70 Washington Sq S".into()),
            ..Default::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, serde_json::json!({"home_address": "70 Washington Sq S"}));
    }
}
