use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Recommendation, Weather};
use crate::calendar::FreeTimeBlock;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuggestionItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub maps_link: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreeTimeSuggestion {
    #[serde(default)]
    pub should_suggest: bool,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub suggestion: Option<SuggestionItem>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Quick recommendations keyed by section (`quick_bites`, `cozy_cafes`, ...).
pub type QuickRecommendations = BTreeMap<String, Vec<Recommendation>>;

/// `GET /api/dashboard` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default)]
    pub calendar_linked: Option<bool>,
    #[serde(default)]
    pub next_free: Option<FreeTimeBlock>,
    #[serde(default)]
    pub free_time_suggestion: Option<FreeTimeSuggestion>,
    #[serde(default)]
    pub quick_recommendations: Option<QuickRecommendations>,
}

impl DashboardResponse {
    pub fn is_calendar_linked(&self) -> bool {
        self.calendar_linked.unwrap_or(false)
    }

    pub fn section(&self, name: &str) -> &[Recommendation] {
        self.quick_recommendations
            .as_ref()
            .and_then(|sections| sections.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_dashboard() {
        let dashboard: DashboardResponse = serde_json::from_value(json!({
            "weather": {"temp_f": 64.2, "desc": "few clouds", "icon": "02d"},
            "calendar_linked": true,
            "next_free": {"start": "2025-11-03T15:00:00Z", "end": "2025-11-03T16:30:00Z"},
            "free_time_suggestion": {
                "should_suggest": true,
                "type": "place",
                "suggestion": {"name": "Bobst Library"},
                "message": "You have 90 minutes free"
            },
            "quick_recommendations": {
                "quick_bites": [{"id": 1, "name": "Joe's Pizza"}],
                "cozy_cafes": []
            }
        }))
        .unwrap();

        assert!(dashboard.is_calendar_linked());
        assert_eq!(dashboard.weather.as_ref().map(|w| w.temp_f), Some(64));
        assert_eq!(dashboard.section("quick_bites")[0].title, "Joe's Pizza");
        assert!(dashboard.section("events").is_empty());
    }

    #[test]
    fn empty_dashboard_is_valid() {
        let dashboard: DashboardResponse = serde_json::from_value(json!({})).unwrap();
        assert!(!dashboard.is_calendar_linked());
        assert!(dashboard.next_free.is_none());
    }
}
