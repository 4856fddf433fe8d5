//! Place-like payloads: recommendations, weather, directions, events and
//! the dashboard aggregate.

mod dashboard;
mod directions;
mod events;
mod recommendation;
mod weather;

pub use dashboard::{DashboardResponse, FreeTimeSuggestion, QuickRecommendations, SuggestionItem};
pub use directions::{DirectionsResponse, StepInstruction};
pub use events::{EventsResponse, NycEvent};
pub use recommendation::Recommendation;
pub use weather::{ForecastEntry, Weather, WeatherForecast};

use serde::{Deserialize, Serialize};

/// `GET /api/quick_recs` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickRecsResponse {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub places: Vec<Recommendation>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/top_recommendations` body; callers only see `places`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopRecommendations {
    #[serde(default)]
    pub category: Option<String>,
    pub places: Vec<Recommendation>,
}

/// Upper bound the server applies to `limit` on top recommendations.
pub const TOP_RECOMMENDATIONS_MAX: u32 = 10;

/// Clamp a requested top-recommendation count into `1..=10`.
pub fn clamp_top_limit(requested: u32) -> u32 {
    requested.clamp(1, TOP_RECOMMENDATIONS_MAX)
}

/// Query for `GET /api/top_recommendations`. Absent fields are not sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopRecommendationsQuery {
    pub limit: u32,
    pub weather: Option<String>,
    pub vibe: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl TopRecommendationsQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    pub fn near(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }

    pub fn with_vibe(mut self, vibe: impl Into<String>) -> Self {
        self.vibe = Some(vibe.into());
        self
    }

    /// Query pairs in wire order, with the limit already clamped.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("limit", clamp_top_limit(self.limit).to_string())];
        if let Some(weather) = self.weather.as_deref().filter(|w| !w.is_empty()) {
            pairs.push(("weather", weather.to_string()));
        }
        if let Some(vibe) = self.vibe.as_deref().filter(|v| !v.is_empty()) {
            pairs.push(("vibe", vibe.to_string()));
        }
        if let Some(lat) = self.latitude {
            pairs.push(("latitude", lat.to_string()));
        }
        if let Some(lng) = self.longitude {
            pairs.push(("longitude", lng.to_string()));
        }
        pairs
    }
}
