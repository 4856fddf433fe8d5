//! `/api/chat` request and response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::places::{Recommendation, Weather};
use crate::preferences::BackendPreferences;

const NO_REPLY_TEXT: &str = "I'm having trouble responding right now.";

/// Body of `POST /api/chat`. Absent optionals are omitted from the JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<BackendPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clear_session: Option<bool>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Whether the request asks the server to drop the conversation.
    pub fn clears_session(&self) -> bool {
        self.clear_session.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub places: Option<Vec<Recommendation>>,
    #[serde(default, alias = "debug_vibe")]
    pub vibe: Option<String>,
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub latency: Option<f64>,
}

impl ChatResponse {
    /// Lift the top-level `reply` and `error` strings out of a payload that
    /// failed structured decoding. Everything else, `places` included, is
    /// dropped. Returns `None` when the payload is not a JSON object.
    pub fn from_partial_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_owned);
        Some(Self {
            reply: text("reply"),
            error: text("error"),
            ..Default::default()
        })
    }

    pub fn reply_text(&self) -> &str {
        self.reply
            .as_deref()
            .or(self.error.as_deref())
            .unwrap_or(NO_REPLY_TEXT)
    }
}
