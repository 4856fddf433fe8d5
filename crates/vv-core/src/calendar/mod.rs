//! Calendar payloads served by `/api/calendar/*`.
//!
//! Timestamps stay as ISO-8601 strings on the wire; [`parse_timestamp`]
//! turns them into UTC instants when the client needs to compare them.

mod timestamp;

pub use timestamp::parse_timestamp;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::places::{Recommendation, SuggestionItem};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeTimeBlock {
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
}

impl FreeTimeBlock {
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.start)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.end)
    }

    /// Length in whole minutes: the server's figure when sent, otherwise
    /// derived from the bounds.
    pub fn minutes(&self) -> i64 {
        if let Some(minutes) = self.duration_minutes {
            return minutes as i64;
        }
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => (end - start).num_minutes().max(0),
            _ => 0,
        }
    }
}

/// One entry of `GET /api/calendar/today`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "summary", alias = "title")]
    pub name: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CalendarEvent {
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start.as_deref().and_then(parse_timestamp)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Untitled Event")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodayEventsResponse {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TodayEventsResponse {
    /// Events starting at or before the next upcoming one, in start order.
    /// Empty when nothing starts after `now`.
    pub fn events_until_next(&self, now: DateTime<Utc>) -> Vec<CalendarEvent> {
        let mut dated: Vec<(DateTime<Utc>, &CalendarEvent)> = self
            .events
            .iter()
            .filter_map(|event| event.start_time().map(|start| (start, event)))
            .collect();
        dated.sort_by_key(|(start, _)| *start);

        let Some(next) = dated.iter().map(|(start, _)| *start).find(|start| *start > now) else {
            return Vec::new();
        };

        dated
            .into_iter()
            .take_while(|(start, _)| *start <= next)
            .map(|(_, event)| event.clone())
            .collect()
    }
}

/// An event the server matched against a free slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventMatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationMatch {
    pub free_time: FreeTimeBlock,
    #[serde(default)]
    pub events: Vec<EventMatch>,
}

impl NotificationMatch {
    /// Stable id used to avoid scheduling the same reminder twice.
    pub fn dedup_id(&self) -> String {
        let title = self
            .events
            .first()
            .and_then(|e| e.title.as_deref())
            .unwrap_or("");
        format!("{}-{}", self.free_time.start, title)
    }

    /// `"{title} at {location} ({n} min free)"`, skipping absent parts.
    pub fn notification_body(&self) -> Option<String> {
        let event = self.events.first()?;
        let mut parts = Vec::new();
        if let Some(title) = &event.title {
            parts.push(title.clone());
        }
        if let Some(location) = &event.location {
            parts.push(format!("at {location}"));
        }
        let minutes = self.free_time.minutes();
        if minutes > 0 {
            parts.push(format!("({minutes} min free)"));
        }
        Some(parts.join(" "))
    }
}

/// `GET /api/calendar/notifications/check` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationCheckResponse {
    #[serde(default)]
    pub notifications: Vec<NotificationMatch>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/calendar/free_time` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreeTimeBlocksResponse {
    #[serde(default)]
    pub free_blocks: Vec<FreeTimeBlock>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/calendar/next_free_block` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NextFreeBlockResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub free_block: Option<FreeTimeBlock>,
    #[serde(default)]
    pub error: Option<String>,
}

/// `GET /api/calendar/next_free` and `GET /api/calendar/recommendation` body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NextFreeRecommendation {
    #[serde(default)]
    pub has_free_time: bool,
    #[serde(default)]
    pub next_free: Option<FreeTimeBlock>,
    #[serde(default)]
    pub suggestion: Option<SuggestionItem>,
    #[serde(default)]
    pub suggestion_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl NextFreeRecommendation {
    /// The suggestion as a place card, for screens that only render those.
    pub fn suggestion_card(&self) -> Option<Recommendation> {
        let item = self.suggestion.as_ref()?;
        let mut card = Recommendation::new(item.name.clone().unwrap_or_else(|| "Unknown".into()));
        card.description = item.description.clone().or_else(|| item.address.clone());
        card.maps_link = item.maps_link.clone();
        card.image = item.photo_url.clone();
        card.kind = self.suggestion_type.clone();
        Some(card)
    }
}
