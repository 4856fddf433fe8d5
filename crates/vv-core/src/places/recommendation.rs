use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A place card.
///
/// The backend emits several shapes for the same entity (places service,
/// events scraper, quick recs), so decoding goes through [`WireRecommendation`]
/// which accepts every known field alias. Type mismatches still fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireRecommendation")]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub distance: Option<String>,
    pub walk_time: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub popularity: Option<String>,
    pub busyness: Option<f64>,
    pub rating: Option<f64>,
    pub score: Option<f64>,
    pub maps_link: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub source: Option<String>,
    pub image: Option<String>,
}

impl Recommendation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            distance: None,
            walk_time: None,
            lat: None,
            lng: None,
            popularity: None,
            busyness: None,
            rating: None,
            score: None,
            maps_link: None,
            kind: None,
            source: None,
            image: None,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lng.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WireRecommendation {
    #[serde(default, deserialize_with = "id_like")]
    id: Option<String>,
    #[serde(default, deserialize_with = "id_like")]
    place_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    distance: Option<String>,
    #[serde(default)]
    distance_text: Option<String>,
    #[serde(default, alias = "walkTime")]
    walk_time: Option<String>,
    #[serde(default)]
    duration_text: Option<String>,
    #[serde(default)]
    location: Option<WireLocation>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
    #[serde(default)]
    popularity: Option<String>,
    #[serde(default)]
    busyness: Option<f64>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    maps_link: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
}

impl From<WireRecommendation> for Recommendation {
    fn from(wire: WireRecommendation) -> Self {
        let (lat, lng) = match wire.location {
            Some(loc) => (loc.lat, loc.lng),
            None => (wire.lat, wire.lng),
        };
        let popularity = wire
            .popularity
            .or_else(|| wire.rating.map(|r| format!("⭐ {r:.1}")));

        Self {
            id: wire
                .id
                .or(wire.place_id)
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            title: wire
                .name
                .or(wire.title)
                .unwrap_or_else(|| "Unknown".to_string()),
            description: wire.description.or(wire.address),
            distance: wire.distance.or(wire.distance_text),
            walk_time: wire.walk_time.or(wire.duration_text),
            lat,
            lng,
            popularity,
            busyness: wire.busyness,
            rating: wire.rating,
            score: wire.score,
            maps_link: wire.maps_link,
            kind: wire.kind,
            source: wire.source,
            image: wire.image.or(wire.photo_url),
        }
    }
}

/// Accepts ids sent as strings or numbers.
fn id_like<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_places_service_shape() {
        let rec: Recommendation = serde_json::from_value(json!({
            "id": 42,
            "name": "Think Coffee",
            "address": "248 Mercer St",
            "walk_time": "4 min",
            "distance": "0.2 mi",
            "rating": 4.6,
            "location": {"lat": 40.7291, "lng": -73.9965},
            "photo_url": "https://img/1.jpg",
            "type": "cafe"
        }))
        .unwrap();

        assert_eq!(rec.id, "42");
        assert_eq!(rec.title, "Think Coffee");
        assert_eq!(rec.description.as_deref(), Some("248 Mercer St"));
        assert_eq!(rec.walk_time.as_deref(), Some("4 min"));
        assert_eq!(rec.lat, Some(40.7291));
        assert_eq!(rec.image.as_deref(), Some("https://img/1.jpg"));
        assert_eq!(rec.popularity.as_deref(), Some("⭐ 4.6"));
        assert_eq!(rec.kind.as_deref(), Some("cafe"));
    }

    #[test]
    fn decodes_directions_style_aliases() {
        let rec: Recommendation = serde_json::from_value(json!({
            "place_id": "abc",
            "title": "Washington Square Park",
            "distance_text": "0.1 mi",
            "duration_text": "2 mins",
            "lat": 40.73,
            "lng": -73.99
        }))
        .unwrap();

        assert_eq!(rec.id, "abc");
        assert_eq!(rec.distance.as_deref(), Some("0.1 mi"));
        assert_eq!(rec.walk_time.as_deref(), Some("2 mins"));
        assert!(rec.has_coordinates());
    }

    #[test]
    fn missing_name_and_id_get_placeholders() {
        let rec: Recommendation = serde_json::from_value(json!({})).unwrap();
        assert_eq!(rec.title, "Unknown");
        assert!(!rec.id.is_empty());
    }

    #[test]
    fn wrong_field_types_still_fail() {
        let result: Result<Recommendation, _> =
            serde_json::from_value(json!({"name": "X", "lat": "north"}));
        assert!(result.is_err());
    }
}
