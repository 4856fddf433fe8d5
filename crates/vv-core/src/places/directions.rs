use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInstruction {
    pub instruction: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
}

/// `GET /api/directions` body. `polyline` is a list of `[lat, lng]` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub distance_text: Option<String>,
    #[serde(default)]
    pub duration_text: Option<String>,
    #[serde(default)]
    pub maps_link: Option<String>,
    #[serde(default)]
    pub polyline: Option<Vec<[f64; 2]>>,
    #[serde(default)]
    pub steps: Option<Vec<StepInstruction>>,
    #[serde(default)]
    pub error: Option<String>,
}
