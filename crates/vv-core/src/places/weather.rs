use serde::{Deserialize, Serialize};

/// Current conditions, normalised from the several shapes the backend and
/// OpenWeather emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireWeather")]
pub struct Weather {
    /// Fahrenheit, rounded. Zero when the payload carried no temperature.
    pub temp_f: i32,
    pub emoji: String,
    pub description: Option<String>,
}

impl Weather {
    pub fn new(temp_f: i32, emoji: impl Into<String>) -> Self {
        Self {
            temp_f,
            emoji: emoji.into(),
            description: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WireMain {
    temp: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct WireCondition {
    main: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireWeather {
    #[serde(default)]
    temp_f: Option<f64>,
    #[serde(default)]
    main: Option<WireMain>,
    #[serde(default)]
    temp: Option<f64>,
    #[serde(default)]
    desc: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    weather: Option<Vec<WireCondition>>,
    #[serde(default)]
    emoji: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<WireWeather> for Weather {
    fn from(wire: WireWeather) -> Self {
        let temp = wire
            .temp_f
            .or_else(|| wire.main.as_ref().and_then(|m| m.temp))
            .or(wire.temp);

        #[cfg(feature = "tracing")]
        if temp.is_none() {
            tracing::debug!("weather payload carried no temperature, defaulting to 0");
        }

        let condition = wire
            .weather
            .as_ref()
            .and_then(|list| list.first())
            .and_then(|c| c.main.clone());

        let emoji = if let Some(desc) = &wire.desc {
            emoji_for_description(desc)
        } else if let Some(condition) = &condition {
            emoji_for_description(condition)
        } else if let Some(icon) = &wire.icon {
            emoji_for_icon(icon)
        } else {
            wire.emoji.clone().unwrap_or_else(|| "🌡️".to_string())
        };

        Self {
            temp_f: temp.map(|t| t.round() as i32).unwrap_or(0),
            emoji,
            description: wire.desc.or(condition).or(wire.description),
        }
    }
}

fn emoji_for_description(desc: &str) -> String {
    let desc = desc.to_lowercase();
    let emoji = if desc.contains("cloud") {
        "☁️"
    } else if desc.contains("rain") {
        "🌧️"
    } else if desc.contains("snow") {
        "❄️"
    } else if desc.contains("storm") {
        "⛈️"
    } else {
        "☀️"
    };
    emoji.to_string()
}

/// OpenWeather icon codes.
fn emoji_for_icon(icon: &str) -> String {
    let emoji = match icon {
        "01d" => "☀️",
        "01n" => "🌕",
        "02d" => "🌤️",
        "02n" => "🌥️",
        "03d" | "03n" | "04d" | "04n" => "☁️",
        "09d" | "09n" | "10n" => "🌧️",
        "10d" => "🌦️",
        "11d" | "11n" => "⛈️",
        "13d" | "13n" => "❄️",
        "50d" | "50n" => "🌫️",
        _ => "🌡️",
    };
    emoji.to_string()
}

/// One slot of `/api/weather/forecast`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    #[serde(default, alias = "dt_txt")]
    pub time: Option<String>,
    #[serde(flatten)]
    pub weather: Weather,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    #[serde(default, alias = "list")]
    pub forecast: Vec<ForecastEntry>,
    #[serde(default)]
    pub error: Option<String>,
}
