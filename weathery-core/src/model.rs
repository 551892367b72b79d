use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Decimal-degree coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Renders as `lat,lon`, the form used by the points resource.
impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A resolved location: what to show the user and where to fetch weather for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub label: String,
    pub coordinate: Coordinate,
}

/// Which of the two forecast documents a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Hourly,
    MultiDay,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Hourly => "hourly",
            DocumentKind::MultiDay => "7-day",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{ "value": 20 }` wrapper used by the provider for percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuantitativeValue {
    #[serde(default)]
    pub value: Option<i64>,
}

/// One forecast interval as returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    #[serde(default)]
    pub name: String,
    pub start_time: DateTime<FixedOffset>,
    pub end_time: DateTime<FixedOffset>,
    pub temperature: i32,
    pub temperature_unit: String,
    #[serde(default)]
    pub probability_of_precipitation: Option<QuantitativeValue>,
    #[serde(default)]
    pub wind_speed: String,
}

impl Period {
    /// Precipitation chance in percent, `None` when the provider sent null or nothing.
    pub fn precip_percent(&self) -> Option<i64> {
        self.probability_of_precipitation.and_then(|p| p.value)
    }

    pub fn is_night(&self) -> bool {
        self.name.to_lowercase().contains("night")
    }
}

/// Periods in provider order. Callers rely on that order being chronological.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDocument {
    pub periods: Vec<Period>,
}

/// Outcome of the forecast fetch: each document may fail independently.
#[derive(Debug)]
pub struct ForecastPair {
    pub hourly: Result<ForecastDocument, crate::WeatherError>,
    pub multi_day: Result<ForecastDocument, crate::WeatherError>,
}
