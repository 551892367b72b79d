use thiserror::Error;

use crate::model::DocumentKind;

/// Failures that can occur while turning a postal code into forecast tables.
///
/// `LocationNotFound` and `ProviderUnavailable` stop the whole request.
/// `PartialForecastUnavailable` only ever affects one of the two documents.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No location found for '{query}'.")]
    LocationNotFound { query: String },

    #[error("Geocoding service responded with status {status}.")]
    GeocoderUnavailable { status: u16 },

    #[error("{}", points_unavailable(.status))]
    ProviderUnavailable { status: u16 },

    #[error("The {document} forecast is unavailable (status {status}).")]
    PartialForecastUnavailable { document: DocumentKind, status: u16 },

    #[error("Geocoder returned an invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to parse {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn points_unavailable(status: &u16) -> String {
    match *status {
        // weather.gov has no gridpoint for coordinates outside its coverage.
        404 => "Weather data not available for this location (points lookup returned status 404). \
                The National Weather Service only covers the United States."
            .to_string(),
        _ => format!("Weather service is unavailable (points lookup returned status {status})."),
    }
}

impl WeatherError {
    /// True when the failure stops the request before any table can be built.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, WeatherError::PartialForecastUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_failure_names_the_document() {
        let err = WeatherError::PartialForecastUnavailable {
            document: DocumentKind::Hourly,
            status: 503,
        };

        assert_eq!(err.to_string(), "The hourly forecast is unavailable (status 503).");
        assert!(!err.is_fatal());
    }

    #[test]
    fn provider_unavailable_is_fatal_and_carries_status() {
        let err = WeatherError::ProviderUnavailable { status: 404 };

        assert!(err.is_fatal());
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn missing_points_explains_us_only_coverage() {
        let msg = WeatherError::ProviderUnavailable { status: 404 }.to_string();

        assert!(msg.contains("status 404"));
        assert!(msg.ends_with("The National Weather Service only covers the United States."));
    }

    #[test]
    fn other_points_statuses_keep_generic_message() {
        let msg = WeatherError::ProviderUnavailable { status: 503 }.to_string();

        assert_eq!(msg, "Weather service is unavailable (points lookup returned status 503).");
        assert!(!msg.contains("United States"));
    }

    #[test]
    fn location_not_found_mentions_query() {
        let err = WeatherError::LocationNotFound { query: "00000".into() };
        assert!(err.to_string().contains("'00000'"));
    }
}
