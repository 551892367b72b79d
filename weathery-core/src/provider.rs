use crate::{
    Config, WeatherError,
    model::{Coordinate, ForecastPair, Place},
    provider::{nominatim::NominatimGeocoder, nws::NwsProvider},
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

pub mod nominatim;
pub mod nws;

/// Resolves free-form postal codes to a place.
#[async_trait]
pub trait Locator: Send + Sync + Debug {
    async fn locate(&self, query: &str) -> Result<Place, WeatherError>;
}

/// Fetches the hourly and multi-day forecast documents for a coordinate.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    /// Fails as a whole only when the forecast URLs cannot be discovered;
    /// each document carries its own result otherwise.
    async fn fetch(&self, coordinate: Coordinate) -> Result<ForecastPair, WeatherError>;
}

/// Shared HTTP client identifying this application to both providers.
pub fn http_client(config: &Config) -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .context("Failed to build HTTP client")
}

/// Construct the geocoder configured in `config`.
pub fn locator_from_config(config: &Config, http: Client) -> Box<dyn Locator> {
    Box::new(NominatimGeocoder::new(
        config.geocoder.base_url.clone(),
        config.geocoder.country_qualifier.clone(),
        http,
    ))
}

/// Construct the forecast source configured in `config`.
pub fn source_from_config(config: &Config, http: Client) -> Box<dyn ForecastSource> {
    Box::new(NwsProvider::new(config.weather.base_url.clone(), http))
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_client_builds_from_default_config() {
        assert!(http_client(&Config::default()).is_ok());
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn truncate_body_cuts_on_char_boundary() {
        let body = "°".repeat(300);
        let out = truncate_body(&body);

        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
    }
}
