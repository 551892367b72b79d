//! Forward geocoding through Nominatim (OpenStreetMap).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    WeatherError,
    model::{Coordinate, Place},
};

use super::{Locator, truncate_body};

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    country_qualifier: String,
    http: Client,
}

impl NominatimGeocoder {
    pub fn new(base_url: String, country_qualifier: String, http: Client) -> Self {
        Self { base_url, country_qualifier, http }
    }

    fn qualified(&self, query: &str) -> String {
        let query = query.trim();
        if self.country_qualifier.is_empty() {
            query.to_string()
        } else {
            format!("{} {}", query, self.country_qualifier)
        }
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimPlace {
    fn into_place(self) -> Result<Place, WeatherError> {
        let latitude = parse_degrees(&self.lat)?;
        let longitude = parse_degrees(&self.lon)?;

        Ok(Place {
            label: self.display_name,
            coordinate: Coordinate::new(latitude, longitude),
        })
    }
}

fn parse_degrees(raw: &str) -> Result<f64, WeatherError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| WeatherError::InvalidCoordinate(raw.to_string()))
}

#[async_trait]
impl Locator for NominatimGeocoder {
    async fn locate(&self, query: &str) -> Result<Place, WeatherError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let q = self.qualified(query);
        tracing::debug!(%url, query = %q, "geocoding");

        let res = self
            .http
            .get(&url)
            .query(&[("q", q.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %truncate_body(&body), "geocoder error");
            return Err(WeatherError::GeocoderUnavailable { status: status.as_u16() });
        }

        let mut matches: Vec<NominatimPlace> = serde_json::from_str(&body)
            .map_err(|source| WeatherError::Decode { what: "geocoder", source })?;

        if matches.is_empty() {
            return Err(WeatherError::LocationNotFound { query: query.trim().to_string() });
        }

        let place = matches.swap_remove(0).into_place()?;
        tracing::info!(label = %place.label, coordinate = %place.coordinate, "resolved location");
        Ok(place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geocoder(qualifier: &str) -> NominatimGeocoder {
        NominatimGeocoder::new("http://localhost".into(), qualifier.into(), Client::new())
    }

    #[test]
    fn query_gets_country_qualifier() {
        assert_eq!(geocoder("USA").qualified(" 78155 "), "78155 USA");
        assert_eq!(geocoder("").qualified("78155"), "78155");
    }

    #[test]
    fn nominatim_place_parses_string_coordinates() {
        let raw: NominatimPlace = serde_json::from_str(
            r#"{"place_id": 1, "lat": "29.5688", "lon": "-97.9647",
                "display_name": "Seguin, Guadalupe County, Texas, 78155, United States"}"#,
        )
        .expect("place should parse");

        let place = raw.into_place().expect("coordinates should parse");
        assert_eq!(place.coordinate, Coordinate::new(29.5688, -97.9647));
        assert!(place.label.starts_with("Seguin"));
    }

    #[test]
    fn bad_coordinate_is_rejected() {
        let raw = NominatimPlace {
            lat: "north".into(),
            lon: "-97.9".into(),
            display_name: "Nowhere".into(),
        };

        let err = raw.into_place().unwrap_err();
        assert!(matches!(err, WeatherError::InvalidCoordinate(ref s) if s == "north"));
    }
}
