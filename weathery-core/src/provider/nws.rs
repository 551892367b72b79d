//! National Weather Service (api.weather.gov) forecasts.
//!
//! The API never hands out forecasts by coordinate directly. `/points/<lat>,<lon>`
//! answers with the URLs of the gridpoint forecasts, which are fetched next.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::{
    WeatherError,
    model::{Coordinate, DocumentKind, ForecastDocument, ForecastPair, Period},
};

use super::{ForecastSource, truncate_body};

#[derive(Debug, Clone)]
pub struct NwsProvider {
    base_url: String,
    http: Client,
}

impl NwsProvider {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }

    pub fn points_url(&self, coordinate: Coordinate) -> String {
        format!("{}/points/{}", self.base_url.trim_end_matches('/'), coordinate)
    }

    async fn fetch_points(&self, coordinate: Coordinate) -> Result<PointsProperties, WeatherError> {
        let url = self.points_url(coordinate);
        tracing::debug!(%url, "fetching points");

        let res = self.http.get(&url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if status != StatusCode::OK {
            tracing::debug!(status = status.as_u16(), body = %truncate_body(&body), "points lookup failed");
            return Err(WeatherError::ProviderUnavailable { status: status.as_u16() });
        }

        let parsed: PointsResponse = serde_json::from_str(&body)
            .map_err(|source| WeatherError::Decode { what: "points", source })?;

        Ok(parsed.properties)
    }

    async fn fetch_document(
        &self,
        url: &str,
        kind: DocumentKind,
    ) -> Result<ForecastDocument, WeatherError> {
        tracing::debug!(%url, document = %kind, "fetching forecast");

        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if status != StatusCode::OK {
            tracing::debug!(status = status.as_u16(), body = %truncate_body(&body), "forecast fetch failed");
            return Err(WeatherError::PartialForecastUnavailable {
                document: kind,
                status: status.as_u16(),
            });
        }

        let parsed: ForecastResponse = serde_json::from_str(&body).map_err(|source| {
            WeatherError::Decode { what: kind.as_str(), source }
        })?;

        Ok(ForecastDocument { periods: parsed.properties.periods })
    }
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointsProperties {
    forecast_hourly: String,
    forecast: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<Period>,
}

#[async_trait]
impl ForecastSource for NwsProvider {
    async fn fetch(&self, coordinate: Coordinate) -> Result<ForecastPair, WeatherError> {
        let links = self.fetch_points(coordinate).await?;

        let (hourly, multi_day) = tokio::join!(
            self.fetch_document(&links.forecast_hourly, DocumentKind::Hourly),
            self.fetch_document(&links.forecast, DocumentKind::MultiDay),
        );

        Ok(ForecastPair { hourly, multi_day })
    }
}
