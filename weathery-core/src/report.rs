//! One request's pass from postal code to display tables.

use serde::Serialize;

use crate::{
    Config, WeatherError,
    config::DefaultLocation,
    model::{ForecastDocument, Place},
    provider::{ForecastSource, Locator, http_client, locator_from_config, source_from_config},
    table::{DailyTable, HourlyTable, build_daily, build_hourly},
};

/// A table plus the message shown in its place when its document failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<T> {
    pub table: T,
    pub notice: Option<String>,
}

impl<T: Default> Section<T> {
    fn from_document(
        document: Result<ForecastDocument, WeatherError>,
        build: impl FnOnce(&ForecastDocument) -> T,
    ) -> Self {
        match document {
            Ok(doc) => Self { table: build(&doc), notice: None },
            Err(err) => {
                tracing::warn!(error = %err, "forecast document unavailable");
                Self { table: T::default(), notice: Some(err.to_string()) }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub place: Place,
    pub daily: Section<DailyTable>,
    pub hourly: Section<HourlyTable>,
}

/// Wires a locator and a forecast source together.
///
/// Holds no per-request state; one instance serves every request.
#[derive(Debug)]
pub struct Forecaster {
    locator: Box<dyn Locator>,
    source: Box<dyn ForecastSource>,
    default_location: DefaultLocation,
}

impl Forecaster {
    pub fn new(
        locator: Box<dyn Locator>,
        source: Box<dyn ForecastSource>,
        default_location: DefaultLocation,
    ) -> Self {
        Self { locator, source, default_location }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = http_client(config)?;
        Ok(Self::new(
            locator_from_config(config, http.clone()),
            source_from_config(config, http),
            config.default_location.clone(),
        ))
    }

    /// Blank input means the configured default location; nothing is looked up.
    pub async fn resolve(&self, input: &str) -> Result<Place, WeatherError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(self.default_location.place());
        }
        self.locator.locate(input).await
    }

    pub async fn report_for(&self, place: Place) -> Result<Report, WeatherError> {
        let pair = self.source.fetch(place.coordinate).await.inspect_err(|err| {
            tracing::warn!(error = %err, label = %place.label, "forecast lookup failed");
        })?;

        Ok(Report {
            place,
            daily: Section::from_document(pair.multi_day, build_daily),
            hourly: Section::from_document(pair.hourly, build_hourly),
        })
    }

    pub async fn report(&self, input: &str) -> Result<Report, WeatherError> {
        let place = self.resolve(input).await?;
        self.report_for(place).await
    }
}
