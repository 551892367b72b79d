//! Core library for `weathery`.
//!
//! This crate defines:
//! - Configuration handling
//! - Geocoding and forecast providers behind traits
//! - The table builder turning forecast documents into display rows
//! - The per-request pipeline tying them together
//!
//! It is used by `weathery-cli`, which serves the dashboard and the terminal view.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod report;
pub mod table;

pub use config::{Config, DefaultLocation};
pub use error::WeatherError;
pub use model::{Coordinate, DocumentKind, ForecastDocument, ForecastPair, Period, Place};
pub use provider::{ForecastSource, Locator};
pub use report::{Forecaster, Report, Section};
pub use table::{DailyTable, DayRow, HourRow, HourlyTable, build_daily, build_hourly};
