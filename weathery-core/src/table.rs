//! Reshapes forecast documents into display tables.
//!
//! Both builders walk periods in the order the provider returned them and
//! never sort. If the provider ever sends periods out of order, the tables
//! come out in that same order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{ForecastDocument, Period};

/// Shown in a precipitation cell when there is nothing worth showing.
pub const BLANK: &str = " ";

const HOUR_FORMAT: &str = "%A, %H:%M";
const DAY_KEY_FORMAT: &str = "%a, %d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRow {
    pub time: String,
    pub precip: String,
    pub temp: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyTable {
    pub rows: Vec<HourRow>,
}

impl HourlyTable {
    pub const COLUMNS: [&'static str; 3] = ["time", "precip", "temp"];

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRow {
    pub high: String,
    pub low: String,
    pub precip: String,
    pub wind: String,
}

impl Default for DayRow {
    fn default() -> Self {
        Self {
            high: String::new(),
            low: String::new(),
            precip: BLANK.to_string(),
            wind: "0".to_string(),
        }
    }
}

/// Day rows keyed by `"<Abbrev weekday>, <DD>"`, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyTable {
    days: IndexMap<String, DayRow>,
}

impl DailyTable {
    pub const COLUMNS: [&'static str; 4] = ["high", "low", "precip", "wind"];

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn get(&self, day: &str) -> Option<&DayRow> {
        self.days.get(day)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &DayRow)> {
        self.days.iter().map(|(day, row)| (day.as_str(), row))
    }

    fn fold(&mut self, period: &Period) {
        let key = period.start_time.format(DAY_KEY_FORMAT).to_string();
        let row = self.days.entry(key).or_default();

        let temp = format!("{}°", period.temperature);
        if period.is_night() {
            row.low = temp;
        } else {
            row.high = temp;
        }

        if let Some(value) = period.precip_percent() {
            row.precip = format!("{value}%");
        }

        row.wind = period.wind_speed.clone();
    }
}

fn hour_row(period: &Period) -> HourRow {
    let precip = match period.precip_percent() {
        Some(value) if value > 0 => format!("{value}%"),
        _ => BLANK.to_string(),
    };

    HourRow {
        time: period.start_time.format(HOUR_FORMAT).to_string(),
        precip,
        temp: format!("{}{}", period.temperature, period.temperature_unit),
    }
}

/// One row per hourly period.
pub fn build_hourly(doc: &ForecastDocument) -> HourlyTable {
    HourlyTable {
        rows: doc.periods.iter().map(hour_row).collect(),
    }
}

/// Folds day and night periods into one row per calendar day.
///
/// At most one day period and one night period per date is expected; a later
/// period silently replaces an earlier one in the same slot.
pub fn build_daily(doc: &ForecastDocument) -> DailyTable {
    let mut table = DailyTable::default();
    for period in &doc.periods {
        table.fold(period);
    }
    table
}
