//! The dashboard page: what gets shown for one submitted ZIP code.

use chrono::NaiveDate;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;

use weathery_core::{DailyTable, DayRow, Forecaster, HourlyTable, Place, Report, Section};

pub const TITLE: &str = "Weather";
pub const SEARCH_LABEL: &str = "Search by zip code";

/// `"<weekday>, <month> <day>"`, e.g. "Monday, May 06".
pub fn date_caption(today: NaiveDate) -> String {
    today.format("%A, %B %d").to_string()
}

pub fn location_caption(place: &Place) -> String {
    format!("Showing weather for {}", place.label)
}

#[derive(Debug)]
pub enum Body {
    Report(Report),
    /// Nothing could be tabulated. `place` is known when only the forecast failed.
    Failed { place: Option<Place>, message: String },
}

#[derive(Debug)]
pub struct Page {
    pub today: String,
    pub query: String,
    pub body: Body,
}

impl Page {
    pub async fn load(forecaster: &Forecaster, query: &str, today: NaiveDate) -> Self {
        let body = match forecaster.resolve(query).await {
            Err(err) => Body::Failed { place: None, message: err.to_string() },
            Ok(place) => match forecaster.report_for(place.clone()).await {
                Ok(report) => Body::Report(report),
                Err(err) => Body::Failed { place: Some(place), message: err.to_string() },
            },
        };

        Self {
            today: date_caption(today),
            query: query.trim().to_string(),
            body,
        }
    }

    pub fn place(&self) -> Option<&Place> {
        match &self.body {
            Body::Report(report) => Some(&report.place),
            Body::Failed { place, .. } => place.as_ref(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{TITLE}</title>");
        out.push_str(STYLE);
        out.push_str("</head>\n<body>\n");

        let _ = writeln!(out, "<h1>{TITLE}</h1>");
        let _ = writeln!(out, "<p class=\"date\">{}</p>", encode_text(&self.today));
        let _ = writeln!(
            out,
            "<form method=\"get\" action=\"/\">\n<label for=\"zip\">{SEARCH_LABEL}</label>\n\
             <input id=\"zip\" name=\"zip\" type=\"text\" inputmode=\"numeric\" value=\"{}\">\n\
             <button type=\"submit\">Search</button>\n</form>",
            encode_double_quoted_attribute(&self.query)
        );

        if let Some(place) = self.place() {
            let _ = writeln!(out, "<p class=\"location\">{}</p>", encode_text(&location_caption(place)));
        }

        match &self.body {
            Body::Report(report) => {
                out.push_str("<h2>7-day:</h2>\n");
                section_html(&mut out, &report.daily, daily_table_html);
                out.push_str("<h2>Hourly:</h2>\n");
                section_html(&mut out, &report.hourly, hourly_table_html);
            }
            Body::Failed { message, .. } => {
                let _ = writeln!(out, "<p class=\"error\">{}</p>", encode_text(message));
            }
        }

        out.push_str("</body>\n</html>\n");
        out
    }
}

const STYLE: &str = "<style>\n\
body { font-family: sans-serif; max-width: 56rem; margin: 2rem auto; padding: 0 1rem; }\n\
table { border-collapse: collapse; width: 100%; margin-bottom: 1.5rem; }\n\
th, td { border: 1px solid #ddd; padding: 0.3rem 0.6rem; text-align: left; }\n\
.error { color: #b00020; }\n\
</style>\n";

fn section_html<T>(out: &mut String, section: &Section<T>, table: fn(&mut String, &T)) {
    match &section.notice {
        Some(notice) => {
            let _ = writeln!(out, "<p class=\"error\">{}</p>", encode_text(notice));
        }
        None => table(out, &section.table),
    }
}

fn header_row(out: &mut String, columns: &[&str]) {
    out.push_str("<thead><tr>");
    for column in columns {
        let _ = write!(out, "<th>{}</th>", encode_text(column));
    }
    out.push_str("</tr></thead>\n");
}

fn row(out: &mut String, cells: &[&str]) {
    out.push_str("<tr>");
    for cell in cells {
        let _ = write!(out, "<td>{}</td>", encode_text(cell));
    }
    out.push_str("</tr>\n");
}

fn daily_table_html(out: &mut String, table: &DailyTable) {
    out.push_str("<table class=\"daily\">\n");
    let mut columns = vec!["day"];
    columns.extend(DailyTable::COLUMNS);
    header_row(out, &columns);
    out.push_str("<tbody>\n");
    for (day, DayRow { high, low, precip, wind }) in table.rows() {
        row(out, &[day, high.as_str(), low.as_str(), precip.as_str(), wind.as_str()]);
    }
    out.push_str("</tbody>\n</table>\n");
}

fn hourly_table_html(out: &mut String, table: &HourlyTable) {
    out.push_str("<table class=\"hourly\">\n");
    header_row(out, &HourlyTable::COLUMNS);
    out.push_str("<tbody>\n");
    for hour in &table.rows {
        row(out, &[hour.time.as_str(), hour.precip.as_str(), hour.temp.as_str()]);
    }
    out.push_str("</tbody>\n</table>\n");
}
