//! Plain-text rendering of the dashboard for `weathery show`.

use chrono::NaiveDate;
use std::fmt::Write as _;

use weathery_core::{DailyTable, Forecaster, HourlyTable, Section};

use crate::page::{Body, Page, TITLE, location_caption};

pub async fn render(forecaster: &Forecaster, query: &str, today: NaiveDate) -> String {
    page_text(&Page::load(forecaster, query, today).await)
}

pub fn page_text(page: &Page) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{TITLE}\n{}\n", page.today);

    if let Some(place) = page.place() {
        let _ = writeln!(out, "{}\n", location_caption(place));
    }

    match &page.body {
        Body::Report(report) => {
            out.push_str("7-day:\n");
            section_text(&mut out, &report.daily, daily_lines);
            out.push_str("\nHourly:\n");
            section_text(&mut out, &report.hourly, hourly_lines);
        }
        Body::Failed { message, .. } => {
            let _ = writeln!(out, "{message}");
        }
    }

    out
}

fn section_text<T>(out: &mut String, section: &Section<T>, lines: fn(&T) -> Vec<Vec<String>>) {
    match &section.notice {
        Some(notice) => {
            let _ = writeln!(out, "{notice}");
        }
        None => out.push_str(&align(&lines(&section.table))),
    }
}

fn daily_lines(table: &DailyTable) -> Vec<Vec<String>> {
    let mut header = vec![String::new()];
    header.extend(DailyTable::COLUMNS.iter().map(|c| c.to_string()));

    let mut lines = vec![header];
    lines.extend(table.rows().map(|(day, row)| {
        vec![
            day.to_string(),
            row.high.clone(),
            row.low.clone(),
            row.precip.clone(),
            row.wind.clone(),
        ]
    }));
    lines
}

fn hourly_lines(table: &HourlyTable) -> Vec<Vec<String>> {
    let mut lines = vec![HourlyTable::COLUMNS.iter().map(|c| c.to_string()).collect()];
    lines.extend(
        table
            .rows
            .iter()
            .map(|r| vec![r.time.clone(), r.precip.clone(), r.temp.clone()]),
    );
    lines
}

/// Left-aligns cells into columns padded to the widest entry.
fn align(lines: &[Vec<String>]) -> String {
    let columns = lines.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            lines
                .iter()
                .filter_map(|line| line.get(i))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in lines {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(out, "{}", padded.join("  ").trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::tests::sample_report;

    fn page(body: Body) -> Page {
        Page { today: "Monday, May 06".into(), query: String::new(), body }
    }

    #[test]
    fn align_pads_columns_to_widest_cell() {
        let lines = vec![
            vec!["a".to_string(), "bb".to_string()],
            vec!["ccc".to_string(), "d".to_string()],
        ];

        assert_eq!(align(&lines), "a    bb\nccc  d\n");
    }

    #[test]
    fn align_counts_degree_sign_as_one_column() {
        let lines = vec![
            vec!["80°".to_string(), "x".to_string()],
            vec!["100".to_string(), "y".to_string()],
        ];

        assert_eq!(align(&lines), "80°  x\n100  y\n");
    }

    #[test]
    fn report_text_lists_daily_before_hourly() {
        let text = page_text(&page(Body::Report(sample_report())));

        assert!(text.starts_with("Weather\nMonday, May 06\n"));
        assert!(text.contains("Showing weather for Seguin, Texas"));
        assert!(text.contains("Mon, 06  80°   55°  20%     10 to 15 mph"));
        assert!(text.contains("Monday, 14:00          68F"));
        assert!(text.find("7-day:").unwrap() < text.find("Hourly:").unwrap());
    }

    #[test]
    fn failure_text_is_just_the_message() {
        let text = page_text(&page(Body::Failed {
            place: None,
            message: "Weather service is unavailable (points lookup returned status 404).".into(),
        }));

        assert!(text.ends_with("Weather service is unavailable (points lookup returned status 404).\n"));
        assert!(!text.contains("7-day:"));
    }
}
