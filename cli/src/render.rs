//! Text rendering of view state.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dpi_core::{score_text, Intervention, Patient, Scores, Stats, SummaryEntry};

const DATETIME_LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// `dd/mm/yyyy` when the value parses as a date, otherwise the raw value.
pub fn format_date(raw: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%d/%m/%Y").to_string();
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return datetime.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

/// `dd/mm/yyyy HH:MM` when the value parses as a timestamp, otherwise the raw value.
pub fn format_datetime(raw: &str) -> String {
    for format in DATETIME_LOCAL_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return datetime.format("%d/%m/%Y %H:%M").to_string();
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return datetime.format("%d/%m/%Y %H:%M").to_string();
    }
    raw.to_string()
}

pub fn stats(stats: &Stats) -> String {
    format!(
        "Patients:      {}\nInterventions: {}\n",
        stats.patients_count, stats.interventions_count
    )
}

pub fn patients<'a>(patients: impl Iterator<Item = &'a Patient>) -> String {
    let rows = patients
        .map(|p| {
            vec![
                p.last_name.clone(),
                p.first_name.clone(),
                format_date(&p.birth_date),
                p.id.to_string(),
            ]
        })
        .collect();
    table(&["Last name", "First name", "Born", "ID"], rows)
}

pub fn interventions<'a>(interventions: impl Iterator<Item = &'a Intervention>) -> String {
    let rows = interventions
        .map(|i| {
            vec![
                format_datetime(&i.datetime),
                i.location.clone(),
                first_line(&i.notes),
                i.id.to_string(),
            ]
        })
        .collect();
    table(&["Date", "Location", "Notes", "ID"], rows)
}

pub fn summary(entries: &[SummaryEntry]) -> String {
    if entries.is_empty() {
        return "No recent stays.\n".to_string();
    }
    let mut out = String::from("Recent stays:\n");
    for entry in entries {
        out.push_str(&format!("  - {}: {}\n", format_date(&entry.date), entry.summary));
    }
    out
}

pub fn scores(scores: &Scores) -> String {
    let mut out = format!(
        "Glasgow: {}\nNEWS:    {}\n",
        score_text(&scores.glasgow),
        score_text(&scores.news)
    );
    for (name, value) in &scores.other {
        out.push_str(&format!("{name}: {}\n", score_text(value)));
    }
    out
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_string()
}

/// Left-aligned columns separated by two spaces. A header-only table is
/// followed by "(no rows)".
fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(headers.to_vec());
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    for row in &rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}
