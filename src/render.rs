//! Terminal rendering for calmirror-core types.
//!
//! Extension traits adding plain-text and colored output to core types
//! using owo_colors.

use calmirror_core::{Event, Instant, Source};
use chrono::Local;
use owo_colors::OwoColorize;

/// Space between table columns
const COLUMN_GAP: usize = 2;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Source {
    fn render(&self) -> String {
        format!("📅 {}", self.name)
    }
}

/// Lines of a detail view, one field per line.
pub trait RenderDetail {
    fn render_detail(&self) -> String;
}

impl RenderDetail for Event {
    fn render_detail(&self) -> String {
        let mut lines = Vec::new();
        lines.push(field("Summary", &self.summary));
        lines.push(field("Calendar", &self.calendar));

        if self.all_day {
            lines.push(field("Date", &format_day(self.start)));
            if self.end.is_some() && self.end != self.start {
                lines.push(field("End", &format_day(self.end)));
            }
        } else {
            lines.push(field("Start", &format_moment(self.start)));
            if self.end.is_some() {
                lines.push(field("End", &format_moment(self.end)));
            }
        }

        if !self.location.is_empty() {
            lines.push(field("Location", &self.location));
        }
        if !self.description.is_empty() {
            lines.push(field("Description", &self.description));
        }
        lines.push(field("UID", &self.uid));

        lines.join("\n")
    }
}

fn field(label: &str, value: &str) -> String {
    format!("{:<13}{}", format!("{label}:").bold(), value)
}

/// Table cell for an event's start, e.g. "2024-03-15 09:00" or "2024-03-15 (all day)"
pub fn event_time(event: &Event) -> String {
    match event.start {
        None => "-".to_string(),
        Some(start) if event.all_day => format!("{} (all day)", start.format("%Y-%m-%d")),
        Some(start) => start.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// All-day dates are calendar dates, so they're shown without zone conversion
fn format_day(instant: Instant) -> String {
    instant
        .map(|dt| dt.format("%a, %d %b %Y").to_string())
        .unwrap_or_default()
}

fn format_moment(instant: Instant) -> String {
    instant
        .map(|dt| dt.format("%a, %d %b %Y %H:%M %:z").to_string())
        .unwrap_or_default()
}

/// Left-aligned columns padded to the widest cell, header in bold.
pub fn table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let pad_row = |cells: Vec<&str>| -> String {
        let last = cells.len().saturating_sub(1);
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                if i == last {
                    cell.to_string()
                } else {
                    format!("{:<width$}", cell, width = widths[i] + COLUMN_GAP)
                }
            })
            .collect::<String>()
    };

    let mut lines = vec![pad_row(header.to_vec()).bold().to_string()];
    for row in rows {
        lines.push(pad_row(row.iter().map(String::as_str).collect()));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn event(all_day: bool) -> Event {
        let start = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 15, 0, 0, 0)
            .unwrap();
        Event {
            uid: "e1".to_string(),
            summary: "Launch".to_string(),
            description: String::new(),
            location: "HQ".to_string(),
            start: Some(start),
            end: None,
            calendar: "work".to_string(),
            all_day,
        }
    }

    #[test]
    fn test_all_day_time_cell() {
        assert_eq!(event_time(&event(true)), "2024-03-15 (all day)");
    }

    #[test]
    fn test_missing_start_cell() {
        let mut e = event(false);
        e.start = None;
        assert_eq!(event_time(&e), "-");
    }

    #[test]
    fn test_table_pads_columns() {
        let rows = vec![
            vec!["work".to_string(), "https://a".to_string()],
            vec!["personal".to_string(), "https://b".to_string()],
        ];

        let out = table(&["NAME", "URL"], &rows);
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines[1], "work      https://a");
        assert_eq!(lines[2], "personal  https://b");
    }

    #[test]
    fn test_detail_omits_empty_fields() {
        let detail = event(true).render_detail();

        assert!(detail.contains("Launch"));
        assert!(detail.contains("Fri, 15 Mar 2024"));
        assert!(detail.contains("HQ"));
        assert!(!detail.contains("Description"));
        assert!(!detail.contains("End"));
    }
}
