use std::io::Write;

use anyhow::{Context, Result};
use calmirror_core::{CalendarManager, DateRange};
use chrono::Local;

use crate::render;
use crate::OutputFormat;

pub fn run(manager: &CalendarManager, range: &[String], output: OutputFormat) -> Result<()> {
    let today = Local::now().date_naive();
    let range = DateRange::from_args(range, today, manager.settings().default_days)?;

    let events = manager.list_events(range.from, range.to)?;

    if events.is_empty() {
        println!("no events found");
        return Ok(());
    }

    match output {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&events).context("Failed to serialize events")?;
            println!("{json}");
        }
        OutputFormat::Ics => {
            let mut stdout = std::io::stdout().lock();
            for event in &events {
                match manager.event_record(event) {
                    Ok(raw) => stdout.write_all(&raw)?,
                    Err(e) => log::debug!("skipping {}: {e}", event.uid),
                }
            }
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = events
                .iter()
                .map(|e| {
                    vec![
                        render::event_time(e),
                        e.summary.clone(),
                        e.location.clone(),
                        e.calendar.clone(),
                    ]
                })
                .collect();
            println!(
                "{}",
                render::table(&["TIME", "SUMMARY", "LOCATION", "CALENDAR"], &rows)
            );
        }
    }

    Ok(())
}
