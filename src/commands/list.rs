use anyhow::{Context, Result};
use calmirror_core::CalendarManager;

use crate::render;
use crate::ListFormat;

pub fn run(manager: &CalendarManager, output: ListFormat) -> Result<()> {
    let sources = manager.list_sources()?;

    if sources.is_empty() {
        println!("no calendars configured");
        return Ok(());
    }

    match output {
        ListFormat::Json => {
            let json = serde_json::to_string_pretty(&sources)
                .context("Failed to serialize calendars")?;
            println!("{json}");
        }
        ListFormat::Table => {
            let rows: Vec<Vec<String>> = sources
                .iter()
                .map(|s| vec![s.name.clone(), s.url.clone()])
                .collect();
            println!("{}", render::table(&["NAME", "URL"], &rows));
        }
    }

    Ok(())
}
