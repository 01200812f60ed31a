use std::io::Write;

use anyhow::{Context, Result};
use calmirror_core::CalendarManager;

use crate::render::RenderDetail;
use crate::OutputFormat;

pub fn run(manager: &CalendarManager, uid: &str, output: OutputFormat) -> Result<()> {
    let (event, raw) = manager.get_event(uid)?;

    match output {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&event).context("Failed to serialize event")?;
            println!("{json}");
        }
        OutputFormat::Ics => std::io::stdout().lock().write_all(&raw)?,
        OutputFormat::Table => println!("{}", event.render_detail()),
    }

    Ok(())
}
