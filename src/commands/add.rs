use anyhow::Result;
use calmirror_core::CalendarManager;
use owo_colors::OwoColorize;

use crate::utils::tui;

pub fn run(manager: &CalendarManager, name: Option<String>, url: Option<String>) -> Result<()> {
    let name = tui::value_or_prompt(name, "  Calendar name")?;
    let url = tui::value_or_prompt(url, "  iCal URL")?;

    let source = manager.add_source(name.trim(), url.trim())?;

    println!("added calendar {:?}", source.name);
    println!("{}", "Run `calmirror sync` to fetch its events".dimmed());
    Ok(())
}
