use anyhow::Result;
use calmirror_core::{CalendarManager, CalendarResult, Source, SyncObserver};
use indicatif::ProgressBar;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::utils::tui;

/// Shows a spinner while a source syncs, then its outcome.
#[derive(Default)]
struct SpinnerReport {
    spinner: Option<ProgressBar>,
}

impl SyncObserver for SpinnerReport {
    fn started(&mut self, source: &Source) {
        self.spinner = Some(tui::create_spinner(source.render()));
    }

    fn finished(&mut self, source: &Source, outcome: &CalendarResult<usize>) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }

        println!("{}", source.render());

        match outcome {
            Ok(count) => println!("  {count} events synced"),
            Err(e) => println!("  {}", e.to_string().red()),
        }
    }
}

pub fn run(manager: &CalendarManager, name: Option<&str>) -> Result<()> {
    let sources = match name {
        Some(name) => vec![manager.source(name)?],
        None => manager.list_sources()?,
    };

    let results = manager.sync_sources(&sources, &mut SpinnerReport::default())?;

    let failures = results.iter().filter(|r| r.outcome.is_err()).count();
    if failures > 0 {
        anyhow::bail!("{failures} of {} calendars failed to sync", results.len());
    }

    Ok(())
}
