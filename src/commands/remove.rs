use anyhow::Result;
use calmirror_core::CalendarManager;

pub fn run(manager: &CalendarManager, name: &str) -> Result<()> {
    manager.remove_source(name)?;
    println!("removed calendar {name:?}");
    Ok(())
}
