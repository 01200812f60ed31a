use anyhow::Result;
use calmirror_core::paths::DIR_ENV;
use calmirror_core::CalendarManager;
use owo_colors::OwoColorize;

pub fn run(manager: &CalendarManager) -> Result<()> {
    let paths = manager.paths();
    let settings = manager.settings();

    println!("{}", "Paths".bold());
    println!("  Config dir:  {}", paths.dir().display());
    println!("  Settings:    {}", paths.settings_file().display());
    println!("  Sources:     {}", paths.sources_file().display());
    println!("  Events:      {}", paths.events_dir().display());
    println!("  {}", format!("(override with ${DIR_ENV})").dimmed());

    println!();
    println!("{}", "Settings".bold());
    println!("  default_days: {}", settings.default_days);
    println!("  user_agent:   {}", settings.user_agent);
    println!("  product_id:   {}", settings.product_id);

    Ok(())
}
