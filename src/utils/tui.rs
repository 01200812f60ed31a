use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/"])
        .template("{msg} {spinner}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Use `value` if given, otherwise ask for it.
pub fn value_or_prompt(value: Option<String>, prompt: &str) -> dialoguer::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Input::<String>::new().with_prompt(prompt).interact_text(),
    }
}
