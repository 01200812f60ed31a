//! Optional user settings stored in `config.toml`.

use std::path::Path;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::paths::Paths;

const DEFAULT_DAYS: i64 = 30;
const DEFAULT_PRODUCT_ID: &str = "-//calmirror//EN";

fn default_days() -> i64 {
    DEFAULT_DAYS
}

fn default_user_agent() -> String {
    format!("calmirror/{}", env!("CARGO_PKG_VERSION"))
}

fn default_product_id() -> String {
    DEFAULT_PRODUCT_ID.to_string()
}

/// Settings at `<config dir>/config.toml`. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Length of the default `events` window, in days from today.
    #[serde(default = "default_days")]
    pub default_days: i64,

    /// User-Agent header sent when fetching feeds.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// PRODID written into every stored event record.
    #[serde(default = "default_product_id")]
    pub product_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_days: default_days(),
            user_agent: default_user_agent(),
            product_id: default_product_id(),
        }
    }
}

impl Settings {
    /// Load settings, writing a commented default file on first run.
    pub fn load(paths: &Paths) -> CalendarResult<Self> {
        let path = paths.settings_file();

        if !path.exists() {
            Self::create_default(&path)?;
        }

        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    fn create_default(path: &Path) -> CalendarResult<()> {
        let contents = format!(
            "\
# calmirror configuration

# Days shown by `events` when no range is given:
# default_days = {}

# User-Agent sent when fetching feeds:
# user_agent = \"{}\"

# PRODID written into stored event files:
# product_id = \"{}\"
",
            DEFAULT_DAYS,
            default_user_agent(),
            DEFAULT_PRODUCT_ID
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
