//! Settings for the dashboard. Values come, in increasing priority, from the
//! defaults below, an optional TOML file (`config/budget.toml`), `BUDGET_*`
//! environment variables and command-line flags.
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::{
    cli::Cli,
    error::{AppError, Result},
};

const DEFAULT_CONFIG_PATH: &str = "config/budget.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level for the `budget` and `engine` targets.
    pub level: String,
    /// Directory holding the persisted slots.
    pub data_dir: PathBuf,
    /// Months shown in the trend series.
    pub trend_window: usize,
    /// IANA timezone deciding what "today" is.
    pub timezone: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            data_dir: PathBuf::from("data"),
            trend_window: engine::DEFAULT_TREND_WINDOW,
            timezone: "UTC".to_string(),
        }
    }
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut builder = config::Config::builder();
        builder = builder.add_source(config::File::with_name(config_path).required(false));
        builder = builder.add_source(config::Environment::with_prefix("BUDGET"));
        let mut settings: Settings = builder.build()?.try_deserialize()?;

        if let Some(level) = &cli.level {
            settings.level = level.clone();
        }
        if let Some(data_dir) = &cli.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(trend_window) = cli.trend_window {
            settings.trend_window = trend_window;
        }
        if let Some(timezone) = &cli.timezone {
            settings.timezone = timezone.clone();
        }

        Ok(settings)
    }

    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::Timezone(self.timezone.clone()))
    }

    /// Current date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.timezone()?).date_naive())
    }
}
