use std::path::PathBuf;

use anyhow::Result;
use chrono::Weekday;
use chrono_tz::Tz;
use config::Config;
use serde::Deserialize;

use crate::clock::SystemClock;
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Address the listener binds, as "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// First day of a calendar grid week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl WeekStart {
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
            Self::Tuesday => Weekday::Tue,
            Self::Wednesday => Weekday::Wed,
            Self::Thursday => Weekday::Thu,
            Self::Friday => Weekday::Fri,
            Self::Saturday => Weekday::Sat,
        }
    }
}

/// How far past its anchor a recurring event may generate occurrences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonMode {
    /// Every cadence is capped at `horizon_days` after the anchor.
    #[default]
    Flat,
    /// Each cadence has its own cap (180/365/500/1000 days).
    PerCadence,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub week_start: WeekStart,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default)]
    pub horizon: HorizonMode,
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u16,
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

const fn default_horizon_days() -> u16 {
    30
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            time_zone: default_time_zone(),
            horizon: HorizonMode::default(),
            horizon_days: default_horizon_days(),
        }
    }
}

impl CalendarConfig {
    /// ## Summary
    /// Parses the configured IANA time zone.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the zone name is unknown.
    pub fn tz(&self) -> CoreResult<Tz> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|err| CoreError::ConfigError(format!("calendar.time_zone: {err}")))
    }

    /// ## Summary
    /// Builds the wall clock for the configured time zone.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the zone name is unknown.
    pub fn clock(&self) -> CoreResult<SystemClock> {
        Ok(SystemClock::new(self.tz()?))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfig {
    /// JSON file with events to load into the store at start-up.
    pub events_path: Option<PathBuf>,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `config.toml` values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Self::builder()?
                // TOML file
                .add_source(config::File::with_name("config.toml").required(false))
                // Env file
                .add_source(
                    config::Environment::with_prefix("FLOCK")
                        .prefix_separator("_")
                        .separator("__")
                        .ignore_empty(true)
                        .try_parsing(true),
                ),
        )
    }

    /// ## Summary
    /// Builds settings from an inline TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is malformed or fails to deserialize.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::from_builder(
            Self::builder()?.add_source(config::File::from_str(toml, config::FileFormat::Toml)),
        )
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8699)?
            .set_default("logging.level", "info")?)
    }

    fn from_builder(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        let settings = builder.build()?.try_deserialize::<Self>()?;
        settings.calendar.tz()?;
        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(error = %err, "Failed to read .env file"),
    }

    Settings::load()
}
