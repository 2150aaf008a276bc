use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use cadence_core::repository::DEFAULT_LIST_LIMIT;

/// Name of the optional configuration file in the working directory.
pub const CONFIG_FILE: &str = "cadence.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Path of the SQLite database file
    pub database_path: String,
    /// IANA timezone used to decide what "today" is
    pub timezone: String,
    /// Maximum number of tasks shown by `list`
    pub search_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: "scheduler.db".to_string(),
            timezone: detect_system_timezone(),
            search_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl Config {
    /// Defaults, then `cadence.toml`, then `TODO_DBFILE`, then `CADENCE_*`
    /// environment variables.
    pub fn new() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(
                Env::raw()
                    .only(&["TODO_DBFILE"])
                    .map(|_| "database_path".into()),
            )
            .merge(Env::prefixed("CADENCE_"))
            .extract()
    }

    /// Today's date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate, String> {
        let tz = validate_timezone(&self.timezone)?;
        Ok(Utc::now().with_timezone(&tz).date_naive())
    }
}

/// Validates that a timezone string is a valid IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<Tz, String> {
    Tz::from_str(timezone).map_err(|_| {
        format!(
            "Invalid timezone: '{}'. Use IANA timezone names like 'Europe/Berlin'",
            timezone
        )
    })
}

/// Detects the system timezone, falling back to UTC if detection fails
pub fn detect_system_timezone() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        if validate_timezone(&tz).is_ok() {
            return tz;
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(tz) = std::fs::read_to_string("/etc/timezone") {
            let tz = tz.trim();
            if validate_timezone(tz).is_ok() {
                return tz.to_string();
            }
        }
    }

    if let Ok(local_tz) = iana_time_zone::get_timezone() {
        if validate_timezone(&local_tz).is_ok() {
            return local_tz;
        }
    }

    "UTC".to_string()
}
