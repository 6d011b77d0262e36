//! Crawl configuration.
//!
//! Defaults reproduce the fixed run: 北京北 → 上海, tomorrow, written to
//! `12306_data.sql`, without stop lists. Each setting can be overridden
//! from the environment.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::kyfw::{DEFAULT_BASE_URL, KyfwConfig};

/// Default origin station name.
pub const DEFAULT_FROM_STATION: &str = "北京北";
/// Default destination station name.
pub const DEFAULT_TO_STATION: &str = "上海";
/// Default output file.
pub const DEFAULT_OUTPUT: &str = "12306_data.sql";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Settings for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Origin station name, as listed in the station directory.
    pub from_station: String,
    /// Destination station name.
    pub to_station: String,
    /// Travel date queried.
    pub date: NaiveDate,
    /// File the SQL is written to. Overwritten each run.
    pub output: PathBuf,
    /// Whether to fetch and render stop lists.
    pub fetch_stops: bool,
    /// HTTP client settings.
    pub kyfw: KyfwConfig,
}

impl CrawlConfig {
    /// Create a config for a specific route and date with default output.
    pub fn new(
        from_station: impl Into<String>,
        to_station: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            from_station: from_station.into(),
            to_station: to_station.into(),
            date,
            output: PathBuf::from(DEFAULT_OUTPUT),
            fetch_stops: false,
            kyfw: KyfwConfig::default(),
        }
    }

    /// Set the output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Enable or disable stop fetching.
    pub fn with_stops(mut self, fetch_stops: bool) -> Self {
        self.fetch_stops = fetch_stops;
        self
    }

    /// Set the HTTP client settings.
    pub fn with_kyfw(mut self, kyfw: KyfwConfig) -> Self {
        self.kyfw = kyfw;
        self
    }

    /// Read configuration from process environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `CRAWL_FROM` | `北京北` |
    /// | `CRAWL_TO` | `上海` |
    /// | `CRAWL_DATE` | tomorrow (`YYYY-MM-DD`) |
    /// | `CRAWL_OUTPUT` | `12306_data.sql` |
    /// | `CRAWL_WITH_STOPS` | off |
    /// | `KYFW_BASE_URL` | `https://kyfw.12306.cn` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let date = match var("CRAWL_DATE") {
            Some(value) => NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
                ConfigError::Invalid {
                    var: "CRAWL_DATE",
                    value,
                    reason: "expected YYYY-MM-DD",
                }
            })?,
            None => tomorrow(),
        };

        let fetch_stops = match var("CRAWL_WITH_STOPS") {
            Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                var: "CRAWL_WITH_STOPS",
                value,
                reason: "expected true/false or 1/0",
            })?,
            None => false,
        };

        let base_url = var("KYFW_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            from_station: var("CRAWL_FROM").unwrap_or_else(|| DEFAULT_FROM_STATION.to_string()),
            to_station: var("CRAWL_TO").unwrap_or_else(|| DEFAULT_TO_STATION.to_string()),
            date,
            output: var("CRAWL_OUTPUT").map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), PathBuf::from),
            fetch_stops,
            kyfw: KyfwConfig::new(base_url),
        })
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FROM_STATION, DEFAULT_TO_STATION, tomorrow())
    }
}

/// Tomorrow's date in local time.
pub fn tomorrow() -> NaiveDate {
    let today = Local::now().date_naive();
    today.succ_opt().unwrap_or(today)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
