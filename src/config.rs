use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AuctionError, Result};

pub const SALES_TABLE: &str = "auction_sales";
pub const DATABASE_FILE: &str = "auction_sales.duckdb";

/// Value of `DATABASE_PATH` that selects an in-memory store.
pub const IN_MEMORY: &str = ":memory:";

pub const DEFAULT_LIST_LIMIT: usize = 100;
pub const DEFAULT_IMPORT_LIMIT: u32 = 50;
pub const MIN_IMPORT_LIMIT: u32 = 1;
pub const MAX_IMPORT_LIMIT: u32 = 200;

pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

pub fn default_database_path() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("auction-insights").join(DATABASE_FILE)
    } else {
        PathBuf::from(DATABASE_FILE)
    }
}

/// Runtime settings read from the process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// `None` selects an in-memory database.
    pub database_path: Option<PathBuf>,
    pub provider_base_url: Option<String>,
    pub provider_api_key: Option<String>,
    pub provider_timeout: Duration,
    pub bind_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: Some(default_database_path()),
            provider_base_url: None,
            provider_api_key: None,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// | Variable                | Default                              |
    /// |-------------------------|--------------------------------------|
    /// | `DATABASE_PATH`         | platform data dir (`:memory:` = RAM) |
    /// | `OLD_CARS_BASE_URL`     | unset                                |
    /// | `OLD_CARS_API_KEY`      | unset                                |
    /// | `PROVIDER_TIMEOUT_SECS` | `30`                                 |
    /// | `BIND_ADDR`             | `0.0.0.0:8000`                       |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(path) = non_empty(lookup("DATABASE_PATH")) {
            settings.database_path = if path == IN_MEMORY {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        settings.provider_base_url = non_empty(lookup("OLD_CARS_BASE_URL"));
        settings.provider_api_key = non_empty(lookup("OLD_CARS_API_KEY"));

        if let Some(raw) = non_empty(lookup("PROVIDER_TIMEOUT_SECS")) {
            let secs: u64 = raw.parse().map_err(|_| {
                AuctionError::Config(format!(
                    "PROVIDER_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?;
            if secs == 0 {
                return Err(AuctionError::Config(
                    "PROVIDER_TIMEOUT_SECS must be greater than zero".to_string(),
                ));
            }
            settings.provider_timeout = Duration::from_secs(secs);
        }

        if let Some(addr) = non_empty(lookup("BIND_ADDR")) {
            settings.bind_addr = addr;
        }

        Ok(settings)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
