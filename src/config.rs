use std::time::Duration;

use crate::error::{AppError, Result};
use crate::types::HistoryRange;

pub const RENTCAST_API_URL: &str = "https://api.rentcast.io/v1";

/// Zip codes analyzed by `report` when none are given on the command line.
pub const DEFAULT_REPORT_ZIP_CODES: &[&str] = &["90210", "10001", "30309"];

/// Velocity buckets on average days on market (inclusive upper bounds).
pub mod velocity_thresholds {
    pub const VERY_FAST_MAX: f64 = 30.0;
    pub const FAST_MAX: f64 = 60.0;
    pub const MODERATE_MAX: f64 = 90.0;
    pub const SLOW_MAX: f64 = 120.0;
}

/// Temperature buckets on sale-side average days on market (inclusive upper bounds).
pub mod temperature_thresholds {
    pub const HOT_MAX: f64 = 45.0;
    pub const WARM_MAX: f64 = 90.0;
}

/// Annual rental yield floors, in percent.
pub mod yield_thresholds {
    pub const HIGH_MIN: f64 = 8.0;
    pub const MODERATE_MIN: f64 = 5.0;
}

#[derive(Debug, Clone)]
pub struct Config {
    /// RentCast API key (RENTCAST_API_KEY). Required.
    pub api_key: String,
    pub base_url: String,
    pub log_level: String,
    pub api_port: u16,
    /// Months of history requested when the caller does not specify (HISTORY_RANGE).
    pub history_range: HistoryRange,
    /// Per-request timeout for the market statistics client (REQUEST_TIMEOUT_SECS).
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("RENTCAST_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(
                    "RENTCAST_API_KEY is required. Set it as environment variable.".to_string(),
                )
            })?;

        let history_range = std::env::var("HISTORY_RANGE")
            .unwrap_or_else(|_| "12".to_string())
            .parse::<i64>()
            .map_err(|_| AppError::Config("HISTORY_RANGE must be an integer".to_string()))
            .and_then(|months| HistoryRange::new(months).map_err(AppError::from))?;

        Ok(Self {
            api_key,
            base_url: std::env::var("RENTCAST_BASE_URL")
                .unwrap_or_else(|_| RENTCAST_API_URL.to_string()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            history_range,
            request_timeout: Duration::from_secs(
                std::env::var("REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse::<u64>()
                    .unwrap_or(30),
            ),
        })
    }
}
