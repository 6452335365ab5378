use common::errors::AppError;
use std::env;
use std::time::Duration;

pub struct Config {
    pub port: u16,
    pub openweather_url: String,
    pub api_key: String,
    pub cache_ttl_seconds: u64,
    /// Empty means keep the cache in memory only
    pub cache_dir: String,
    pub http_timeout: Option<Duration>,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3002),
            openweather_url: env::var("OPENWEATHER_URL").unwrap_or_else(|_| {
                "https://api.openweathermap.org/data/2.5/weather".to_string()
            }),
            api_key: env::var("OPEN_WEATHER_API_KEY").unwrap_or_default(),
            cache_ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(300), // 5 minutes default
            cache_dir: env::var("CACHE_DIR").unwrap_or_else(|_| "data".to_string()),
            http_timeout: parse_timeout(env::var("HTTP_TIMEOUT_SECONDS").ok().as_deref())?,
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        })
    }
}

/// Unset or empty means no timeout. Anything else must be whole seconds.
fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(|secs| Some(Duration::from_secs(secs))).map_err(|_| {
            AppError::config(format!(
                "HTTP_TIMEOUT_SECONDS must be a whole number of seconds, got {:?}",
                value
            ))
        }),
    }
}
