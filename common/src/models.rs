use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Normalized current weather for one city
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSnapshot {
    /// Location display name as reported by the provider
    pub name: String,
    /// Temperature in °C
    pub temp: f64,
    pub description: String,
    /// Provider icon code, e.g. `01d`
    pub icon: String,
    /// Local time-of-day of the observation
    pub last_updated: String,
}

/// A cached snapshot plus the moment it was fetched
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CacheEntry {
    pub data: WeatherSnapshot,
    /// Epoch milliseconds
    pub timestamp: i64,
}

/// Lower-cased city name to its last fetched entry
pub type CacheTable = HashMap<String, CacheEntry>;
