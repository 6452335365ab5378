pub mod api_client;
pub mod cache;
pub mod config;
pub mod gateway;
pub mod handlers;
pub mod openapi;
pub mod storage;

use common::errors::AppError;
use std::sync::Arc;
use tracing::{info, warn};

use crate::api_client::OpenWeatherClient;
use crate::cache::CacheStore;
use crate::config::Config;
use crate::gateway::WeatherGateway;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use common::http_client::HttpClient;

/// Wire storage, cache and provider client into a gateway.
pub fn build_gateway(config: &Config) -> Result<WeatherGateway, AppError> {
    if config.api_key.is_empty() {
        warn!("OPEN_WEATHER_API_KEY is not set; upstream requests will be rejected");
    }

    let store: Arc<dyn KeyValueStore> = if config.cache_dir.is_empty() {
        info!("Using in-memory weather cache");
        Arc::new(MemoryStore::new())
    } else {
        info!(dir = %config.cache_dir, "Using file-backed weather cache");
        Arc::new(FileStore::new(&config.cache_dir))
    };

    let cache = Arc::new(CacheStore::with_ttl(store, config.cache_ttl_seconds));
    let client = Arc::new(OpenWeatherClient::new(
        HttpClient::new(config.http_timeout)?,
        config.openweather_url.clone(),
        config.api_key.clone(),
    ));

    Ok(WeatherGateway::new(client, cache))
}
