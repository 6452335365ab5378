use crate::api_client::{OpenWeatherClient, normalize};
use crate::cache::CacheStore;
use common::errors::AppError;
use common::models::WeatherSnapshot;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Cache-then-fetch weather lookups
pub struct WeatherGateway {
    client: Arc<OpenWeatherClient>,
    cache: Arc<CacheStore>,
}

impl WeatherGateway {
    pub fn new(client: Arc<OpenWeatherClient>, cache: Arc<CacheStore>) -> Self {
        Self { client, cache }
    }

    /// Current weather for `city`, served from cache while fresh.
    ///
    /// `city` is used verbatim; callers are expected to reject blank input.
    /// On any error nothing is written to the cache.
    #[instrument(skip(self), fields(city = %city))]
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, AppError> {
        if let Some(cached) = self.cache.lookup(city).await {
            info!(city = %city, "Cache hit");
            return Ok(cached);
        }

        info!(city = %city, "Cache miss");
        let response = self.client.get_current(city).await?;
        let snapshot = normalize(response)?;

        if let Err(e) = self.cache.store(city, snapshot.clone()).await {
            warn!(city = %city, error = %e, "Failed to cache weather");
        }

        Ok(snapshot)
    }
}
