use crate::storage::KeyValueStore;
use chrono::Utc;
use common::errors::AppError;
use common::models::{CacheEntry, CacheTable, WeatherSnapshot};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Duration;
use tracing::{debug, warn};

/// Storage key holding the whole cache table
pub const CACHE_KEY: &str = "weather_cache";

/// Outcome of reading the cache table from storage
#[derive(Debug)]
pub enum TableLoad {
    /// Nothing stored yet
    Missing,
    Loaded(CacheTable),
    /// Slot holds something that isn't a cache table, or could not be read
    Corrupt { reason: String },
}

impl TableLoad {
    /// Fail open: anything but a valid table reads as empty.
    pub fn into_table(self) -> CacheTable {
        match self {
            TableLoad::Loaded(table) => table,
            TableLoad::Missing | TableLoad::Corrupt { .. } => CacheTable::new(),
        }
    }
}

/// Time-boxed weather cache persisted as a single table blob.
///
/// The table is re-read from storage on every call. Entries older than the
/// freshness window stay stored but read as absent.
pub struct CacheStore {
    backend: Arc<dyn KeyValueStore>,
    ttl_ms: i64,
    write_lock: Mutex<()>,
}

impl CacheStore {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: Duration) -> Self {
        Self {
            backend: store,
            ttl_ms: i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_ttl(store: Arc<dyn KeyValueStore>, ttl_seconds: u64) -> Self {
        Self::new(store, Duration::from_secs(ttl_seconds))
    }

    pub async fn lookup(&self, city: &str) -> Option<WeatherSnapshot> {
        self.lookup_at(city, now_ms()).await
    }

    pub async fn lookup_at(&self, city: &str, now_ms: i64) -> Option<WeatherSnapshot> {
        let key = normalize_city(city);
        let table = self.load_logged().await;

        let entry = table.get(&key)?;
        // Timestamps come from storage unchecked, so the age must not overflow
        let age_ms = now_ms.saturating_sub(entry.timestamp);
        if age_ms < self.ttl_ms {
            return Some(entry.data.clone());
        }

        debug!(city = %key, age_ms, "Cache entry stale");
        None
    }

    pub async fn store(&self, city: &str, data: WeatherSnapshot) -> Result<(), AppError> {
        self.store_at(city, data, now_ms()).await
    }

    pub async fn store_at(
        &self,
        city: &str,
        data: WeatherSnapshot,
        now_ms: i64,
    ) -> Result<(), AppError> {
        let key = normalize_city(city);

        // Held across the read-modify-write so concurrent writers don't drop each other's entries
        let _guard = self.write_lock.lock().await;

        let mut table = self.load_logged().await;
        table.insert(
            key,
            CacheEntry {
                data,
                timestamp: now_ms,
            },
        );

        let blob = serde_json::to_string(&table)
            .map_err(|e| AppError::storage(format!("Failed to serialize cache: {}", e)))?;
        self.backend.set(CACHE_KEY, blob).await
    }

    pub async fn load_table(&self) -> TableLoad {
        let raw = match self.backend.get(CACHE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return TableLoad::Missing,
            Err(e) => {
                return TableLoad::Corrupt {
                    reason: e.to_string(),
                };
            }
        };

        match serde_json::from_str::<CacheTable>(&raw) {
            Ok(table) => TableLoad::Loaded(table),
            Err(e) => TableLoad::Corrupt {
                reason: e.to_string(),
            },
        }
    }

    async fn load_logged(&self) -> CacheTable {
        let load = self.load_table().await;
        if let TableLoad::Corrupt { reason } = &load {
            warn!(reason = %reason, "Cache table unreadable, treating as empty");
        }
        load.into_table()
    }
}

pub fn normalize_city(city: &str) -> String {
    city.to_lowercase()
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
