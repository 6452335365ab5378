use async_trait::async_trait;
use common::errors::AppError;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Durable string slots addressed by key
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when nothing has been written under `key` yet.
    async fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    async fn set(&self, key: &str, value: String) -> Result<(), AppError>;
}

/// In-process store, lost on restart
#[derive(Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let slots = self.slots.read().await;
        Ok(slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        let mut slots = self.slots.write().await;
        slots.insert(key.to_string(), value);
        Ok(())
    }
}

/// One file per key under a directory, `<dir>/<key>.json`
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create {:?}: {}", self.dir, e)))?;

        // Write to a sibling temp file and rename so readers never see a torn value
        let path = self.path_for(key);
        let tmp_path = path.with_extension(format!("json.{}.tmp", std::process::id()));
        tokio::fs::write(&tmp_path, value)
            .await
            .map_err(|e| AppError::storage(format!("Failed to write {}: {}", key, e)))?;
        tokio::fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| AppError::storage(format!("Failed to replace {}: {}", key, e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_overwrites() {
        let store = MemoryStore::new();
        assert_eq!(store.get("weather_cache").await.unwrap(), None);

        store.set("weather_cache", "first".to_string()).await.unwrap();
        store.set("weather_cache", "second".to_string()).await.unwrap();

        assert_eq!(
            store.get("weather_cache").await.unwrap().as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("not-created-yet"));

        assert_eq!(store.get("weather_cache").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("cache");

        FileStore::new(&nested)
            .set("weather_cache", "{\"london\":{}}".to_string())
            .await
            .unwrap();

        let reopened = FileStore::new(&nested);
        assert_eq!(
            reopened.get("weather_cache").await.unwrap().as_deref(),
            Some("{\"london\":{}}")
        );
        assert!(nested.join("weather_cache.json").exists());
    }
}
