use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

use crate::store::RecordStore;
use crate::utils::error::ServiceError;

/// File-backed record store: one file per key under a data directory.
/// The lock serializes file access across actix workers. The logical
/// read-modify-write cycle above it stays unguarded: the session model
/// admits a single active writer, and every write is last-writer-wins.
#[derive(Clone)]
pub struct FileStore {
    dir: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl FileStore {
    pub async fn new(dir: &str) -> Result<Self, std::io::Error> {
        let dir = PathBuf::from(dir);
        fs::create_dir_all(&dir).await?;

        log::info!("🗂️  Record store ready at {}", dir.display());

        Ok(Self {
            dir,
            lock: Arc::new(RwLock::new(())),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn read_raw(&self, key: &str) -> Option<String> {
        let _guard = self.lock.read().await;
        fs::read_to_string(self.path_for(key)).await.ok()
    }

    async fn write_raw(&self, key: &str, value: String) -> Result<(), ServiceError> {
        let _guard = self.lock.write().await;
        fs::write(self.path_for(key), value)
            .await
            .map_err(|e| ServiceError::Store(format!("Failed to write '{}': {}", key, e)))
    }

    async fn remove_raw(&self, key: &str) -> Result<(), ServiceError> {
        let _guard = self.lock.write().await;
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::Store(format!(
                "Failed to remove '{}': {}",
                key, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn temp_store() -> (FileStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("campus-store-{}", uuid::Uuid::new_v4()));
        let store = FileStore::new(dir.to_str().unwrap()).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_write_read_remove() {
        let (store, dir) = temp_store().await;

        assert!(store.read_raw("users").await.is_none());

        store.write_raw("users", "[]".to_string()).await.unwrap();
        assert_eq!(store.read_raw("users").await.unwrap(), "[]");

        store.remove_raw("users").await.unwrap();
        assert!(store.read_raw("users").await.is_none());

        // Removing a missing key is not an error
        store.remove_raw("users").await.unwrap();

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_keys_are_independent_files() {
        let (store, dir) = temp_store().await;

        store.write_raw("events", "[1]".to_string()).await.unwrap();
        store.write_raw("faqs", "[2]".to_string()).await.unwrap();

        assert_eq!(store.read_raw("events").await.unwrap(), "[1]");
        assert_eq!(store.read_raw("faqs").await.unwrap(), "[2]");
        assert!(dir.join("events.json").exists());
        assert!(dir.join("faqs.json").exists());

        std::fs::remove_dir_all(dir).ok();
    }
}
