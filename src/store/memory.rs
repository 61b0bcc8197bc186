use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::store::RecordStore;
use crate::utils::error::ServiceError;

/// In-memory record store. Used by tests and useful for running the service
/// without a data directory.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read_raw(&self, key: &str) -> Option<String> {
        self.inner.read().await.get(key).cloned()
    }

    async fn write_raw(&self, key: &str, value: String) -> Result<(), ServiceError> {
        self.inner.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_raw(&self, key: &str) -> Result<(), ServiceError> {
        self.inner.write().await.remove(key);
        Ok(())
    }
}
