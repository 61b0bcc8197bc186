use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::utils::error::ServiceError;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Store keys. Entity collections are JSON arrays; the session keys hold
/// plain scalars.
pub mod keys {
    pub const USERS: &str = "users";
    pub const EVENTS: &str = "events";
    pub const FAQS: &str = "faqs";
    pub const SESSION_ROLE: &str = "session_role";
    pub const SESSION_EMAIL: &str = "session_email";
}

/// Persisted key/value record store. Every write replaces the full value for
/// the key, last writer wins. Implementations must be shareable across
/// actix workers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn read_raw(&self, key: &str) -> Option<String>;
    async fn write_raw(&self, key: &str, value: String) -> Result<(), ServiceError>;
    async fn remove_raw(&self, key: &str) -> Result<(), ServiceError>;
}

/// Reads an entity collection. Missing or malformed persisted text yields the
/// empty collection, never an error.
pub async fn read_records<T: DeserializeOwned>(store: &dyn RecordStore, entity: &str) -> Vec<T> {
    match store.read_raw(entity).await {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("⚠️  Corrupt data under key '{}', treating as empty: {}", entity, e);
                Vec::new()
            }
        },
        None => Vec::new(),
    }
}

/// Serializes and persists the full entity collection.
pub async fn write_records<T: Serialize>(
    store: &dyn RecordStore,
    entity: &str,
    records: &[T],
) -> Result<(), ServiceError> {
    let raw = serde_json::to_string(records)
        .map_err(|e| ServiceError::Store(format!("Failed to serialize '{}': {}", entity, e)))?;
    store.write_raw(entity, raw).await
}
